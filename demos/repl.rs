//! Drive the assistant's tools by hand.
//!
//! Usage:
//!   cargo run --example repl
//!   cargo run --example repl -- --timeout 5 --endpoint kong=http://localhost:8080/ask
//!   RUST_LOG=aila_tools=debug cargo run --example repl
//!
//! Each line is `<tool_name> [json arguments]`, e.g.
//!   get_temperature {"zone": "kitchen"}
//!   set_temperature {"zone": "office", "temp": 18}
//! `:tools` prints the catalog, `:temps` the current temperatures.
//! Ctrl-D or type "exit" / "quit" to leave.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use aila_tools::{Assistant, AssistantConfig, DelegateTopic};
use clap::Parser;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "repl", about = "Invoke assistant tools interactively")]
struct Cli {
    /// Delegate timeout in seconds (overrides AILA_DELEGATE_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Truncate delegate queries to this many characters
    #[arg(long)]
    max_query_chars: Option<usize>,

    /// Endpoint override as topic=url (topics: cnai, kubernetes, fastapi, genai, kong)
    #[arg(long, value_parser = parse_endpoint)]
    endpoint: Vec<(DelegateTopic, String)>,
}

fn parse_endpoint(raw: &str) -> Result<(DelegateTopic, String), String> {
    let (topic, url) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected topic=url, got '{raw}'"))?;
    let topic = DelegateTopic::ALL
        .into_iter()
        .find(|t| t.env_key().eq_ignore_ascii_case(topic))
        .ok_or_else(|| format!("unknown topic '{topic}'"))?;
    Ok((topic, url.to_string()))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = AssistantConfig::from_env().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    if let Some(secs) = cli.timeout {
        config.delegate_timeout = Duration::from_secs(secs.max(1));
    }
    if cli.max_query_chars.is_some() {
        config.max_query_chars = cli.max_query_chars;
    }
    config.endpoint_overrides.extend(cli.endpoint);

    let assistant = Assistant::new(config);

    println!("{} tools loaded. Type :tools to list them.", assistant.catalog().len());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {e}");
                break;
            }
        }

        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            ":tools" => {
                for spec in assistant.catalog() {
                    let params: Vec<String> = spec
                        .parameters
                        .iter()
                        .map(|p| format!("{}: {:?}", p.name, p.kind))
                        .collect();
                    println!("  {}({}) - {}", spec.name, params.join(", "), spec.description);
                }
                continue;
            }
            ":temps" => {
                for (zone, temp) in assistant.store().snapshot().await {
                    println!("  {zone}: {temp}C");
                }
                continue;
            }
            _ => {}
        }

        let (name, raw_args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = if raw_args.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(raw_args) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("arguments must be JSON: {e}");
                    continue;
                }
            }
        };

        println!("{}", assistant.invoke(name, &args).await);
    }
}
