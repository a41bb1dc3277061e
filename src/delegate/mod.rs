pub mod http;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::DelegateError;

pub use http::HttpTransport;

/// Returned when a delegate answers successfully but says nothing usable.
pub const NO_ANSWER: &str = "No answer provided";

/// Upper bound on one delegate round-trip unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One of the fixed remote tutors a query can be forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelegateTopic {
    Cnai,
    Kubernetes,
    FastApi,
    GenAi,
    Kong,
}

impl DelegateTopic {
    pub const ALL: [DelegateTopic; 5] = [
        DelegateTopic::Cnai,
        DelegateTopic::Kubernetes,
        DelegateTopic::FastApi,
        DelegateTopic::GenAi,
        DelegateTopic::Kong,
    ];

    /// Name of the tool that forwards to this topic.
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Cnai => "call_cnai_gpt",
            Self::Kubernetes => "call_kubernetes_gpt",
            Self::FastApi => "call_fastAPI_gpt",
            Self::GenAi => "call_genai_gpt",
            Self::Kong => "call_kong_gpt",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Cnai => "call a custom GPT CNAI tutorial to answer user queries",
            Self::Kubernetes => "call a custom GPT Kubernetes Tutorial to answer user queries",
            Self::FastApi => "call a custom GPT Fast API to answer user queries",
            Self::GenAi => {
                "call a custom GPT GenAI Foundations and Prompt Engineering to answer user queries"
            }
            Self::Kong => "call a custom GPT Kong Tutorial to answer user queries",
        }
    }

    /// Description of the tool's single `query` parameter.
    pub fn query_description(self) -> &'static str {
        match self {
            Self::Cnai => "The user query for the CNAI tutorial",
            Self::Kubernetes => "The user query for the Kubernetes Tutorial",
            Self::FastApi => "The user query for the Fast API",
            Self::GenAi => "The user query for the GenAI Foundations and Prompt Engineering",
            Self::Kong => "The user query for the Kong Tutorial",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            Self::Cnai => "https://chatgpt.com/g/g-rHbs9yqoG-cnai-tutorial",
            Self::Kubernetes => "https://chatgpt.com/g/g-LVKfisAVB-kubernetes-tutorial",
            Self::FastApi => "https://chatgpt.com/g/g-rxSEGF2Ve-fast-api",
            Self::GenAi => {
                "https://chatgpt.com/g/g-i1I6jGn8J-genai-foundations-and-prompt-engineering"
            }
            Self::Kong => "https://chatgpt.com/g/g-epC3RBzMK-kong-tutorial",
        }
    }

    /// Suffix used for `AILA_ENDPOINT_<KEY>` overrides.
    pub fn env_key(self) -> &'static str {
        match self {
            Self::Cnai => "CNAI",
            Self::Kubernetes => "KUBERNETES",
            Self::FastApi => "FASTAPI",
            Self::GenAi => "GENAI",
            Self::Kong => "KONG",
        }
    }
}

impl fmt::Display for DelegateTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_key())
    }
}

/// Raw outcome of a transport round-trip that got a response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one query to one endpoint. No retries, no interpretation.
/// Failures without a response (connect, DNS, timeout) come back as `Err`.
#[async_trait]
pub trait DelegateTransport: Send + Sync {
    async fn post_query(&self, url: &str, query: &str) -> Result<TransportResponse, DelegateError>;
}

/// What a delegate said, after interpretation.
#[derive(Debug)]
pub enum DelegateAnswer {
    Answer(String),
    /// Success status, but no string `answer` field in the body.
    NoAnswer,
    Failed(DelegateError),
}

impl DelegateAnswer {
    /// Success-shaped text, or the transport failure.
    pub fn into_result(self) -> Result<String, DelegateError> {
        match self {
            Self::Answer(text) => Ok(text),
            Self::NoAnswer => Ok(NO_ANSWER.to_string()),
            Self::Failed(e) => Err(e),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    fn from_response(resp: TransportResponse) -> Self {
        if resp.status != 200 {
            return Self::Failed(DelegateError::Status {
                status: resp.status,
                body: resp.body,
            });
        }
        match serde_json::from_str::<Value>(&resp.body) {
            Ok(parsed) => match parsed.get("answer").and_then(Value::as_str) {
                Some(answer) => Self::Answer(answer.to_string()),
                None => Self::NoAnswer,
            },
            Err(_) => Self::NoAnswer,
        }
    }
}

/// Forwards free-text queries to the fixed tutor endpoints.
#[derive(Clone)]
pub struct DelegateClient {
    transport: Arc<dyn DelegateTransport>,
    overrides: HashMap<DelegateTopic, String>,
    max_query_chars: Option<usize>,
    timeout: Duration,
}

impl DelegateClient {
    pub fn new(transport: impl DelegateTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            overrides: HashMap::new(),
            max_query_chars: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound every call, whatever the transport does. A zero duration is
    /// raised to one millisecond so the bound stays finite and usable.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(Duration::from_millis(1));
        self
    }

    /// Send a topic's queries somewhere other than its fixed URL.
    pub fn with_endpoint(mut self, topic: DelegateTopic, url: impl Into<String>) -> Self {
        self.overrides.insert(topic, url.into());
        self
    }

    /// Truncate queries to at most `max` characters before sending.
    pub fn with_max_query_chars(mut self, max: Option<usize>) -> Self {
        self.max_query_chars = max;
        self
    }

    pub fn url(&self, topic: DelegateTopic) -> &str {
        self.overrides
            .get(&topic)
            .map(String::as_str)
            .unwrap_or_else(|| topic.default_url())
    }

    /// Ask a topic's delegate. Never fails; failures are a `Failed` answer.
    pub async fn ask(&self, topic: DelegateTopic, query: &str) -> DelegateAnswer {
        let query = match self.max_query_chars {
            Some(max) => truncate_chars(query, max),
            None => query,
        };
        info!(topic = %topic, query, "forwarding query to delegate");

        let call = self.transport.post_query(self.url(topic), query);
        let answer = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(resp)) => DelegateAnswer::from_response(resp),
            Ok(Err(e)) => DelegateAnswer::Failed(e),
            Err(_) => DelegateAnswer::Failed(DelegateError::Timeout(self.timeout)),
        };
        if let DelegateAnswer::Failed(ref e) = answer {
            warn!(topic = %topic, error = %e, "delegate call failed");
        }
        answer
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
