use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::tools::{ToolRegistry, ToolSpec};

/// How a call ended. Internal bookkeeping; the Caller only sees the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The handler ran and returned normally.
    Completed,
    /// Unknown tool or bad arguments; no handler ran.
    Rejected,
    /// The handler ran and failed (e.g. the delegate was unreachable).
    Failed,
}

/// Result of one dispatched call.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub text: String,
    pub disposition: Disposition,
}

impl ToolOutcome {
    fn completed(text: String) -> Self {
        Self {
            text,
            disposition: Disposition::Completed,
        }
    }

    fn from_error(err: &ToolError) -> Self {
        let disposition = if err.is_rejection() {
            Disposition::Rejected
        } else {
            Disposition::Failed
        };
        Self {
            text: format!("Error: {err}"),
            disposition,
        }
    }

    pub fn is_error(&self) -> bool {
        self.disposition != Disposition::Completed
    }
}

/// Validates calls against the registry and runs handlers.
///
/// Every path ends in a `ToolOutcome`; nothing a handler does can escape
/// as a fault. Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Run a tool by name and return the text for the Caller.
    pub async fn invoke(&self, name: &str, input: &Value) -> String {
        self.dispatch(name, input).await.text
    }

    /// Run a tool by name, keeping the disposition.
    pub async fn dispatch(&self, name: &str, input: &Value) -> ToolOutcome {
        debug!(tool = name, "validating call");

        let (def, args) = match self
            .registry
            .get(name)
            .and_then(|def| Ok((def, def.spec.coerce(input)?)))
        {
            Ok(found) => found,
            Err(e) => {
                warn!(tool = name, error = %e, "call rejected");
                return ToolOutcome::from_error(&e);
            }
        };

        info!(tool = name, args = ?args, "invoking tool");

        // The handler runs on its own task so a panic inside it surfaces as
        // a JoinError here, and the call finishes even if the Caller stops
        // waiting.
        let handler = def.handler.clone();
        let joined = tokio::spawn(async move { handler.call(&args).await }).await;

        let result = joined
            .unwrap_or_else(|e| Err(ToolError::Handler(format!("tool crashed: {e}"))));
        match result {
            Ok(text) => {
                info!(tool = name, "tool completed");
                ToolOutcome::completed(text)
            }
            Err(e) => {
                warn!(tool = name, error = %e, "tool failed");
                ToolOutcome::from_error(&e)
            }
        }
    }

    pub fn catalog(&self) -> Vec<ToolSpec> {
        self.registry.catalog()
    }

    pub fn schemas(&self) -> Vec<Value> {
        self.registry.schemas()
    }

    /// Search the registry for tools matching a query.
    pub fn search(&self, query: &str) -> Vec<Value> {
        self.registry.search(query)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}
