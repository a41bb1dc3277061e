use std::sync::Arc;

use async_trait::async_trait;

use super::spec::{Args, ToolSpec};
use crate::error::ToolError;

/// A tool's execution handler. Receives arguments already validated
/// against the tool's `ToolSpec`.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: &Args) -> Result<String, ToolError>;
}

/// A registered tool: spec for the reasoning layer + handler for execution.
#[derive(Clone)]
pub struct ToolDef {
    pub spec: ToolSpec,
    pub(crate) handler: Arc<dyn ToolHandler>,
}

impl ToolDef {
    pub fn name(&self) -> &str {
        &self.spec.name
    }
}
