/// Why a tool call did not produce a normal result.
///
/// Never crosses the Caller boundary as a value: the dispatcher renders it
/// into an `Error: ...` string.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid zone '{0}', expected one of living_room, bedroom, kitchen, bathroom, office")]
    InvalidZone(String),
    #[error("missing parameter '{0}'")]
    MissingParameter(String),
    #[error("parameter '{name}' must be {expected}, got {got}")]
    TypeCoercion {
        name: String,
        expected: &'static str,
        got: String,
    },
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Delegate(#[from] DelegateError),
    #[error("{0}")]
    Handler(String),
}

impl ToolError {
    /// True for failures detected before any handler ran.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidZone(_)
                | Self::MissingParameter(_)
                | Self::TypeCoercion { .. }
                | Self::UnknownTool(_)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    /// Non-200 reply. The dispatcher renders it as `Error: {status} - {body}`.
    #[error("{status} - {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
}
