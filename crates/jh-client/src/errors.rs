use thiserror::Error;

/// Classified failure of a single HTTP call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("permission denied: {url}")]
    PermissionDenied { url: String },

    #[error("request to {target} timed out after {elapsed_ms}ms (limit {timeout_ms}ms)")]
    Timeout {
        target: String,
        elapsed_ms: u64,
        timeout_ms: u64,
    },

    #[error("failed to connect to {host}: {reason}")]
    ConnectFailure { host: String, reason: String },

    #[error("http status {status}")]
    HttpError { status: u16 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("http request failed: {0}")]
    Transport(String),
}

impl ClientError {
    /// Short stable label, used for log fields and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::NotFound { .. } => "not_found",
            ClientError::PermissionDenied { .. } => "permission_denied",
            ClientError::Timeout { .. } => "timeout",
            ClientError::ConnectFailure { .. } => "connect_failure",
            ClientError::HttpError { .. } => "http_error",
            ClientError::InvalidResponse(_) => "invalid_response",
            ClientError::InvalidUrl(_) => "invalid_url",
            ClientError::InvalidConfig(_) => "invalid_config",
            ClientError::Transport(_) => "transport",
        }
    }
}
