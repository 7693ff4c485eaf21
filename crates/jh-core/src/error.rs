use jh_client::ClientError;
use jh_model::ModelError;
use thiserror::Error;

/// Failure of one tool invocation.
///
/// Never surfaces raw: [`ToolError::describe`] turns it into the text handed back to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("missing {field} in metadata response")]
    Incomplete { field: &'static str, hint: &'static str },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<ModelError> for ToolError {
    fn from(e: ModelError) -> Self {
        ToolError::InvalidRequest(e.to_string())
    }
}

impl ToolError {
    /// Short stable label, used for log fields and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::InvalidRequest(_) => "invalid_request",
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::Incomplete { .. } => "incomplete",
            ToolError::Client(e) => e.kind(),
        }
    }

    /// Human-readable message returned to the calling agent.
    pub fn describe(&self) -> String {
        match self {
            ToolError::InvalidRequest(msg) => format!("Error: invalid request: {msg}."),
            ToolError::UnknownTool(name) => format!("Error: unknown tool '{name}'."),
            ToolError::Incomplete { field, hint } => {
                format!("Error: could not obtain {field} from the history server. {hint}")
            }
            ToolError::Client(e) => describe_client(e),
        }
    }
}

fn describe_client(e: &ClientError) -> String {
    match e {
        ClientError::NotFound { .. } => "Error: resource not found. Check that the identifier is \
             correct; the job or task may have been purged after the retention window."
            .to_string(),
        ClientError::PermissionDenied { .. } => {
            "Error: insufficient permission to access this resource.".to_string()
        }
        ClientError::Timeout {
            target,
            elapsed_ms,
            timeout_ms,
        } => format!(
            "Error: request timed out after {elapsed_ms}ms (limit {timeout_ms}ms, {target}). \
             Check network connectivity or increase REQUEST_TIMEOUT."
        ),
        ClientError::ConnectFailure { host, .. } => format!(
            "Error: unable to connect to {host}. Check that the service is running and that \
             the address and port are correct."
        ),
        ClientError::HttpError { status } => match status {
            401 => "Error: authentication failed (HTTP 401). If security is enabled, check the \
                    authentication settings."
                .to_string(),
            500 => "Error: internal server error (HTTP 500). Check the JobHistory server logs."
                .to_string(),
            503 => "Error: service temporarily unavailable (HTTP 503). The JobHistory server may \
                    be starting or overloaded."
                .to_string(),
            other => format!("Error: API request failed with HTTP status {other}."),
        },
        ClientError::InvalidResponse(msg) => format!("Error: unexpected response: {msg}"),
        ClientError::InvalidUrl(msg) => format!("Error: invalid URL: {msg}"),
        ClientError::InvalidConfig(msg) => format!("Error: invalid configuration: {msg}"),
        ClientError::Transport(msg) => format!("Error: request failed: {msg}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_points_at_identifier() {
        let e = ToolError::from(ClientError::NotFound {
            url: "http://h/x".to_string(),
        });
        assert_eq!(e.kind(), "not_found");
        assert!(e.describe().starts_with("Error: resource not found"));
        assert!(e.describe().contains("identifier"));
    }

    #[test]
    fn timeout_and_connect_report_context() {
        let e = ToolError::from(ClientError::Timeout {
            target: "http://h/slow".to_string(),
            elapsed_ms: 30_001,
            timeout_ms: 30_000,
        });
        assert!(e.describe().contains("30001ms"));
        assert!(e.describe().contains("limit 30000ms"));

        let e = ToolError::from(ClientError::ConnectFailure {
            host: "node01:8052".to_string(),
            reason: "refused".to_string(),
        });
        assert!(e.describe().contains("node01:8052"));
    }

    #[test]
    fn http_status_hints() {
        let d = |status| ToolError::from(ClientError::HttpError { status }).describe();
        assert!(d(401).contains("authentication"));
        assert!(d(503).contains("unavailable"));
        assert!(d(418).contains("418"));
        assert!(
            ToolError::from(ClientError::PermissionDenied { url: String::new() })
                .describe()
                .contains("permission")
        );
    }

    #[test]
    fn model_errors_become_invalid_requests() {
        let e = ToolError::from(ModelError::UnknownFormat("xml".to_string()));
        assert_eq!(e.kind(), "invalid_request");
        assert!(e.describe().contains("xml"));
    }
}
