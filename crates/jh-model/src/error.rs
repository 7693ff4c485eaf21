use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown log type: {0} (expected one of: {1})")]
    UnknownLogType(String, &'static str),

    #[error("unknown response format: {0} (expected: markdown|json)")]
    UnknownFormat(String),

    #[error("unknown job state: {0}")]
    UnknownJobState(String),

    #[error("unknown task type: {0} (expected: m|r)")]
    UnknownTaskType(String),
}
