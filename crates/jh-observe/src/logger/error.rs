use thiserror::Error;

/// Failure to set up logging; reported once at start-up.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format '{0}' (expected text, json or journald)")]
    InvalidFormat(String),

    #[error("journald output needs Linux and the `journald` feature")]
    JournaldNotSupported,

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("tracing subscriber setup failed: {0}")]
    InitializationFailed(String),

    #[error("invalid log filter '{directive}': {reason}")]
    InvalidLogLevel { directive: String, reason: String },
}
