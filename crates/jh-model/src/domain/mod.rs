mod attempt;
pub use attempt::AttemptRef;

mod location;
pub use location::ResolvedLocation;

mod log_request;
pub use log_request::LogRequest;

mod log_result;
pub use log_result::LogResult;

mod correlation;
pub use correlation::CorrelationId;

/// Port the log server listens on.
///
/// Configured externally; never derived from the node's HTTP address.
pub type LogPort = u16;

/// Duration value in milliseconds.
pub type DurationMs = u64;
