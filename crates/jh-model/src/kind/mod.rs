mod log_type;
pub use log_type::LogType;

mod log_range;
pub use log_range::{DEFAULT_TAIL_BYTES, FULL_READ_END_TIME, LogRange};

mod response_format;
pub use response_format::ResponseFormat;

mod filter;
pub use filter::{JobState, TaskType};
