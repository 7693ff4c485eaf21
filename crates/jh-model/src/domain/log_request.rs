use serde::{Deserialize, Serialize};

use crate::{AttemptRef, LogRange, LogType};

/// A single request for one log stream of one task attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRequest {
    pub attempt: AttemptRef,
    pub log_type: LogType,
    pub range: LogRange,
}

impl LogRequest {
    /// Request the whole file.
    pub fn full(attempt: AttemptRef, log_type: LogType) -> Self {
        Self {
            attempt,
            log_type,
            range: LogRange::Full,
        }
    }

    pub fn partial(attempt: AttemptRef, log_type: LogType, range: LogRange) -> Self {
        Self {
            attempt,
            log_type,
            range,
        }
    }
}
