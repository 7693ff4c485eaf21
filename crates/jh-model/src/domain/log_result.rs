use serde::{Deserialize, Serialize};

use crate::DurationMs;

/// Extracted log text of one retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogResult {
    pub raw_text: String,
    /// Length of `raw_text` in bytes.
    pub byte_length: usize,
    pub fetch_duration_ms: DurationMs,
}

impl LogResult {
    pub fn new(raw_text: String, fetch_duration_ms: DurationMs) -> Self {
        Self {
            byte_length: raw_text.len(),
            raw_text,
            fetch_duration_ms,
        }
    }

    /// An empty extraction is a valid result: the container produced no output of that type.
    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_length_counts_bytes_not_chars() {
        let r = LogResult::new("日志".to_string(), 5);
        assert_eq!(r.byte_length, 6);
        assert!(!r.is_empty());
        assert!(LogResult::new(String::new(), 0).is_empty());
    }
}
