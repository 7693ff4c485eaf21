use std::fmt;

use serde::{Deserialize, Serialize};

const LEN: usize = 8;

/// Short opaque token tying together all sub-calls of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh id from the first 8 characters of a random UUID.
    pub fn generate() -> Self {
        let mut s = uuid::Uuid::new_v4().simple().to_string();
        s.truncate(LEN);
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_short_and_distinct() {
        let a = CorrelationId::generate();
        let b = CorrelationId::generate();
        assert_eq!(a.as_str().len(), 8);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
