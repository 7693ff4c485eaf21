use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one concrete execution attempt of a task within a job.
///
/// All three identifiers are opaque, externally assigned strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptRef {
    pub job_id: String,
    pub task_id: String,
    pub attempt_id: String,
}

impl AttemptRef {
    pub fn new(
        job_id: impl Into<String>,
        task_id: impl Into<String>,
        attempt_id: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            task_id: task_id.into(),
            attempt_id: attempt_id.into(),
        }
    }

    /// Metadata endpoint (relative to the history base) describing the attempt.
    pub fn attempt_endpoint(&self) -> String {
        format!(
            "mapreduce/jobs/{}/tasks/{}/attempts/{}",
            self.job_id, self.task_id, self.attempt_id
        )
    }

    /// Metadata endpoint (relative to the history base) describing the parent job.
    pub fn job_endpoint(&self) -> String {
        format!("mapreduce/jobs/{}", self.job_id)
    }
}

impl fmt::Display for AttemptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.job_id, self.task_id, self.attempt_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_follow_history_layout() {
        let r = AttemptRef::new("job_1_2", "task_1_2_m_0", "attempt_1_2_m_0_0");
        assert_eq!(
            r.attempt_endpoint(),
            "mapreduce/jobs/job_1_2/tasks/task_1_2_m_0/attempts/attempt_1_2_m_0_0"
        );
        assert_eq!(r.job_endpoint(), "mapreduce/jobs/job_1_2");
    }
}
