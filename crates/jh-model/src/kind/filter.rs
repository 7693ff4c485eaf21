use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Lifecycle state of a MapReduce job, as accepted by the job list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    New,
    Inited,
    Running,
    Succeeded,
    Failed,
    KillWait,
    Killed,
    Error,
}

impl JobState {
    pub const ALL: [JobState; 8] = [
        JobState::New,
        JobState::Inited,
        JobState::Running,
        JobState::Succeeded,
        JobState::Failed,
        JobState::KillWait,
        JobState::Killed,
        JobState::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::New => "NEW",
            JobState::Inited => "INITED",
            JobState::Running => "RUNNING",
            JobState::Succeeded => "SUCCEEDED",
            JobState::Failed => "FAILED",
            JobState::KillWait => "KILL_WAIT",
            JobState::Killed => "KILLED",
            JobState::Error => "ERROR",
        }
    }
}

impl FromStr for JobState {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim();
        JobState::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(norm))
            .ok_or_else(|| ModelError::UnknownJobState(s.to_string()))
    }
}

/// Task type filter: map (`m`) or reduce (`r`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "m")]
    Map,
    #[serde(rename = "r")]
    Reduce,
}

impl TaskType {
    pub const ALL: [TaskType; 2] = [TaskType::Map, TaskType::Reduce];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Map => "m",
            TaskType::Reduce => "r",
        }
    }
}

impl FromStr for TaskType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "map" => Ok(TaskType::Map),
            "r" | "reduce" => Ok(TaskType::Reduce),
            _ => Err(ModelError::UnknownTaskType(s.to_string())),
        }
    }
}
