//! Closed set of tool operations.
//!
//! Each [`Operation`] maps to a static [`OperationDescriptor`]: tool name, endpoint template and
//! parameter list. One executor consumes the descriptors instead of one handler per tool.

mod args;
pub use args::{ArgValue, Args, summarize};

mod catalog;

use std::fmt;

/// Every tool the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Info,
    ListJobs,
    GetJob,
    GetJobCounters,
    GetJobConf,
    GetJobAttempts,
    ListTasks,
    GetTask,
    GetTaskCounters,
    ListTaskAttempts,
    GetTaskAttempt,
    GetTaskAttemptCounters,
    GetTaskAttemptLogs,
    GetTaskAttemptLogsPartial,
}

impl Operation {
    pub const ALL: [Operation; 14] = [
        Operation::Info,
        Operation::ListJobs,
        Operation::GetJob,
        Operation::GetJobCounters,
        Operation::GetJobConf,
        Operation::GetJobAttempts,
        Operation::ListTasks,
        Operation::GetTask,
        Operation::GetTaskCounters,
        Operation::ListTaskAttempts,
        Operation::GetTaskAttempt,
        Operation::GetTaskAttemptCounters,
        Operation::GetTaskAttemptLogs,
        Operation::GetTaskAttemptLogsPartial,
    ];

    pub fn descriptor(self) -> &'static OperationDescriptor {
        catalog::descriptor(self)
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Operation::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Whether the operation runs the log pipeline instead of a single metadata call.
    pub fn is_log_retrieval(self) -> bool {
        matches!(
            self,
            Operation::GetTaskAttemptLogs | Operation::GetTaskAttemptLogsPartial
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one tool.
#[derive(Debug)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Metadata endpoint relative to the history base, with `{param}` placeholders.
    ///
    /// `None` for operations served by the log pipeline.
    pub endpoint: Option<&'static str>,
    pub params: &'static [ParamSpec],
}

impl OperationDescriptor {
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Where a parameter ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into the endpoint template.
    Path,
    /// Sent as a query parameter under the given wire name.
    Query(&'static str),
    /// Consumed locally (formatting, filtering, log request).
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Opaque identifier safe to place in a URL path.
    Id,
    /// Free text.
    Text,
    Integer { min: Option<i64>, max: Option<i64> },
    /// One of a fixed set of values (matched case-insensitively).
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Int(i64),
    Str(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub location: ParamLocation,
    pub required: bool,
    pub default: Option<ParamDefault>,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
            assert!(op.name().starts_with("jobhistory_"));
        }
        let mut names: Vec<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Operation::ALL.len());
        assert_eq!(Operation::from_name("jobhistory_nope"), None);
    }

    #[test]
    fn path_params_match_endpoint_placeholders() {
        for op in Operation::ALL {
            let desc = op.descriptor();
            let Some(endpoint) = desc.endpoint else {
                assert!(op.is_log_retrieval());
                continue;
            };
            for p in desc.params {
                let placeholder = format!("{{{}}}", p.name);
                assert_eq!(
                    endpoint.contains(&placeholder),
                    p.location == ParamLocation::Path,
                    "{}: {}",
                    desc.name,
                    p.name
                );
                if p.location == ParamLocation::Path {
                    assert!(p.required);
                }
            }
        }
    }

    #[test]
    fn every_operation_accepts_response_format() {
        for op in Operation::ALL {
            assert!(op.descriptor().param("response_format").is_some(), "{op}");
        }
    }
}
