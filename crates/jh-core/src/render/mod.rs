//! Tool result rendering.
//!
//! Markdown is meant for reading; JSON is the unwrapped history-server payload, with lists
//! reshaped to `{ "total": n, "<items>": [...] }`.

mod conf;
mod counters;
pub mod format;
mod jobs;
mod logs;
mod tasks;

pub use format::init_local_offset;
pub use logs::retrieval;

use jh_model::ResponseFormat;
use serde_json::{Value, json};

use crate::{Args, Operation};

/// Render the metadata response of a pass-through operation.
///
/// `base_url` is the metadata base the response came from.
pub fn operation(op: Operation, body: &Value, args: &Args, base_url: &str) -> String {
    match args.format() {
        ResponseFormat::Json => pretty(&payload(op, body, args)),
        ResponseFormat::Markdown => markdown(op, body, args, base_url),
    }
}

/// Pretty-printed JSON.
pub fn pretty(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

fn payload(op: Operation, body: &Value, args: &Args) -> Value {
    match op {
        Operation::Info => field(body, "historyInfo").clone(),
        Operation::ListJobs => listing("jobs", items(body, "jobs", "job")),
        Operation::GetJob => field(body, "job").clone(),
        Operation::GetJobCounters => field(body, "jobCounters").clone(),
        Operation::GetJobConf => conf::payload(field(body, "conf"), args.str("filter_key")),
        Operation::GetJobAttempts => listing("attempts", items(body, "jobAttempts", "jobAttempt")),
        Operation::ListTasks => listing("tasks", items(body, "tasks", "task")),
        Operation::GetTask => field(body, "task").clone(),
        Operation::GetTaskCounters => field(body, "jobTaskCounters").clone(),
        Operation::ListTaskAttempts => {
            listing("attempts", items(body, "taskAttempts", "taskAttempt"))
        }
        Operation::GetTaskAttempt => field(body, "taskAttempt").clone(),
        Operation::GetTaskAttemptCounters => field(body, "jobTaskAttemptCounters").clone(),
        Operation::GetTaskAttemptLogs | Operation::GetTaskAttemptLogsPartial => body.clone(),
    }
}

fn markdown(op: Operation, body: &Value, args: &Args, base_url: &str) -> String {
    let id = |name: &str| args.str(name).unwrap_or_default().to_string();
    match op {
        Operation::Info => jobs::info(field(body, "historyInfo"), base_url),
        Operation::ListJobs => jobs::list(items(body, "jobs", "job")),
        Operation::GetJob => jobs::detail(field(body, "job")),
        Operation::GetJobCounters => {
            let counters = field(body, "jobCounters");
            counters::markdown(&format!("Job counters: {}", own_id(counters, id("job_id"))), counters)
        }
        Operation::GetJobConf => conf::markdown(&id("job_id"), field(body, "conf"), args.str("filter_key")),
        Operation::GetJobAttempts => {
            jobs::attempts(&id("job_id"), items(body, "jobAttempts", "jobAttempt"))
        }
        Operation::ListTasks => tasks::list(&id("job_id"), items(body, "tasks", "task")),
        Operation::GetTask => tasks::detail(field(body, "task")),
        Operation::GetTaskCounters => {
            let counters = field(body, "jobTaskCounters");
            counters::markdown(&format!("Task counters: {}", own_id(counters, id("task_id"))), counters)
        }
        Operation::ListTaskAttempts => {
            tasks::attempts(&id("task_id"), items(body, "taskAttempts", "taskAttempt"))
        }
        Operation::GetTaskAttempt => tasks::attempt_detail(field(body, "taskAttempt")),
        Operation::GetTaskAttemptCounters => {
            let counters = field(body, "jobTaskAttemptCounters");
            counters::markdown(
                &format!("Task attempt counters: {}", own_id(counters, id("attempt_id"))),
                counters,
            )
        }
        Operation::GetTaskAttemptLogs | Operation::GetTaskAttemptLogsPartial => pretty(body),
    }
}

fn field<'a>(body: &'a Value, key: &str) -> &'a Value {
    body.get(key).unwrap_or(&Value::Null)
}

/// `body[outer][inner]` as a list.
///
/// Empty results come back as `null` or `{}`; a lone object counts as a one-item list.
fn items<'a>(body: &'a Value, outer: &str, inner: &str) -> &'a [Value] {
    match body.get(outer).and_then(|o| o.get(inner)) {
        Some(Value::Array(list)) => list,
        Some(obj @ Value::Object(_)) => std::slice::from_ref(obj),
        _ => &[],
    }
}

fn listing(key: &str, items: &[Value]) -> Value {
    let mut out = json!({ "total": items.len() });
    out[key] = Value::Array(items.to_vec());
    out
}

fn own_id(obj: &Value, fallback: String) -> String {
    obj.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(op: Operation, raw: Value) -> Args {
        Args::parse(op.descriptor(), &raw).unwrap()
    }

    #[test]
    fn json_lists_are_reshaped() {
        let body = json!({"jobs": {"job": [{"id": "job_1"}, {"id": "job_2"}]}});
        let a = args(Operation::ListJobs, json!({"response_format": "json"}));
        let v: Value = serde_json::from_str(&operation(Operation::ListJobs, &body, &a, "")).unwrap();
        assert_eq!(v["total"], 2);
        assert_eq!(v["jobs"][1]["id"], "job_2");
    }

    #[test]
    fn empty_lists_tolerate_null_and_single_objects() {
        assert!(items(&json!({"jobs": null}), "jobs", "job").is_empty());
        assert!(items(&json!({"jobs": {}}), "jobs", "job").is_empty());
        assert_eq!(items(&json!({"tasks": {"task": {"id": "t"}}}), "tasks", "task").len(), 1);
    }

    #[test]
    fn json_details_are_unwrapped() {
        let body = json!({"job": {"id": "job_1", "user": "alice"}});
        let a = args(Operation::GetJob, json!({"job_id": "job_1", "response_format": "json"}));
        let v: Value = serde_json::from_str(&operation(Operation::GetJob, &body, &a, "")).unwrap();
        assert_eq!(v, json!({"id": "job_1", "user": "alice"}));
    }

    #[test]
    fn counters_title_prefers_payload_id() {
        let body = json!({"jobTaskCounters": {"id": "task_9", "taskCounterGroup": []}});
        let a = args(Operation::GetTaskCounters, json!({"job_id": "j", "task_id": "task_x"}));
        let out = operation(Operation::GetTaskCounters, &body, &a, "");
        assert!(out.starts_with("# Task counters: task_9"));
    }

    #[test]
    fn info_mentions_service_url() {
        let body = json!({"historyInfo": {"hadoopVersion": "3.3.6", "startedOn": 0}});
        let a = args(Operation::Info, Value::Null);
        let out = operation(Operation::Info, &body, &a, "http://jhs:19888/ws/v1/history");
        assert!(out.contains("| Hadoop version | 3.3.6 |"));
        assert!(out.contains("| Started on | N/A |"));
        assert!(out.contains("http://jhs:19888/ws/v1/history"));
    }
}
