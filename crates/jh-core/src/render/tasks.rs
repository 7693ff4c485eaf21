use serde_json::Value;

use super::format::{duration_of, fenced, kv_table, progress, stamp_of, table, text};

pub(super) fn list(job_id: &str, tasks: &[Value]) -> String {
    if tasks.is_empty() {
        return format!("No tasks found for job {job_id}.");
    }
    let mut lines = vec![
        format!("# Tasks of {job_id}"),
        format!("Found **{}** task(s).", tasks.len()),
        String::new(),
    ];
    for (kind, label) in [("MAP", "Map"), ("REDUCE", "Reduce")] {
        let group: Vec<&Value> = tasks
            .iter()
            .filter(|t| t.get("type").and_then(Value::as_str) == Some(kind))
            .collect();
        if group.is_empty() {
            continue;
        }
        lines.push(format!("## {label} tasks ({})", group.len()));
        lines.push(String::new());
        table(
            &mut lines,
            &["Task id", "State", "Progress", "Elapsed"],
            group.iter().map(|t| {
                vec![
                    format!("`{}`", text(t, "id")),
                    text(t, "state"),
                    progress(t),
                    duration_of(t, "elapsedTime"),
                ]
            }),
        );
        lines.push(String::new());
    }
    lines.join("\n")
}

pub(super) fn detail(task: &Value) -> String {
    let mut lines = vec![format!("# Task {}", text(task, "id")), String::new()];
    kv_table(
        &mut lines,
        &[
            ("Task id", format!("`{}`", text(task, "id"))),
            ("Type", text(task, "type")),
            ("State", text(task, "state")),
            ("Progress", progress(task)),
            ("Started", stamp_of(task, "startTime")),
            ("Finished", stamp_of(task, "finishTime")),
            ("Elapsed", duration_of(task, "elapsedTime")),
            ("Successful attempt", format!("`{}`", text(task, "successfulAttempt"))),
        ],
    );
    lines.join("\n")
}

pub(super) fn attempts(task_id: &str, attempts: &[Value]) -> String {
    if attempts.is_empty() {
        return format!("No attempts found for task {task_id}.");
    }
    let mut lines = vec![
        format!("# Attempts of {task_id}"),
        format!("Found **{}** attempt(s).", attempts.len()),
        String::new(),
    ];
    for attempt in attempts {
        lines.push(format!("## {}", text(attempt, "id")));
        lines.push(String::new());
        let mut rows = vec![
            ("State", text(attempt, "state")),
            ("Type", text(attempt, "type")),
            ("Progress", progress(attempt)),
            ("Container", format!("`{}`", text(attempt, "assignedContainerId"))),
            ("Node", text(attempt, "nodeHttpAddress")),
            ("Rack", text(attempt, "rack")),
            ("Started", stamp_of(attempt, "startTime")),
            ("Finished", stamp_of(attempt, "finishTime")),
            ("Elapsed", duration_of(attempt, "elapsedTime")),
        ];
        if let Some(diag) = diagnostics(attempt) {
            rows.push(("Diagnostics", diag.to_string()));
        }
        kv_table(&mut lines, &rows);
        lines.push(String::new());
    }
    lines.join("\n")
}

pub(super) fn attempt_detail(attempt: &Value) -> String {
    let mut lines = vec![
        "# Task attempt".to_string(),
        format!("**Attempt id**: `{}`", text(attempt, "id")),
        String::new(),
        "## Overview".to_string(),
    ];
    kv_table(
        &mut lines,
        &[
            ("State", text(attempt, "state")),
            ("Type", text(attempt, "type")),
            ("Progress", progress(attempt)),
        ],
    );

    lines.push(String::new());
    lines.push("## Placement".to_string());
    kv_table(
        &mut lines,
        &[
            ("Container", format!("`{}`", text(attempt, "assignedContainerId"))),
            ("Node", text(attempt, "nodeHttpAddress")),
            ("Rack", text(attempt, "rack")),
        ],
    );

    lines.push(String::new());
    lines.push("## Timing".to_string());
    let mut rows = vec![
        ("Started", stamp_of(attempt, "startTime")),
        ("Finished", stamp_of(attempt, "finishTime")),
        ("Elapsed", duration_of(attempt, "elapsedTime")),
    ];
    if attempt.get("type").and_then(Value::as_str) == Some("REDUCE") {
        rows.extend([
            ("Shuffle finished", stamp_of(attempt, "shuffleFinishTime")),
            ("Merge finished", stamp_of(attempt, "mergeFinishTime")),
            ("Shuffle time", duration_of(attempt, "elapsedShuffleTime")),
            ("Merge time", duration_of(attempt, "elapsedMergeTime")),
            ("Reduce time", duration_of(attempt, "elapsedReduceTime")),
        ]);
    }
    kv_table(&mut lines, &rows);

    if let Some(diag) = diagnostics(attempt) {
        lines.push(String::new());
        lines.push("## Diagnostics".to_string());
        fenced(&mut lines, diag);
    }
    lines.join("\n")
}

fn diagnostics(obj: &Value) -> Option<&str> {
    obj.get("diagnostics")
        .and_then(Value::as_str)
        .filter(|d| !d.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_list_splits_map_and_reduce() {
        let tasks = [
            json!({"id": "task_m_0", "type": "MAP", "state": "SUCCEEDED", "progress": 100.0, "elapsedTime": 5_000}),
            json!({"id": "task_r_0", "type": "REDUCE", "state": "FAILED", "progress": 33.333}),
            json!({"id": "task_m_1", "type": "MAP", "state": "SUCCEEDED", "progress": 100.0}),
        ];
        let out = list("job_1", &tasks);
        assert!(out.contains("## Map tasks (2)"));
        assert!(out.contains("## Reduce tasks (1)"));
        assert!(out.contains("| `task_m_0` | SUCCEEDED | 100.0% | 5s |"));
        assert!(out.contains("| `task_r_0` | FAILED | 33.3% | N/A |"));
        assert!(out.find("task_m_1").unwrap() < out.find("Reduce tasks").unwrap());
    }

    #[test]
    fn empty_task_list_is_a_sentence() {
        assert_eq!(list("job_1", &[]), "No tasks found for job job_1.");
    }

    #[test]
    fn reduce_attempts_show_phase_times() {
        let attempt = json!({
            "id": "attempt_r_0_0", "type": "REDUCE", "state": "SUCCEEDED",
            "elapsedShuffleTime": 2_000, "elapsedMergeTime": 1_000
        });
        let out = attempt_detail(&attempt);
        assert!(out.contains("| Shuffle time | 2s |"));
        assert!(out.contains("| Merge time | 1s |"));

        let map = attempt_detail(&json!({"id": "attempt_m_0_0", "type": "MAP"}));
        assert!(!map.contains("Shuffle"));
    }

    #[test]
    fn attempt_list_includes_diagnostics() {
        let out = attempts(
            "task_1",
            &[json!({"id": "a_0", "state": "FAILED", "diagnostics": "Error: OOM\nat x"})],
        );
        assert!(out.contains("| Diagnostics | Error: OOM at x |"));
        assert_eq!(attempts("task_1", &[]), "No attempts found for task task_1.");
    }
}
