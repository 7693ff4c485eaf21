use serde_json::Value;

use super::format::{NA, duration_of, fenced, int, kv_table, stamp_of, table, text};

pub(super) fn info(info: &Value, base_url: &str) -> String {
    let mut lines = vec!["# JobHistory Server".to_string(), String::new()];
    kv_table(
        &mut lines,
        &[
            ("Started on", stamp_of(info, "startedOn")),
            ("Hadoop version", text(info, "hadoopVersion")),
            ("Build version", text(info, "hadoopBuildVersion")),
            ("Built on", text(info, "hadoopVersionBuiltOn")),
            ("Service URL", base_url.to_string()),
        ],
    );
    lines.join("\n")
}

pub(super) fn list(jobs: &[Value]) -> String {
    if jobs.is_empty() {
        return "No jobs matched the given filters.".to_string();
    }
    let mut lines = vec![
        "# MapReduce jobs".to_string(),
        format!("Found **{}** job(s).", jobs.len()),
        String::new(),
    ];
    for job in jobs {
        lines.push(format!("## {} `{}`", text(job, "name"), text(job, "id")));
        lines.push(String::new());
        kv_table(
            &mut lines,
            &[
                ("User", text(job, "user")),
                ("Queue", text(job, "queue")),
                ("State", text(job, "state")),
                ("Started", stamp_of(job, "startTime")),
                ("Finished", stamp_of(job, "finishTime")),
                ("Maps", ratio(job, "mapsCompleted", "mapsTotal")),
                ("Reduces", ratio(job, "reducesCompleted", "reducesTotal")),
            ],
        );
        lines.push(String::new());
    }
    lines.join("\n")
}

pub(super) fn detail(job: &Value) -> String {
    let uber = if job.get("uberized").and_then(Value::as_bool).unwrap_or(false) {
        "yes"
    } else {
        "no"
    };
    let mut lines = vec![format!("# Job {}", text(job, "name")), String::new()];

    lines.push("## Overview".to_string());
    kv_table(
        &mut lines,
        &[
            ("Job id", format!("`{}`", text(job, "id"))),
            ("Name", text(job, "name")),
            ("User", text(job, "user")),
            ("Queue", text(job, "queue")),
            ("State", text(job, "state")),
            ("Uber mode", uber.to_string()),
        ],
    );

    lines.push(String::new());
    lines.push("## Timing".to_string());
    kv_table(
        &mut lines,
        &[
            ("Submitted", stamp_of(job, "submitTime")),
            ("Started", stamp_of(job, "startTime")),
            ("Finished", stamp_of(job, "finishTime")),
        ],
    );

    lines.push(String::new());
    lines.push("## Tasks".to_string());
    table(
        &mut lines,
        &["Type", "Completed/Total", "Succeeded", "Failed", "Killed"],
        [("Map", "map", "Map"), ("Reduce", "reduce", "Reduce")].map(|(label, lower, upper)| {
            vec![
                label.to_string(),
                ratio(job, &format!("{lower}sCompleted"), &format!("{lower}sTotal")),
                int(job, &format!("successful{upper}Attempts")).to_string(),
                int(job, &format!("failed{upper}Attempts")).to_string(),
                int(job, &format!("killed{upper}Attempts")).to_string(),
            ]
        }),
    );

    lines.push(String::new());
    lines.push("## Average phase times".to_string());
    table(
        &mut lines,
        &["Phase", "Average"],
        [
            ("Map", "avgMapTime"),
            ("Reduce", "avgReduceTime"),
            ("Shuffle", "avgShuffleTime"),
            ("Merge", "avgMergeTime"),
        ]
        .map(|(phase, key)| vec![phase.to_string(), duration_of(job, key)]),
    );

    if let Some(diag) = job.get("diagnostics").and_then(Value::as_str).filter(|d| !d.is_empty()) {
        lines.push(String::new());
        lines.push("## Diagnostics".to_string());
        fenced(&mut lines, diag);
    }

    let acls = job.get("acls").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
    if !acls.is_empty() {
        lines.push(String::new());
        lines.push("## ACLs".to_string());
        table(
            &mut lines,
            &["Name", "Value"],
            acls.iter().map(|a| vec![text(a, "name"), text(a, "value")]),
        );
    }
    lines.join("\n")
}

pub(super) fn attempts(job_id: &str, attempts: &[Value]) -> String {
    if attempts.is_empty() {
        return format!("No ApplicationMaster attempts found for job {job_id}.");
    }
    let mut lines = vec![
        format!("# ApplicationMaster attempts of {job_id}"),
        format!("Found **{}** attempt(s).", attempts.len()),
        String::new(),
    ];
    for attempt in attempts {
        lines.push(format!("## Attempt #{}", text(attempt, "id")));
        lines.push(String::new());
        let mut rows = vec![
            ("Container", format!("`{}`", text(attempt, "containerId"))),
            ("Node id", text(attempt, "nodeId")),
            ("Node HTTP address", text(attempt, "nodeHttpAddress")),
            ("Started", stamp_of(attempt, "startTime")),
        ];
        let logs = text(attempt, "logsLink");
        if logs != NA {
            rows.push(("Logs", format!("[view]({logs})")));
        }
        kv_table(&mut lines, &rows);
        lines.push(String::new());
    }
    lines.join("\n")
}

fn ratio(obj: &Value, done: &str, total: &str) -> String {
    format!("{}/{}", int(obj, done), int(obj, total))
}
