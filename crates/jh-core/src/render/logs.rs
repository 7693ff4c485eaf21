use jh_model::{LogRange, LogRequest, ResponseFormat};
use serde_json::{Value, json};

use super::format::{bytes, fenced, kv_table};
use crate::LogRetrieval;

/// Result text of a log retrieval.
///
/// An empty log is reported with its URL so the caller can check it by hand.
pub fn retrieval(request: &LogRequest, got: &LogRetrieval, format: ResponseFormat) -> String {
    if got.result.is_empty() {
        return format!(
            "The log is empty or its content could not be parsed.\n\n**Log URL**: {}",
            got.url
        );
    }
    match format {
        ResponseFormat::Json => super::pretty(&payload(request, got)),
        ResponseFormat::Markdown => markdown(request, got),
    }
}

fn payload(request: &LogRequest, got: &LogRetrieval) -> Value {
    let attempt = &request.attempt;
    let mut out = json!({
        "job_id": attempt.job_id,
        "task_id": attempt.task_id,
        "attempt_id": attempt.attempt_id,
        "container_id": got.location.container_id,
        "node_manager": got.log_server,
        "user": got.location.owning_user,
        "log_type": request.log_type.as_str(),
        "log_url": got.url,
        "content_length": got.result.byte_length,
        "fetch_duration_ms": got.result.fetch_duration_ms,
        "content": got.result.raw_text,
    });
    if let Some((start, end)) = byte_window(&request.range) {
        out["byte_range"] = json!({
            "start": start,
            "end": end,
            "description": request.range.describe(),
        });
    }
    out
}

fn markdown(request: &LogRequest, got: &LogRetrieval) -> String {
    let attempt = &request.attempt;
    let partial = !request.range.is_full();
    let title = if partial {
        format!("# Task attempt log (partial): {}", request.log_type)
    } else {
        format!("# Task attempt log: {}", request.log_type)
    };

    let mut rows = vec![
        ("Job id", format!("`{}`", attempt.job_id)),
        ("Task id", format!("`{}`", attempt.task_id)),
        ("Attempt id", format!("`{}`", attempt.attempt_id)),
        ("Container", format!("`{}`", got.location.container_id)),
        ("Node", got.log_server.clone()),
        ("User", got.location.owning_user.clone()),
        ("Log type", request.log_type.to_string()),
        ("Log URL", got.url.clone()),
    ];
    if partial {
        rows.push(("Range", request.range.describe()));
    }
    rows.push((
        "Length",
        format!("{} bytes ({})", got.result.byte_length, bytes(got.result.byte_length as u64)),
    ));
    rows.push(("Fetch time", format!("{} ms", got.result.fetch_duration_ms)));

    let mut lines = vec![title, String::new(), "## Details".to_string()];
    kv_table(&mut lines, &rows);
    lines.push(String::new());
    lines.push("## Content".to_string());
    fenced(&mut lines, &got.result.raw_text);
    if partial {
        lines.push(String::new());
        lines.push("*Use `jobhistory_get_task_attempt_logs` to read the whole file.*".to_string());
    }
    lines.join("\n")
}

/// Signed `start`/`end` pair as the caller expressed it; `None` for full reads.
fn byte_window(range: &LogRange) -> Option<(i64, i64)> {
    match *range {
        LogRange::Full => None,
        LogRange::FromEnd { length } => {
            Some((i64::try_from(length).map_or(i64::MIN, |l| -l), 0))
        }
        LogRange::FromStart { offset, end } => {
            Some((i64::try_from(offset).unwrap_or(i64::MAX), end.unwrap_or(0)))
        }
    }
}
