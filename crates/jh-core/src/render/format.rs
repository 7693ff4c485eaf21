//! Value formatting shared by the markdown renderers.

use std::sync::LazyLock;

use serde_json::Value;
use time::{OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description};

pub const NA: &str = "N/A";

const STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

// `time` only reads the local offset while the process is single-threaded.
static LOCAL_OFFSET: LazyLock<UtcOffset> =
    LazyLock::new(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));

/// Resolve the local UTC offset used by [`timestamp`].
///
/// Call before starting the async runtime; later resolution falls back to UTC.
pub fn init_local_offset() -> UtcOffset {
    *LOCAL_OFFSET
}

/// Epoch milliseconds as local `YYYY-MM-DD HH:MM:SS`; `N/A` for non-positive values.
pub fn timestamp(ms: i64) -> String {
    timestamp_with(ms, *LOCAL_OFFSET)
}

pub fn timestamp_with(ms: i64, offset: UtcOffset) -> String {
    if ms <= 0 {
        return NA.to_string();
    }
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .and_then(|t| t.to_offset(offset).format(STAMP).ok())
        .unwrap_or_else(|| NA.to_string())
}

/// Milliseconds as `1h 2m 3s`, `2m 3s` or `3s`; `N/A` for non-positive values.
pub fn duration(ms: i64) -> String {
    if ms <= 0 {
        return NA.to_string();
    }
    let secs = ms / 1000;
    match secs {
        s if s < 60 => format!("{s}s"),
        s if s < 3600 => format!("{}m {}s", s / 60, s % 60),
        s => format!("{}h {}m {}s", s / 3600, (s % 3600) / 60, s % 60),
    }
}

/// Byte count with binary units, e.g. `1.50 KB`.
pub fn bytes(n: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{n} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Integer with `,` thousands separators.
pub fn grouped(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Cut `s` after `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Field as display text: strings verbatim, numbers and booleans printed, otherwise `N/A`.
pub fn text(obj: &Value, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => NA.to_string(),
    }
}

/// Field as integer; missing or non-numeric values count as `0`.
pub fn int(obj: &Value, key: &str) -> i64 {
    obj.get(key)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0)
}

pub fn progress(obj: &Value) -> String {
    let p = obj.get("progress").and_then(Value::as_f64).unwrap_or(0.0);
    format!("{p:.1}%")
}

pub fn stamp_of(obj: &Value, key: &str) -> String {
    timestamp(int(obj, key))
}

pub fn duration_of(obj: &Value, key: &str) -> String {
    duration(int(obj, key))
}

/// Two-column `| Field | Value |` table.
pub fn kv_table(lines: &mut Vec<String>, rows: &[(&str, String)]) {
    table(
        lines,
        &["Field", "Value"],
        rows.iter().map(|(k, v)| vec![(*k).to_string(), v.clone()]),
    );
}

pub fn table<I>(lines: &mut Vec<String>, headers: &[&str], rows: I)
where
    I: IntoIterator<Item = Vec<String>>,
{
    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!(
        "|{}|",
        headers.iter().map(|h| "-".repeat(h.len() + 2)).collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        let cells: Vec<_> = row.iter().map(|c| cell(c)).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
}

/// Table cells cannot hold pipes or line breaks.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Fenced block. The fence is one backtick longer than any backtick run in the body.
pub fn fenced(lines: &mut Vec<String>, body: &str) {
    let longest = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat((longest + 1).max(3));
    lines.push(fence.clone());
    lines.push(body.to_string());
    lines.push(fence);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamps() {
        assert_eq!(timestamp(0), NA);
        assert_eq!(timestamp(-5), NA);
        assert_eq!(
            timestamp_with(1_326_381_300_833, UtcOffset::UTC),
            "2012-01-12 15:15:00"
        );
        let plus_two = UtcOffset::from_hms(2, 0, 0).unwrap();
        assert_eq!(timestamp_with(1_000, plus_two), "1970-01-01 02:00:01");
    }

    #[test]
    fn durations() {
        assert_eq!(duration(0), NA);
        assert_eq!(duration(999), "0s");
        assert_eq!(duration(59_000), "59s");
        assert_eq!(duration(61_000), "1m 1s");
        assert_eq!(duration(3_723_000), "1h 2m 3s");
    }

    #[test]
    fn byte_sizes() {
        assert_eq!(bytes(0), "0 B");
        assert_eq!(bytes(1023), "1023 B");
        assert_eq!(bytes(1536), "1.50 KB");
        assert_eq!(bytes(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1_000), "1,000");
        assert_eq!(grouped(-1_234_567), "-1,234,567");
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("日志日志", 2), "日志...");
    }

    #[test]
    fn field_access() {
        let v = json!({"s": "x", "n": 3, "f": 2.9, "b": true, "e": ""});
        assert_eq!(text(&v, "s"), "x");
        assert_eq!(text(&v, "n"), "3");
        assert_eq!(text(&v, "b"), "true");
        assert_eq!(text(&v, "e"), NA);
        assert_eq!(text(&v, "missing"), NA);
        assert_eq!(int(&v, "f"), 2);
        assert_eq!(int(&v, "s"), 0);
        assert_eq!(progress(&json!({"progress": 100.0})), "100.0%");
    }

    #[test]
    fn tables_escape_cells() {
        let mut lines = Vec::new();
        kv_table(&mut lines, &[("Diag", "a|b\nc".to_string())]);
        assert_eq!(lines[0], "| Field | Value |");
        assert_eq!(lines[1], "|-------|-------|");
        assert_eq!(lines[2], "| Diag | a\\|b c |");
    }

    #[test]
    fn fence_outgrows_backticks_in_body() {
        let mut lines = Vec::new();
        fenced(&mut lines, "plain");
        assert_eq!(lines, ["```", "plain", "```"]);

        let mut lines = Vec::new();
        fenced(&mut lines, "``` and ````x````");
        assert_eq!(lines[0], "`````");
        assert_eq!(lines[2], "`````");
    }
}
