use serde_json::Value;

use super::format::{grouped, text};

const GROUP_KEYS: [&str; 3] = ["counterGroup", "taskCounterGroup", "taskAttemptCounterGroup"];

/// Counter groups of a job, task or attempt; the history server names the list differently for
/// each.
pub(super) fn markdown(title: &str, counters: &Value) -> String {
    let groups = GROUP_KEYS
        .iter()
        .filter_map(|k| counters.get(*k).and_then(Value::as_array))
        .find(|g| !g.is_empty())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut lines = vec![format!("# {title}"), String::new()];
    if groups.is_empty() {
        lines.push("No counters reported.".to_string());
        return lines.join("\n");
    }
    for group in groups {
        let name = text(group, "counterGroupName");
        let short = name.rsplit('.').next().unwrap_or(&name);
        lines.push(format!("## {short}"));
        lines.push(String::new());
        let counters = group.get("counter").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
        for counter in counters {
            lines.push(counter_line(counter));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn counter_line(counter: &Value) -> String {
    let name = text(counter, "name");
    let total = value(counter, "totalCounterValue")
        .or_else(|| value(counter, "value"))
        .unwrap_or(0);
    match (value(counter, "mapCounterValue"), value(counter, "reduceCounterValue")) {
        (Some(map), Some(reduce)) => format!(
            "- **{name}**: {} (map: {}, reduce: {})",
            grouped(total),
            grouped(map),
            grouped(reduce)
        ),
        _ => format!("- **{name}**: {}", grouped(total)),
    }
}

fn value(obj: &Value, key: &str) -> Option<i64> {
    obj.get(key).and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_counters_show_map_and_reduce_split() {
        let body = json!({
            "id": "job_1",
            "counterGroup": [{
                "counterGroupName": "org.apache.hadoop.mapreduce.FileSystemCounter",
                "counter": [{
                    "name": "FILE_BYTES_READ",
                    "totalCounterValue": 1234567,
                    "mapCounterValue": 1000000,
                    "reduceCounterValue": 234567
                }]
            }]
        });
        let out = markdown("Job counters: job_1", &body);
        assert!(out.starts_with("# Job counters: job_1"));
        assert!(out.contains("## FileSystemCounter"));
        assert!(out.contains("- **FILE_BYTES_READ**: 1,234,567 (map: 1,000,000, reduce: 234,567)"));
    }

    #[test]
    fn attempt_counters_use_plain_values() {
        let body = json!({
            "taskAttemptCounterGroup": [{
                "counterGroupName": "Shuffle Errors",
                "counter": [{"name": "BAD_ID", "value": 0}]
            }]
        });
        let out = markdown("Attempt counters", &body);
        assert!(out.contains("## Shuffle Errors"));
        assert!(out.contains("- **BAD_ID**: 0"));
    }

    #[test]
    fn missing_groups() {
        assert!(markdown("t", &json!({})).contains("No counters reported."));
    }
}
