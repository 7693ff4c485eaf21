use std::collections::BTreeMap;

use serde_json::{Value, json};

use super::format::{NA, text, truncate};

const VALUE_LIMIT: usize = 100;

/// Properties whose name contains `filter` (case-insensitive); all of them without a filter.
pub(super) fn properties<'a>(conf: &'a Value, filter: Option<&str>) -> Vec<&'a Value> {
    let all = conf.get("property").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
    let needle = filter.map(str::to_lowercase);
    all.iter()
        .filter(|p| match &needle {
            Some(n) => p
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase().contains(n.as_str())),
            None => true,
        })
        .collect()
}

pub(super) fn payload(conf: &Value, filter: Option<&str>) -> Value {
    let props = properties(conf, filter);
    json!({
        "path": conf.get("path").cloned().unwrap_or(Value::Null),
        "total": props.len(),
        "property": props,
    })
}

pub(super) fn markdown(job_id: &str, conf: &Value, filter: Option<&str>) -> String {
    let props = properties(conf, filter);
    let mut lines = vec![
        format!("# Configuration of {job_id}"),
        format!("**Path**: `{}`", text(conf, "path")),
        String::new(),
        match filter {
            Some(f) => format!("Properties matching '{f}': **{}**", props.len()),
            None => format!("Properties: **{}**", props.len()),
        },
        String::new(),
    ];

    let mut groups: BTreeMap<&str, Vec<&Value>> = BTreeMap::new();
    for prop in props {
        let name = prop.get("name").and_then(Value::as_str).unwrap_or_default();
        let prefix = match name.split_once('.') {
            Some((head, _)) => head,
            None => "other",
        };
        groups.entry(prefix).or_default().push(prop);
    }

    for (prefix, props) in groups {
        lines.push(format!("## {prefix} ({})", props.len()));
        lines.push(String::new());
        for prop in props {
            let value = match prop.get("value") {
                Some(Value::String(s)) => truncate(s, VALUE_LIMIT),
                _ => NA.to_string(),
            };
            lines.push(format!("- `{}` = `{value}`", text(prop, "name")));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}
