//! JSON Schema of tool arguments, derived from the operation descriptors.

use jh_core::{OperationDescriptor, ParamDefault, ParamKind};
use serde_json::{Map, Value, json};

pub fn input_schema(desc: &OperationDescriptor) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for p in desc.params {
        let mut prop = match p.kind {
            ParamKind::Id => json!({ "type": "string", "minLength": 1, "maxLength": 100 }),
            ParamKind::Text => json!({ "type": "string" }),
            ParamKind::Integer { min, max } => {
                let mut v = json!({ "type": "integer" });
                if let Some(min) = min {
                    v["minimum"] = json!(min);
                }
                if let Some(max) = max {
                    v["maximum"] = json!(max);
                }
                v
            }
            ParamKind::Choice(values) => json!({ "type": "string", "enum": values }),
        };
        prop["description"] = json!(p.description);
        match p.default {
            Some(ParamDefault::Int(i)) => prop["default"] = json!(i),
            Some(ParamDefault::Str(s)) => prop["default"] = json!(s),
            None => {}
        }
        if p.required {
            required.push(json!(p.name));
        }
        properties.insert(p.name.to_string(), prop);
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jh_core::Operation;

    #[test]
    fn partial_log_schema() {
        let s = input_schema(Operation::GetTaskAttemptLogsPartial.descriptor());
        assert_eq!(s["type"], "object");
        assert_eq!(s["required"], json!(["job_id", "task_id", "attempt_id"]));
        assert_eq!(s["properties"]["start"]["default"], -4096);
        assert!(s["properties"]["end"].get("minimum").is_none());
        assert_eq!(s["properties"]["log_type"]["default"], "syslog");
        assert_eq!(s["properties"]["log_type"]["enum"].as_array().unwrap().len(), 7);
        assert_eq!(s["properties"]["job_id"]["minLength"], 1);
    }

    #[test]
    fn list_jobs_limit_bounds() {
        let s = input_schema(Operation::ListJobs.descriptor());
        let limit = &s["properties"]["limit"];
        assert_eq!(limit["minimum"], 1);
        assert_eq!(limit["maximum"], 100);
        assert_eq!(limit["default"], 20);
        assert_eq!(s["required"], json!([]));
    }
}
