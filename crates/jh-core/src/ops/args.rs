use std::collections::BTreeMap;

use jh_model::{AttemptRef, LogRange, LogRequest, LogType, ResponseFormat};
use serde_json::{Map, Value};

use super::{Operation, OperationDescriptor, ParamDefault, ParamKind, ParamLocation, ParamSpec};
use crate::ToolError;

const MAX_ID_LEN: usize = 100;
const SUMMARY_LIMIT: usize = 500;

/// A validated argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
}

impl ArgValue {
    fn render(&self) -> String {
        match self {
            ArgValue::Str(s) => s.clone(),
            ArgValue::Int(i) => i.to_string(),
        }
    }
}

impl From<ParamDefault> for ArgValue {
    fn from(d: ParamDefault) -> Self {
        match d {
            ParamDefault::Int(i) => ArgValue::Int(i),
            ParamDefault::Str(s) => ArgValue::Str(s.to_string()),
        }
    }
}

/// Arguments of one call, validated against an [`OperationDescriptor`] with defaults applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: BTreeMap<&'static str, ArgValue>,
}

impl Args {
    /// Validate raw call arguments.
    ///
    /// `null` counts as no arguments. A JSON string holding an object is decoded first, since
    /// some clients double-encode their arguments. Unknown keys are ignored.
    pub fn parse(desc: &OperationDescriptor, raw: &Value) -> Result<Self, ToolError> {
        let empty = Map::new();
        let decoded;
        let obj = match raw {
            Value::Null => &empty,
            Value::Object(m) => m,
            Value::String(s) => {
                decoded = serde_json::from_str::<Value>(s).map_err(|e| {
                    ToolError::InvalidRequest(format!("arguments are not valid JSON: {e}"))
                })?;
                match &decoded {
                    Value::Object(m) => m,
                    Value::Null => &empty,
                    _ => {
                        return Err(ToolError::InvalidRequest(
                            "arguments must be a JSON object".to_string(),
                        ));
                    }
                }
            }
            _ => {
                return Err(ToolError::InvalidRequest(
                    "arguments must be a JSON object".to_string(),
                ));
            }
        };

        let mut values = BTreeMap::new();
        for spec in desc.params {
            let given = match obj.get(spec.name) {
                None | Some(Value::Null) => None,
                Some(v) => validate(spec, v)?,
            };
            match (given, spec.default) {
                (Some(v), _) => {
                    values.insert(spec.name, v);
                }
                (None, Some(d)) => {
                    values.insert(spec.name, d.into());
                }
                (None, None) if spec.required => {
                    return Err(ToolError::InvalidRequest(format!(
                        "missing required argument '{}'",
                        spec.name
                    )));
                }
                (None, None) => {}
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn format(&self) -> ResponseFormat {
        self.str("response_format")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Endpoint template with path parameters substituted.
    pub fn endpoint(&self, desc: &OperationDescriptor) -> Result<String, ToolError> {
        let Some(template) = desc.endpoint else {
            return Err(ToolError::InvalidRequest(format!(
                "{} has no metadata endpoint",
                desc.name
            )));
        };
        let mut endpoint = template.to_string();
        for spec in desc.params.iter().filter(|p| p.location == ParamLocation::Path) {
            let value = self.str(spec.name).ok_or_else(|| {
                ToolError::InvalidRequest(format!("missing required argument '{}'", spec.name))
            })?;
            endpoint = endpoint.replace(&format!("{{{}}}", spec.name), value);
        }
        Ok(endpoint)
    }

    /// Query parameters in descriptor order, under their wire names.
    pub fn query(&self, desc: &OperationDescriptor) -> Vec<(&'static str, String)> {
        desc.params
            .iter()
            .filter_map(|spec| match spec.location {
                ParamLocation::Query(wire) => self.get(spec.name).map(|v| (wire, v.render())),
                _ => None,
            })
            .collect()
    }

    pub fn attempt_ref(&self) -> Result<AttemptRef, ToolError> {
        let id = |name: &str| {
            self.str(name).map(str::to_string).ok_or_else(|| {
                ToolError::InvalidRequest(format!("missing required argument '{name}'"))
            })
        };
        Ok(AttemptRef::new(id("job_id")?, id("task_id")?, id("attempt_id")?))
    }

    /// Log request of a log-retrieval operation.
    pub fn log_request(&self, op: Operation) -> Result<LogRequest, ToolError> {
        let attempt = self.attempt_ref()?;
        let log_type: LogType = self.str("log_type").unwrap_or("stdout").parse()?;
        match op {
            Operation::GetTaskAttemptLogs => Ok(LogRequest::full(attempt, log_type)),
            Operation::GetTaskAttemptLogsPartial => {
                let start = self.int("start").unwrap_or(-4096);
                let end = self.int("end").unwrap_or(0);
                let range = LogRange::from_offsets(start, end);
                Ok(LogRequest::partial(attempt, log_type, range))
            }
            other => Err(ToolError::InvalidRequest(format!(
                "{other} does not retrieve logs"
            ))),
        }
    }
}

/// Serialized arguments for log lines, cut at 500 characters.
pub fn summarize(raw: &Value) -> String {
    let s = match raw {
        Value::Null => return "{}".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match s.char_indices().nth(SUMMARY_LIMIT) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s,
    }
}

fn validate(spec: &ParamSpec, value: &Value) -> Result<Option<ArgValue>, ToolError> {
    let invalid = |msg: String| ToolError::InvalidRequest(format!("'{}' {msg}", spec.name));
    match spec.kind {
        ParamKind::Id => {
            let s = value
                .as_str()
                .ok_or_else(|| invalid("must be a string".to_string()))?
                .trim();
            if s.is_empty() {
                return Err(invalid("must not be empty".to_string()));
            }
            if s.len() > MAX_ID_LEN {
                return Err(invalid(format!("must be at most {MAX_ID_LEN} characters")));
            }
            if s.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%')) {
                return Err(invalid(format!("contains characters not allowed in an id: {s}")));
            }
            Ok(Some(ArgValue::Str(s.to_string())))
        }
        ParamKind::Text => {
            let s = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => return Err(invalid("must be a string".to_string())),
            };
            Ok((!s.is_empty()).then_some(ArgValue::Str(s)))
        }
        ParamKind::Integer { min, max } => {
            let n = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(|| invalid("must be an integer".to_string()))?;
            if let Some(min) = min
                && n < min
            {
                return Err(invalid(format!("must be >= {min}, got {n}")));
            }
            if let Some(max) = max
                && n > max
            {
                return Err(invalid(format!("must be <= {max}, got {n}")));
            }
            Ok(Some(ArgValue::Int(n)))
        }
        ParamKind::Choice(choices) => {
            let s = value
                .as_str()
                .ok_or_else(|| invalid("must be a string".to_string()))?
                .trim();
            if s.is_empty() {
                return Ok(None);
            }
            choices
                .iter()
                .find(|c| c.eq_ignore_ascii_case(s))
                .map(|c| Some(ArgValue::Str((*c).to_string())))
                .ok_or_else(|| invalid(format!("must be one of: {}", choices.join(", "))))
        }
    }
}
