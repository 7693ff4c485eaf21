use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::handler::ToolHandler;

/// Newest MCP revision spoken; also the answer to clients asking for an unknown one.
pub const PROTOCOL_VERSION: &str = "2025-06-18";
const SUPPORTED_VERSIONS: [&str; 3] = [PROTOCOL_VERSION, "2025-03-26", "2024-11-05"];

pub const SERVER_NAME: &str = "jobhistory-mcp";

const INSTRUCTIONS: &str = "Read-only access to a MapReduce JobHistory server. To debug a failed \
    job: jobhistory_list_jobs with state=FAILED, then jobhistory_get_job, \
    jobhistory_list_tasks, jobhistory_list_task_attempts, and finally \
    jobhistory_get_task_attempt_logs_partial for the failing attempt.";

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
        }
    }
}

impl From<ApiError> for RpcError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidRequest(msg) => RpcError::invalid_params(msg),
            ApiError::ToolNotFound(name) => RpcError::invalid_params(format!("Unknown tool: {name}")),
            other => RpcError::internal(other.to_string()),
        }
    }
}

fn success_response(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn error_response(id: Value, err: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": err.code, "message": err.message },
    })
}

/// MCP request dispatcher over any [`ToolHandler`].
///
/// Transport-agnostic: feed it one JSON-RPC message (or batch) and write back what it returns.
/// Notifications produce no response.
pub struct McpDispatcher<H> {
    handler: Arc<H>,
}

impl<H> Clone for McpDispatcher<H> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}

impl<H> McpDispatcher<H>
where
    H: ToolHandler,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }

    /// Handle one serialized message; parse failures are answered with `-32700`.
    pub async fn handle_text(&self, text: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(text) {
            Ok(incoming) => self.handle(incoming).await?,
            Err(e) => {
                warn!("unparseable JSON-RPC message: {e}");
                error_response(Value::Null, RpcError::parse_error(format!("Parse error: {e}")))
            }
        };
        Some(response.to_string())
    }

    /// Handle one message or a batch.
    pub async fn handle(&self, incoming: Value) -> Option<Value> {
        match incoming {
            Value::Array(batch) if batch.is_empty() => Some(error_response(
                Value::Null,
                RpcError::invalid_request("Empty batch"),
            )),
            Value::Array(batch) => {
                let mut responses = Vec::new();
                for message in batch {
                    if let Some(r) = self.handle_single(message).await {
                        responses.push(r);
                    }
                }
                (!responses.is_empty()).then_some(Value::Array(responses))
            }
            single => self.handle_single(single).await,
        }
    }

    async fn handle_single(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };
        let id = obj.get("id").cloned();

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return Some(error_response(
                id.unwrap_or(Value::Null),
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            // A response to a request we never send.
            return None;
        };
        let params = obj.get("params").cloned().unwrap_or(Value::Null);

        let Some(id) = id else {
            debug!(method, "notification");
            return None;
        };
        Some(match self.handle_request(method, params).await {
            Ok(result) => success_response(id, result),
            Err(err) => error_response(id, err),
        })
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(initialize_payload(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.handler.list_tools() })),
            "tools/call" => self.tools_call(params).await,
            "resources/list" => Ok(json!({ "resources": [] })),
            "prompts/list" => Ok(json!({ "prompts": [] })),
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    async fn tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let Value::Object(mut params) = params else {
            return Err(RpcError::invalid_params("tools/call params must be an object"));
        };
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;
        let arguments = params.remove("arguments").unwrap_or(Value::Null);

        let output = self.handler.call_tool(&name, arguments).await?;
        Ok(json!({
            "content": [{ "type": "text", "text": output.text }],
            "isError": output.is_error,
        }))
    }
}

fn initialize_payload(params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_VERSIONS.contains(v))
        .unwrap_or(PROTOCOL_VERSION);
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
        "instructions": INSTRUCTIONS,
    })
}
