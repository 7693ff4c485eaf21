use async_trait::async_trait;
use jh_core::ToolOutput;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Behaviour hints advertised with every tool.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub title: String,
    pub read_only_hint: bool,
    pub destructive_hint: bool,
    pub idempotent_hint: bool,
    pub open_world_hint: bool,
}

/// Tool listing entry, serialized the way MCP `tools/list` expects it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
    pub annotations: ToolAnnotations,
}

/// Tool execution API handler.
///
/// Transports only talk to this trait: [`crate::ExecutorAdapter`] backs it with the
/// [`jh_core::ToolExecutor`], tests and embedders can provide their own.
#[async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    /// Every tool the handler serves.
    fn list_tools(&self) -> Vec<ToolInfo>;

    /// Run a tool. Tool-level failures come back as an error [`ToolOutput`];
    /// `Err` is reserved for calls that never reached a tool.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolOutput, ApiError>;
}
