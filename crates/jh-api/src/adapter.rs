use std::sync::Arc;

use async_trait::async_trait;
use jh_client::ClientConfig;
use jh_core::{Operation, ToolExecutor, ToolOutput};
use serde_json::Value;

use crate::error::ApiError;
use crate::handler::{ToolAnnotations, ToolHandler, ToolInfo};
use crate::schema::input_schema;

/// Adapter that bridges [`ToolExecutor`] to [`ToolHandler`].
///
/// Unknown tool names are rejected here; everything else is delegated to the executor.
#[derive(Clone)]
pub struct ExecutorAdapter {
    executor: Arc<ToolExecutor>,
}

impl ExecutorAdapter {
    pub fn new(executor: Arc<ToolExecutor>) -> Self {
        Self { executor }
    }

    pub fn from_config(cfg: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(ToolExecutor::new(cfg)?)))
    }
}

#[async_trait]
impl ToolHandler for ExecutorAdapter {
    fn list_tools(&self) -> Vec<ToolInfo> {
        Operation::ALL
            .iter()
            .map(|op| {
                let desc = op.descriptor();
                ToolInfo {
                    name: desc.name.to_string(),
                    title: desc.title.to_string(),
                    description: desc.description.to_string(),
                    input_schema: input_schema(desc),
                    annotations: ToolAnnotations {
                        title: desc.title.to_string(),
                        read_only_hint: true,
                        destructive_hint: false,
                        idempotent_hint: true,
                        open_world_hint: true,
                    },
                }
            })
            .collect()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolOutput, ApiError> {
        if Operation::from_name(name).is_none() {
            return Err(ApiError::ToolNotFound(name.to_string()));
        }
        Ok(self.executor.call(name, arguments).await)
    }
}
