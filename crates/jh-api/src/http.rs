use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use jh_prometheus::{PrometheusMetrics, TEXT_FORMAT};
use serde_json::{Value, json};

use crate::{error::ApiError, handler::ToolHandler, mcp::McpDispatcher};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
    metrics: Option<Arc<PrometheusMetrics>>,
}

struct AppState<H> {
    dispatcher: McpDispatcher<H>,
    metrics: Option<Arc<PrometheusMetrics>>,
}

impl<H> HttpApi<H>
where
    H: ToolHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            metrics: None,
        }
    }

    /// Expose the given registry on `/metrics`.
    pub fn with_metrics(mut self, metrics: Arc<PrometheusMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /mcp - MCP JSON-RPC message
    /// - GET /api/v1/tools - List tools
    /// - POST /api/v1/tools/{name} - Call a tool with a JSON arguments object
    /// - GET /metrics - Prometheus exposition (404 without metrics)
    /// - GET /healthz - Liveness
    pub fn router(self) -> Router {
        let state = Arc::new(AppState {
            dispatcher: McpDispatcher::new(self.handler),
            metrics: self.metrics,
        });
        Router::new()
            .route("/mcp", post(mcp_message::<H>))
            .route("/api/v1/tools", get(list_tools::<H>))
            .route("/api/v1/tools/{name}", post(call_tool::<H>))
            .route("/metrics", get(metrics::<H>))
            .route("/healthz", get(healthz))
            .with_state(state)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /mcp
async fn mcp_message<H>(State(state): State<Arc<AppState<H>>>, body: String) -> Response
where
    H: ToolHandler,
{
    match state.dispatcher.handle_text(&body).await {
        Some(reply) => ([(header::CONTENT_TYPE, "application/json")], reply).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// GET /api/v1/tools
async fn list_tools<H>(State(state): State<Arc<AppState<H>>>) -> impl IntoResponse
where
    H: ToolHandler,
{
    Json(json!({ "tools": state.dispatcher.handler().list_tools() }))
}

/// POST /api/v1/tools/{name}
async fn call_tool<H>(
    State(state): State<Arc<AppState<H>>>,
    Path(name): Path<String>,
    body: String,
) -> Result<impl IntoResponse, ApiError>
where
    H: ToolHandler,
{
    let arguments = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidRequest(format!("arguments are not valid JSON: {e}")))?
    };
    let output = state.dispatcher.handler().call_tool(&name, arguments).await?;
    Ok(Json(output))
}

/// GET /metrics
async fn metrics<H>(State(state): State<Arc<AppState<H>>>) -> Result<Response, ApiError>
where
    H: ToolHandler,
{
    let Some(metrics) = &state.metrics else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let text = metrics
        .encode_text()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, TEXT_FORMAT)], text).into_response())
}

/// GET /healthz
async fn healthz() -> &'static str {
    "ok"
}
