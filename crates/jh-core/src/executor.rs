use std::sync::Arc;
use std::time::Instant;

use jh_client::{ClientConfig, LogFetcher, MetadataClient};
use jh_model::CorrelationId;
use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};

use crate::{
    Args, LogPipeline, MetricsBackend, NoopMetrics, Operation, ToolError, ops::summarize, render,
};

/// Text handed back to the caller of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    pub fn error(text: String) -> Self {
        Self {
            text,
            is_error: true,
        }
    }
}

/// Runs tools by name.
///
/// Pass-through operations issue one metadata GET described by their descriptor; log operations
/// go through the [`LogPipeline`]. Failures never escape [`ToolExecutor::call`]: they come back
/// as an error [`ToolOutput`].
#[derive(Clone)]
pub struct ToolExecutor {
    metadata: MetadataClient,
    pipeline: LogPipeline,
    metrics: Arc<dyn MetricsBackend>,
}

impl ToolExecutor {
    /// Build the HTTP stack once; metadata and log requests share one connection pool.
    pub fn new(cfg: &ClientConfig) -> Result<Self, ToolError> {
        cfg.validate()?;
        let metadata = MetadataClient::new(cfg)?;
        let fetcher = LogFetcher::with_http(metadata.http().clone(), cfg);
        let pipeline = LogPipeline::new(metadata.clone(), fetcher, cfg);
        Ok(Self {
            metadata,
            pipeline,
            metrics: Arc::new(NoopMetrics),
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsBackend>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metadata_base_url(&self) -> &str {
        self.metadata.base_url()
    }

    /// Run one tool under a fresh correlation id.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolOutput {
        let request_id = CorrelationId::generate();
        let span = info_span!("tool", request_id = %request_id, tool = %name);
        self.call_traced(name, &arguments).instrument(span).await
    }

    async fn call_traced(&self, name: &str, arguments: &Value) -> ToolOutput {
        let started = Instant::now();
        info!("[TOOL_CALL] {name} params={}", summarize(arguments));

        let result = self.dispatch(name, arguments).await;
        let elapsed = started.elapsed();
        let duration_ms = elapsed.as_millis() as u64;

        match result {
            Ok(text) => {
                info!(duration_ms, chars = text.len(), "[TOOL_RSP] {name} ok");
                self.metrics.record_call(name, "ok", elapsed);
                ToolOutput::ok(text)
            }
            Err(e) => {
                warn!(duration_ms, kind = e.kind(), "[TOOL_ERR] {name}: {e}");
                let label = match &e {
                    ToolError::UnknownTool(_) => "unknown",
                    _ => name,
                };
                self.metrics.record_call(label, e.kind(), elapsed);
                ToolOutput::error(e.describe())
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
        let op = Operation::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let desc = op.descriptor();
        let args = Args::parse(desc, arguments)?;

        if op.is_log_retrieval() {
            let request = args.log_request(op)?;
            let got = self.pipeline.retrieve(&request).await?;
            return Ok(render::retrieval(&request, &got, args.format()));
        }

        let endpoint = args.endpoint(desc)?;
        let body = self.metadata.get_json(&endpoint, &args.query(desc)).await?;
        Ok(render::operation(op, &body, &args, self.metadata.base_url()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, String)>>);

    impl MetricsBackend for Recorder {
        fn record_call(&self, tool: &str, outcome: &str, _elapsed: Duration) {
            if let Ok(mut calls) = self.0.lock() {
                calls.push((tool.to_string(), outcome.to_string()));
            }
        }
    }

    fn executor(metrics: Arc<Recorder>) -> ToolExecutor {
        let cfg = ClientConfig::new("http://127.0.0.1:9/ws/v1/history").unwrap();
        ToolExecutor::new(&cfg).unwrap().with_metrics(metrics)
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_output() {
        let metrics = Arc::new(Recorder::default());
        let out = executor(metrics.clone())
            .call("jobhistory_delete_everything", Value::Null)
            .await;
        assert!(out.is_error);
        assert_eq!(out.text, "Error: unknown tool 'jobhistory_delete_everything'.");
        assert_eq!(
            metrics.0.lock().unwrap().as_slice(),
            [("unknown".to_string(), "unknown_tool".to_string())]
        );
    }

    #[tokio::test]
    async fn invalid_arguments_fail_before_any_request() {
        let metrics = Arc::new(Recorder::default());
        let out = executor(metrics.clone())
            .call("jobhistory_get_job", serde_json::json!({"job_id": "  "}))
            .await;
        assert!(out.is_error);
        assert!(out.text.starts_with("Error: invalid request"));
        assert_eq!(metrics.0.lock().unwrap()[0].1, "invalid_request");
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = ClientConfig::new("http://h:1/ws/v1/history")
            .unwrap()
            .with_timeout(Duration::ZERO);
        assert!(ToolExecutor::new(&cfg).is_err());
    }
}
