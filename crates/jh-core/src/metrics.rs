use std::time::Duration;

/// Sink for per-tool call metrics.
///
/// `outcome` is `"ok"` or the [`crate::ToolError::kind`] label of the failure.
pub trait MetricsBackend: Send + Sync {
    fn record_call(&self, tool: &str, outcome: &str, elapsed: Duration);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsBackend for NoopMetrics {
    fn record_call(&self, _tool: &str, _outcome: &str, _elapsed: Duration) {}
}
