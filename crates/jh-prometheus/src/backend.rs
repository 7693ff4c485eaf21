use std::time::Duration;

use jh_core::MetricsBackend;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};
use thiserror::Error;

const DURATION_BUCKETS: &[f64] = &[0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("metrics output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Tool call counters and latency histograms.
#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    calls: IntCounterVec,
    duration: HistogramVec,
}

impl PrometheusMetrics {
    /// Backend with a fresh registry.
    pub fn new() -> Result<Self, MetricsError> {
        Self::with_registry(Registry::new())
    }

    /// Register the collectors on an existing registry.
    pub fn with_registry(registry: Registry) -> Result<Self, MetricsError> {
        let calls = IntCounterVec::new(
            Opts::new(
                "jobhistory_tool_calls_total",
                "Tool invocations by tool and outcome",
            ),
            &["tool", "outcome"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "jobhistory_tool_duration_seconds",
                "Tool invocation latency",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["tool"],
        )?;
        registry.register(Box::new(calls.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            calls,
            duration,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Prometheus text exposition of everything registered.
    pub fn encode_text(&self) -> Result<String, MetricsError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_call(&self, tool: &str, outcome: &str, elapsed: Duration) {
        self.calls.with_label_values(&[tool, outcome]).inc();
        self.duration
            .with_label_values(&[tool])
            .observe(elapsed.as_secs_f64());
    }
}
