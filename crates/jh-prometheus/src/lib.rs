//! Prometheus metrics backend for the job-history tool service.
//!
//! [`PrometheusMetrics`] implements [`jh_core::MetricsBackend`] on top of its own [`Registry`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use jh_client::ClientConfig;
//! use jh_core::ToolExecutor;
//! use jh_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = Arc::new(PrometheusMetrics::new()?);
//! let executor = ToolExecutor::new(&ClientConfig::default())?.with_metrics(metrics.clone());
//!
//! // Serve `metrics.encode_text()?` from a `/metrics` route.
//! # let _ = executor;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `jobhistory_tool_calls_total{tool, outcome}` - Counter
//! - `jobhistory_tool_duration_seconds{tool}` - Histogram
//!
//! ## HTTP Server
//! This crate does NOT serve `/metrics`; `jh-api` mounts it when the `http` feature is enabled.

mod backend;
pub use backend::{MetricsError, PrometheusMetrics};

pub use prometheus::{Encoder, Registry, TEXT_FORMAT, TextEncoder};
