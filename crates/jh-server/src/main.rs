mod config;

use std::sync::Arc;

use anyhow::Context;
use jh_api::{ExecutorAdapter, HttpApi, McpDispatcher, serve_stdio};
use jh_core::{ToolExecutor, render::init_local_offset};
use jh_observe::logger_init;
use jh_prometheus::PrometheusMetrics;
use tracing::{error, info};

use crate::config::{ServerConfig, Transport};

fn main() -> anyhow::Result<()> {
    let cfg = ServerConfig::from_env()?;
    logger_init(&cfg.logger)?;

    // Local offset lookups are only sound while the process is single-threaded.
    let offset = init_local_offset();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    info!(
        metadata = %cfg.client.metadata_base_url,
        logs = %cfg.client.log_base_url,
        log_port = cfg.client.log_port,
        timeout_ms = cfg.client.request_timeout.as_millis() as u64,
        ?offset,
        "starting jobhistory-mcp"
    );
    let result = runtime.block_on(run(cfg));
    if let Err(e) = &result {
        error!("server stopped: {e:#}");
    }
    result
}

async fn run(cfg: ServerConfig) -> anyhow::Result<()> {
    let metrics = Arc::new(PrometheusMetrics::new()?);
    let executor = ToolExecutor::new(&cfg.client)?.with_metrics(metrics.clone());
    let handler = Arc::new(ExecutorAdapter::new(Arc::new(executor)));

    match cfg.transport {
        Transport::Stdio => {
            serve_stdio(McpDispatcher::new(handler)).await?;
            info!("stdio closed, exiting");
        }
        Transport::Http(addr) => {
            let app = HttpApi::new(handler).with_metrics(metrics).router();
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            info!("serving MCP over HTTP on {addr}");
            jh_api::axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("HTTP server stopped");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
