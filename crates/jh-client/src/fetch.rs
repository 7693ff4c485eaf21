use std::time::Duration;

use reqwest::{Client, Url};
use tracing::instrument;

use crate::{
    config::ClientConfig,
    errors::ClientError,
    transport::{self, build_http},
};

/// Raw log page as returned by the log server.
#[derive(Debug, Clone)]
pub struct LogPage {
    pub html: String,
    pub status: u16,
    /// URL after redirects; usually the owning node.
    pub final_url: String,
    pub duration_ms: u64,
}

/// Retrieves HTML log pages, following redirects.
#[derive(Debug, Clone)]
pub struct LogFetcher {
    http: Client,
    timeout: Duration,
}

impl LogFetcher {
    pub fn new(cfg: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_http(build_http(cfg)?, cfg))
    }

    /// Share an existing connection pool built from the same `cfg`.
    pub fn with_http(http: Client, cfg: &ClientConfig) -> Self {
        Self {
            http,
            timeout: cfg.request_timeout,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<LogPage, ClientError> {
        let parsed = Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
        let reply = transport::get(&self.http, parsed, "text/html", self.timeout).await?;
        Ok(LogPage {
            html: reply.body,
            status: reply.status,
            final_url: reply.final_url,
            duration_ms: reply.duration_ms,
        })
    }
}
