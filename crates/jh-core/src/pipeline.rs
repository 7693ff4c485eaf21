use jh_client::{ClientConfig, LogFetcher, MetadataClient};
use jh_model::{LogRequest, LogResult, ResolvedLocation};
use tracing::{info, instrument};

use crate::{ToolError, extract::extract_pre, resolve::Resolver, url::build_log_url};

/// Everything learned while serving one log request.
#[derive(Debug, Clone)]
pub struct LogRetrieval {
    pub location: ResolvedLocation,
    pub url: String,
    /// `host:port` of the log server that was addressed.
    pub log_server: String,
    pub result: LogResult,
}

/// Resolve → build URL → fetch → extract.
///
/// Steps run strictly in sequence; the first failure ends the retrieval.
#[derive(Debug, Clone)]
pub struct LogPipeline {
    resolver: Resolver,
    fetcher: LogFetcher,
    log_base_url: String,
    log_port: u16,
}

impl LogPipeline {
    pub fn new(metadata: MetadataClient, fetcher: LogFetcher, cfg: &ClientConfig) -> Self {
        Self {
            resolver: Resolver::new(metadata),
            fetcher,
            log_base_url: cfg.log_base_url.clone(),
            log_port: cfg.log_port,
        }
    }

    #[instrument(level = "debug", skip(self, request), fields(attempt = %request.attempt, log_type = %request.log_type))]
    pub async fn retrieve(&self, request: &LogRequest) -> Result<LogRetrieval, ToolError> {
        let location = self.resolver.resolve(&request.attempt).await?;
        let url = build_log_url(&self.log_base_url, &location, self.log_port, request);
        info!(range = %request.range.describe(), "fetching log url: {url}");

        let page = self.fetcher.fetch(&url).await?;
        let result = LogResult::new(extract_pre(&page.html), page.duration_ms);
        info!(
            bytes = result.byte_length,
            duration_ms = result.fetch_duration_ms,
            "log extracted"
        );

        Ok(LogRetrieval {
            log_server: location.log_server(self.log_port),
            location,
            url,
            result,
        })
    }
}
