use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::instrument;

use crate::{
    config::ClientConfig,
    errors::ClientError,
    transport::{self, build_http},
};

/// JSON GETs against the job-history REST API.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl MetadataClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_http(build_http(cfg)?, cfg))
    }

    /// Share an existing connection pool.
    pub fn with_http(http: Client, cfg: &ClientConfig) -> Self {
        Self {
            http,
            base_url: cfg.metadata_base_url.trim_end_matches('/').to_string(),
            timeout: cfg.request_timeout,
        }
    }

    /// Underlying connection pool, for sharing with a [`crate::LogFetcher`].
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `endpoint` with `query` appended in order.
    pub fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GET `endpoint` and parse the body as JSON.
    #[instrument(level = "debug", skip(self, query))]
    pub async fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ClientError> {
        let url = self.endpoint_url(endpoint, query)?;
        let reply = transport::get(&self.http, url, "application/json", self.timeout).await?;
        serde_json::from_str(&reply.body).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "failed to parse json from {}: {e}, body: {}",
                reply.final_url,
                snippet(&reply.body)
            ))
        })
    }
}

fn snippet(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MetadataClient {
        let cfg = ClientConfig::new("http://jh:19888/ws/v1/history/").unwrap();
        MetadataClient::new(&cfg).unwrap()
    }

    #[test]
    fn endpoint_url_joins_and_encodes_query() {
        let c = client();
        let url = c
            .endpoint_url(
                "mapreduce/jobs",
                &[("user", "alice smith".to_string()), ("limit", "20".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://jh:19888/ws/v1/history/mapreduce/jobs?user=alice+smith&limit=20"
        );
    }

    #[test]
    fn endpoint_url_without_query_has_no_question_mark() {
        let url = client().endpoint_url("/info", &[]).unwrap();
        assert_eq!(url.as_str(), "http://jh:19888/ws/v1/history/info");
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let body = "é".repeat(150);
        assert!(snippet(&body).len() <= 200);
        assert_eq!(snippet("short"), "short");
    }
}
