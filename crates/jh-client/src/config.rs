use std::time::Duration;

use reqwest::Url;

use crate::errors::ClientError;

pub const DEFAULT_METADATA_URL: &str = "http://localhost:19888/ws/v1/history";
pub const DEFAULT_LOG_PORT: u16 = 8052;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const LOGS_PATH: &str = "jobhistory/logs";

/// Endpoints and limits of the job-history service.
///
/// Built once at start-up and passed by reference into the clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base of the history REST API, e.g. `http://host:19888/ws/v1/history`.
    pub metadata_base_url: String,
    /// Base of the aggregated log pages, e.g. `http://host:19888/jobhistory/logs`.
    pub log_base_url: String,
    /// Port of the per-node log server.
    pub log_port: u16,
    /// Deadline of every individual HTTP call.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            metadata_base_url: DEFAULT_METADATA_URL.to_string(),
            log_base_url: format!("http://localhost:19888/{LOGS_PATH}"),
            log_port: DEFAULT_LOG_PORT,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Config for the given metadata URL; the log base is derived from its scheme and authority.
    pub fn new(metadata_base_url: impl Into<String>) -> Result<Self, ClientError> {
        let metadata_base_url = metadata_base_url.into().trim_end_matches('/').to_string();
        let log_base_url = derive_log_base(&metadata_base_url)?;
        Ok(Self {
            metadata_base_url,
            log_base_url,
            ..Self::default()
        })
    }

    pub fn with_log_port(mut self, port: u16) -> Self {
        self.log_port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        Url::parse(&self.metadata_base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.metadata_base_url)))?;
        Url::parse(&self.log_base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.log_base_url)))?;
        if self.log_port == 0 {
            return Err(ClientError::InvalidConfig("log port must be non-zero".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "request timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// `{scheme}://{host[:port]}/jobhistory/logs` for a history API URL.
pub(crate) fn derive_log_base(metadata_url: &str) -> Result<String, ClientError> {
    let url =
        Url::parse(metadata_url).map_err(|e| ClientError::InvalidUrl(format!("{metadata_url}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidUrl(format!("{metadata_url}: missing host")))?;
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Ok(format!("{}://{}/{}", url.scheme(), authority, LOGS_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_base_keeps_scheme_and_authority() {
        assert_eq!(
            derive_log_base("http://jobhistory.example.com:19888/ws/v1/history").unwrap(),
            "http://jobhistory.example.com:19888/jobhistory/logs"
        );
        assert_eq!(
            derive_log_base("https://jh.example.com/ws/v1/history").unwrap(),
            "https://jh.example.com/jobhistory/logs"
        );
    }

    #[test]
    fn rejects_relative_url() {
        assert!(matches!(
            ClientConfig::new("ws/v1/history"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn new_trims_trailing_slash_and_validates() {
        let cfg = ClientConfig::new("http://h:19888/ws/v1/history/").unwrap();
        assert_eq!(cfg.metadata_base_url, "http://h:19888/ws/v1/history");
        assert_eq!(cfg.log_port, DEFAULT_LOG_PORT);
        assert!(cfg.validate().is_ok());
        assert!(matches!(
            cfg.clone().with_log_port(0).validate(),
            Err(ClientError::InvalidConfig(ref msg)) if msg.contains("log port")
        ));
        assert!(matches!(
            cfg.with_timeout(Duration::ZERO).validate(),
            Err(ClientError::InvalidConfig(ref msg)) if msg.contains("timeout")
        ));
    }
}
