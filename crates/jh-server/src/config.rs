use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use jh_client::{ClientConfig, ClientError, DEFAULT_METADATA_URL};
use jh_observe::{LoggerConfig, LoggerError};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("client config: {0}")]
    Client(#[from] ClientError),

    #[error("logger config: {0}")]
    Logger(#[from] LoggerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http(SocketAddr),
}

/// Everything the process needs, read once at start-up.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub client: ClientConfig,
    pub logger: LoggerConfig,
    pub transport: Transport,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::load(&args, |key| std::env::var(key).ok())
    }

    /// Build from command-line arguments and a variable lookup.
    pub fn load<F>(args: &[String], lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = var("JOBHISTORY_URL").unwrap_or_else(|| DEFAULT_METADATA_URL.to_string());
        let mut client = ClientConfig::new(url.trim())?;
        if let Some(port) = var("NODEMANAGER_PORT") {
            client = client.with_log_port(parse_port("NODEMANAGER_PORT", &port)?);
        }
        if let Some(timeout) = var("REQUEST_TIMEOUT") {
            client = client.with_timeout(parse_timeout(&timeout)?);
        }
        client.validate()?;

        let mut logger = LoggerConfig::default();
        if let Some(level) = var("LOG_LEVEL") {
            logger = logger.with_level(&level)?;
        }
        if let Some(format) = var("LOG_FORMAT") {
            logger = logger.with_format(&format)?;
        }

        let http_flag = args.iter().any(|a| a == "--http");
        let transport = match var("MCP_TRANSPORT") {
            _ if http_flag => Some("http".to_string()),
            Some(t) => Some(t.trim().to_ascii_lowercase()),
            None => None,
        };
        let transport = match transport.as_deref() {
            None | Some("stdio") => Transport::Stdio,
            Some("http") => Transport::Http(bind_addr(&var)?),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "MCP_TRANSPORT",
                    value: other.to_string(),
                    reason: "expected stdio or http".to_string(),
                });
            }
        };

        Ok(Self {
            client,
            logger,
            transport,
        })
    }
}

fn bind_addr(var: &impl Fn(&str) -> Option<String>) -> Result<SocketAddr, ConfigError> {
    let host = var("MCP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
    let ip: IpAddr = host.trim().parse().map_err(|e| ConfigError::Invalid {
        var: "MCP_HOST",
        value: host.clone(),
        reason: format!("{e}"),
    })?;
    let port = match var("MCP_PORT") {
        Some(p) => parse_port("MCP_PORT", &p)?,
        None => DEFAULT_PORT,
    };
    Ok(SocketAddr::new(ip, port))
}

fn parse_port(var: &'static str, raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(p) if p > 0 => Ok(p),
        Ok(_) => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "port must be non-zero".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "REQUEST_TIMEOUT",
        value: raw.to_string(),
        reason,
    };
    let secs: f64 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid("must be a positive number of seconds".to_string()));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use jh_observe::LoggerFormat;

    use super::*;

    fn load(args: &[&str], vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        ServerConfig::load(&args, |k| env.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[], &[]).unwrap();
        assert_eq!(cfg.client.metadata_base_url, DEFAULT_METADATA_URL);
        assert_eq!(cfg.client.log_base_url, "http://localhost:19888/jobhistory/logs");
        assert_eq!(cfg.client.log_port, 8052);
        assert_eq!(cfg.client.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.logger.level, "info");
        assert_eq!(cfg.transport, Transport::Stdio);
    }

    #[test]
    fn reads_overrides() {
        let cfg = load(
            &[],
            &[
                ("JOBHISTORY_URL", "https://jhs.example:19890/ws/v1/history/"),
                ("NODEMANAGER_PORT", "9000"),
                ("REQUEST_TIMEOUT", "2.5"),
                ("LOG_LEVEL", "debug"),
                ("LOG_FORMAT", "json"),
                ("MCP_TRANSPORT", "HTTP"),
                ("MCP_HOST", "127.0.0.1"),
                ("MCP_PORT", "9999"),
            ],
        )
        .unwrap();
        assert_eq!(cfg.client.metadata_base_url, "https://jhs.example:19890/ws/v1/history");
        assert_eq!(cfg.client.log_base_url, "https://jhs.example:19890/jobhistory/logs");
        assert_eq!(cfg.client.log_port, 9000);
        assert_eq!(cfg.client.request_timeout, Duration::from_millis(2500));
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert_eq!(
            cfg.transport,
            Transport::Http("127.0.0.1:9999".parse().unwrap())
        );
    }

    #[test]
    fn http_flag_wins() {
        let cfg = load(&["--http"], &[("MCP_TRANSPORT", "stdio")]).unwrap();
        assert_eq!(cfg.transport, Transport::Http("0.0.0.0:8080".parse().unwrap()));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = load(&[], &[("NODEMANAGER_PORT", " "), ("MCP_TRANSPORT", "")]).unwrap();
        assert_eq!(cfg.client.log_port, 8052);
        assert_eq!(cfg.transport, Transport::Stdio);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[], &[("NODEMANAGER_PORT", "0")]),
            Err(ConfigError::Invalid { var: "NODEMANAGER_PORT", .. })
        ));
        assert!(matches!(
            load(&[], &[("REQUEST_TIMEOUT", "-1")]),
            Err(ConfigError::Invalid { var: "REQUEST_TIMEOUT", .. })
        ));
        assert!(matches!(
            load(&[], &[("MCP_TRANSPORT", "grpc")]),
            Err(ConfigError::Invalid { var: "MCP_TRANSPORT", .. })
        ));
        assert!(matches!(
            load(&[], &[("LOG_FORMAT", "yaml")]),
            Err(ConfigError::Logger(LoggerError::InvalidFormat(_)))
        ));
        assert!(matches!(
            load(&[], &[("LOG_LEVEL", "jh_core=chatty")]),
            Err(ConfigError::Logger(LoggerError::InvalidLogLevel { .. }))
        ));
        assert!(matches!(
            load(&[], &[("JOBHISTORY_URL", "not a url")]),
            Err(ConfigError::Client(_))
        ));
    }
}
