use std::error::Error as _;
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode, Url, header::ACCEPT, redirect::Policy};
use tracing::{info, warn};

use crate::{config::ClientConfig, errors::ClientError};

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Successful (2xx) response with its body read to completion.
#[derive(Debug)]
pub(crate) struct Reply {
    pub status: u16,
    pub final_url: String,
    pub body: String,
    pub duration_ms: u64,
}

pub(crate) fn build_http(cfg: &ClientConfig) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(cfg.request_timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| ClientError::Transport(error_chain(&e)))
}

/// Issue a GET and classify any failure.
///
/// `deadline` is the timeout the client was built with; it is only reported, never enforced here.
pub(crate) async fn get(
    http: &Client,
    url: Url,
    accept: &'static str,
    deadline: Duration,
) -> Result<Reply, ClientError> {
    let target = url.to_string();
    let host = host_of(&url);
    info!("[REST_REQ] GET {target}");

    let started = Instant::now();
    let response = match http.get(url).header(ACCEPT, accept).send().await {
        Ok(response) => response,
        Err(e) => return Err(failed(&e, &target, &host, started, deadline)),
    };

    let status = response.status();
    let final_url = response.url().to_string();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return Err(failed(&e, &target, &host, started, deadline)),
    };
    let duration_ms = elapsed_ms(started);

    info!(
        "[REST_RSP] {} {}, size: {} bytes, duration: {}ms",
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        body.len(),
        duration_ms
    );

    if !status.is_success() {
        warn!("[REST_ERR] HTTP {}, duration: {}ms", status.as_u16(), duration_ms);
        return Err(from_status(status, &final_url));
    }
    Ok(Reply {
        status: status.as_u16(),
        final_url,
        body,
        duration_ms,
    })
}

fn failed(
    e: &reqwest::Error,
    target: &str,
    host: &str,
    started: Instant,
    deadline: Duration,
) -> ClientError {
    let err = classify(e, target, host, elapsed_ms(started), deadline);
    warn!(kind = err.kind(), "[REST_ERR] {err}");
    err
}

pub(crate) fn from_status(status: StatusCode, url: &str) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound {
            url: url.to_string(),
        },
        StatusCode::FORBIDDEN => ClientError::PermissionDenied {
            url: url.to_string(),
        },
        other => ClientError::HttpError {
            status: other.as_u16(),
        },
    }
}

fn classify(
    e: &reqwest::Error,
    target: &str,
    host: &str,
    elapsed_ms: u64,
    deadline: Duration,
) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout {
            target: target.to_string(),
            elapsed_ms,
            timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        }
    } else if e.is_connect() {
        ClientError::ConnectFailure {
            host: host.to_string(),
            reason: error_chain(e),
        }
    } else if let Some(status) = e.status() {
        from_status(status, target)
    } else if e.is_decode() || e.is_body() {
        ClientError::InvalidResponse(error_chain(e))
    } else if e.is_builder() {
        ClientError::InvalidUrl(error_chain(e))
    } else {
        ClientError::Transport(error_chain(e))
    }
}

fn host_of(url: &Url) -> String {
    match (url.host_str(), url.port_or_known_default()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => url.to_string(),
    }
}

fn error_chain(e: &reqwest::Error) -> String {
    let mut chain = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        chain.push_str(&format!(" -> {cause}"));
        source = cause.source();
    }
    chain
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_taxonomy() {
        assert_eq!(
            from_status(StatusCode::NOT_FOUND, "http://h/x"),
            ClientError::NotFound {
                url: "http://h/x".to_string()
            }
        );
        assert!(matches!(
            from_status(StatusCode::FORBIDDEN, "u"),
            ClientError::PermissionDenied { .. }
        ));
        assert_eq!(
            from_status(StatusCode::SERVICE_UNAVAILABLE, "u"),
            ClientError::HttpError { status: 503 }
        );
    }

    #[test]
    fn host_includes_port() {
        let url = Url::parse("http://node01:8052/logs").unwrap();
        assert_eq!(host_of(&url), "node01:8052");
        let url = Url::parse("https://jh.example.com/ws").unwrap();
        assert_eq!(host_of(&url), "jh.example.com:443");
    }
}
