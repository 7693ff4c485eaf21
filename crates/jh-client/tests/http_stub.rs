use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
};
use serde_json::json;

use jh_client::{ClientConfig, ClientError, LogFetcher, MetadataClient};

async fn start_stub() -> SocketAddr {
    let app = Router::new()
        .route(
            "/ws/v1/history/info",
            get(|| async { Json(json!({"historyInfo": {"hadoopVersion": "3.3.6"}})) }),
        )
        .route(
            "/ws/v1/history/broken",
            get(|| async { "not json" }),
        )
        .route(
            "/ws/v1/history/forbidden",
            get(|| async { StatusCode::FORBIDDEN }),
        )
        .route(
            "/ws/v1/history/unavailable",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route(
            "/ws/v1/history/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({}))
            }),
        )
        .route(
            "/jobhistory/logs/moved",
            get(|| async { Redirect::temporary("/jobhistory/logs/node") }),
        )
        .route(
            "/jobhistory/logs/node",
            get(|| async { Html("<html><pre>hello</pre></html>") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(format!("http://{addr}/ws/v1/history"))
        .unwrap()
        .with_timeout(Duration::from_millis(500))
}

#[tokio::test]
async fn get_json_parses_body() {
    let addr = start_stub().await;
    let client = MetadataClient::new(&config(addr)).unwrap();

    let value = client.get_json("info", &[]).await.unwrap();
    assert_eq!(value["historyInfo"]["hadoopVersion"], "3.3.6");
}

#[tokio::test]
async fn missing_resource_is_not_found() {
    let addr = start_stub().await;
    let client = MetadataClient::new(&config(addr)).unwrap();

    let err = client.get_json("mapreduce/jobs/job_nope", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { ref url } if url.ends_with("/job_nope")));
}

#[tokio::test]
async fn status_codes_are_classified() {
    let addr = start_stub().await;
    let client = MetadataClient::new(&config(addr)).unwrap();

    let err = client.get_json("forbidden", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::PermissionDenied { .. }));

    let err = client.get_json("unavailable", &[]).await.unwrap_err();
    assert_eq!(err, ClientError::HttpError { status: 503 });
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let addr = start_stub().await;
    let client = MetadataClient::new(&config(addr)).unwrap();

    let err = client.get_json("broken", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(ref msg) if msg.contains("not json")));
}

#[tokio::test]
async fn slow_server_times_out() {
    let addr = start_stub().await;
    let client = MetadataClient::new(&config(addr)).unwrap();

    let err = client.get_json("slow", &[]).await.unwrap_err();
    match err {
        ClientError::Timeout {
            target,
            elapsed_ms,
            timeout_ms,
        } => {
            assert!(target.ends_with("/slow"));
            assert!(elapsed_ms >= 400);
            assert_eq!(timeout_ms, 500);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_connect_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MetadataClient::new(&config(addr)).unwrap();
    let err = client.get_json("info", &[]).await.unwrap_err();
    assert!(
        matches!(err, ClientError::ConnectFailure { ref host, .. } if *host == addr.to_string()),
        "got {err:?}"
    );
}

#[tokio::test]
async fn fetch_follows_redirects() {
    let addr = start_stub().await;
    let fetcher = LogFetcher::new(&config(addr)).unwrap();

    let page = fetcher
        .fetch(&format!("http://{addr}/jobhistory/logs/moved"))
        .await
        .unwrap();
    assert_eq!(page.status, 200);
    assert!(page.final_url.ends_with("/jobhistory/logs/node"));
    assert!(page.html.contains("<pre>hello</pre>"));
}

#[tokio::test]
async fn fetch_rejects_malformed_url() {
    let fetcher = LogFetcher::new(&ClientConfig::default()).unwrap();
    let err = fetcher.fetch("not a url").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));
}
