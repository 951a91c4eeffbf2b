//! Health endpoint integration tests.
//!
//! Tests the `/health` endpoint and the 404 surface using `TestSimServer`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use sim_test_utils::TestSimServer;

/// The health endpoint returns 200 with the exact liveness payload.
#[tokio::test]
async fn test_health_endpoint_returns_200() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert!(
        content_type.is_some_and(|ct| ct.contains("application/json")),
        "Expected application/json content type"
    );

    // Probes compare the body byte-for-byte.
    let body = response.text().await?;
    assert_eq!(body, r#"{"status": "healthy", "service": "metrics-simulator"}"#);

    Ok(())
}

/// Unknown paths return 404 with an empty body.
#[tokio::test]
async fn test_unknown_route_returns_404() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/unknown-path", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 404);
    assert!(response.text().await?.is_empty());

    Ok(())
}

/// Known paths with the wrong method also return 404, not 405.
#[tokio::test]
async fn test_wrong_method_returns_404() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/health", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), 404);

    let response = client
        .delete(format!("{}/metrics", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), 404);

    Ok(())
}
