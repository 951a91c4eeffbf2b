//! Metrics exposition endpoint integration tests.
//!
//! Exercises `/metrics` end to end: forced series, generated batches, gauge
//! refreshes, and the exposition content type.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use sim_test_utils::TestSimServer;

/// A counter incremented through the shared metric state shows up in the
/// rendered exposition with its full label set.
#[tokio::test]
async fn test_metrics_contains_forced_series() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;

    server
        .metrics()
        .api_requests_total
        .with_label_values(&["gunters-guild", "almanac-api", "/clues", "GET", "200"])
        .inc();

    let body = reqwest::get(format!("{}/metrics", server.url()))
        .await?
        .text()
        .await?;

    let series = body
        .lines()
        .find(|line| {
            line.starts_with("stoa_api_requests_total")
                && line.contains(r#"tenant_id="gunters-guild""#)
                && line.contains(r#"api_id="almanac-api""#)
                && line.contains(r#"endpoint="/clues""#)
                && line.contains(r#"method="GET""#)
                && line.contains(r#"status_code="200""#)
        })
        .expect("forced series missing from exposition");

    let value: f64 = series
        .rsplit(' ')
        .next()
        .expect("series line has no value")
        .parse()?;
    assert!(value >= 1.0);

    Ok(())
}

/// The exposition uses the Prometheus text format media type.
#[tokio::test]
async fn test_metrics_content_type() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;

    let response = reqwest::get(format!("{}/metrics", server.url())).await?;
    assert_eq!(response.status(), 200);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert!(
        content_type.is_some_and(|ct| ct.contains("text/plain") && ct.contains("version=0.0.4")),
        "Expected the Prometheus text exposition content type"
    );

    Ok(())
}

/// A generated batch is visible on the very next scrape.
#[tokio::test]
async fn test_metrics_reflects_generated_batch() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;

    server.generator().generate_batch(1.0, 1)?;

    let body = reqwest::get(format!("{}/metrics", server.url()))
        .await?
        .text()
        .await?;

    assert!(body.contains("stoa_api_requests_total"));
    assert!(body.contains("stoa_api_request_duration_seconds_bucket"));
    for tenant in ["ioi-corp", "gregarious-games", "gunters-guild"] {
        assert!(
            body.contains(&format!(r#"tenant_id="{tenant}""#)),
            "{tenant} missing from exposition"
        );
    }

    Ok(())
}

/// Gauges appear after an update cycle, inside their documented ranges.
#[tokio::test]
async fn test_metrics_exposes_gauges() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;

    server.generator().update_gauges();

    let body = reqwest::get(format!("{}/metrics", server.url()))
        .await?
        .text()
        .await?;

    assert!(body.contains(r#"stoa_subscriptions_active{tenant_id="ioi-corp"}"#));
    assert!(body.contains("stoa_rate_limit_remaining_ratio"));

    Ok(())
}

/// Counters survive across scrapes: a second scrape never reports less.
#[tokio::test]
async fn test_counters_are_monotonic_across_scrapes() -> Result<(), anyhow::Error> {
    let server = TestSimServer::spawn().await?;

    let first_total = server.generator().generate_batch(1.0, 1)?;
    let first = scrape_requests_total(&server).await?;
    assert!(first >= first_total as f64);

    server.generator().generate_batch(1.0, 1)?;
    let second = scrape_requests_total(&server).await?;
    assert!(second > first, "counters must only increase");

    Ok(())
}

async fn scrape_requests_total(server: &TestSimServer) -> Result<f64, anyhow::Error> {
    let body = reqwest::get(format!("{}/metrics", server.url()))
        .await?
        .text()
        .await?;

    let mut total = 0.0;
    for line in body.lines() {
        if line.starts_with("stoa_api_requests_total{") {
            if let Some(value) = line.rsplit(' ').next() {
                total += value.parse::<f64>()?;
            }
        }
    }
    Ok(total)
}
