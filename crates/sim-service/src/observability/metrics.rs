//! Metric definitions for the simulator.
//!
//! All metrics carry the `stoa_` prefix the dashboards expect, with
//! Prometheus naming conventions:
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded by the static catalog: 3 tenants, at most 4 APIs per
//! tenant, at most 4 endpoints per API, 4 methods, and a fixed status-code
//! set. No label value is derived from unbounded input.
//!
//! # State model
//!
//! Everything registers against an injected [`prometheus::Registry`] owned
//! by `main`; there is no process-global registry. The same `Registry` is
//! shared with the HTTP state for exposition, and metric cells are atomic,
//! so the generator can increment while a scrape renders.

use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry,
    TextEncoder,
};

use crate::errors::SimError;

/// Content type of the Prometheus text exposition format.
pub const CONTENT_TYPE_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Request duration buckets, in seconds. The top bucket matches the 5 s
/// latency clamp in the simulation model.
pub const DURATION_BUCKETS: &[f64] = &[0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// The simulator's metric families.
///
/// Counters only increase; gauges are overwritten on every update cycle.
pub struct SimulatorMetrics {
    /// Total API requests, by (tenant, api, endpoint, method, status_code).
    pub api_requests_total: IntCounterVec,

    /// API request duration in seconds, by (tenant, api, endpoint).
    pub api_request_duration_seconds: HistogramVec,

    /// Total API errors, by (tenant, api, error_type). `error_type` is the
    /// synthetic `http_<status>` classification.
    pub api_errors_total: IntCounterVec,

    /// Active subscriptions per tenant.
    pub subscriptions_active: IntGaugeVec,

    /// Rate limit remaining as a 0-1 ratio, by (tenant, api).
    pub rate_limit_remaining_ratio: GaugeVec,
}

impl SimulatorMetrics {
    /// Create the metric families and register them on `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a family fails to construct or is already
    /// registered (e.g., two `SimulatorMetrics` on one registry).
    pub fn new(registry: &Registry) -> Result<Self, SimError> {
        let api_requests_total = IntCounterVec::new(
            Opts::new("stoa_api_requests_total", "Total API requests"),
            &["tenant_id", "api_id", "endpoint", "method", "status_code"],
        )?;
        registry.register(Box::new(api_requests_total.clone()))?;

        let api_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "stoa_api_request_duration_seconds",
                "API request duration in seconds",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["tenant_id", "api_id", "endpoint"],
        )?;
        registry.register(Box::new(api_request_duration_seconds.clone()))?;

        let api_errors_total = IntCounterVec::new(
            Opts::new("stoa_api_errors_total", "Total API errors"),
            &["tenant_id", "api_id", "error_type"],
        )?;
        registry.register(Box::new(api_errors_total.clone()))?;

        let subscriptions_active = IntGaugeVec::new(
            Opts::new(
                "stoa_subscriptions_active",
                "Active subscriptions per tenant",
            ),
            &["tenant_id"],
        )?;
        registry.register(Box::new(subscriptions_active.clone()))?;

        let rate_limit_remaining_ratio = GaugeVec::new(
            Opts::new(
                "stoa_rate_limit_remaining_ratio",
                "Rate limit remaining (0-1)",
            ),
            &["tenant_id", "api_id"],
        )?;
        registry.register(Box::new(rate_limit_remaining_ratio.clone()))?;

        Ok(Self {
            api_requests_total,
            api_request_duration_seconds,
            api_errors_total,
            subscriptions_active,
            rate_limit_remaining_ratio,
        })
    }
}

/// Render every metric in `registry` in the Prometheus text exposition
/// format.
///
/// # Errors
///
/// Returns an error if text encoding fails.
pub fn render(registry: &Registry) -> Result<Vec<u8>, SimError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}
