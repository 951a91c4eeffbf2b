//! Traffic-shape simulation model.
//!
//! Produces synthetic request observations per (tenant, api, endpoint) and
//! folds them straight into the shared metric state; individual observations
//! are never retained. Request volume follows a diurnal curve, error
//! classification follows each tenant's baseline error rate, and latency
//! follows a log-normal with the tenant's base latency as the median.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use tracing::info;

use crate::catalog::TenantProfile;
use crate::errors::SimError;
use crate::observability::SimulatorMetrics;

/// HTTP methods drawn per request. GET appears three times, so it is 3x as
/// likely as any other single method.
const HTTP_METHODS: &[&str] = &["GET", "GET", "GET", "POST", "PATCH", "DELETE"];

/// Success status codes; 200 is 3x as likely as 201 or 204.
const SUCCESS_CODES: &[&str] = &["200", "200", "200", "201", "204"];

/// Error status codes, drawn uniformly.
const ERROR_CODES: &[&str] = &["400", "401", "403", "404", "429", "500", "502", "503"];

/// Log-normal shape parameter for simulated latencies.
const LATENCY_SIGMA: f64 = 0.5;

/// Latencies are clamped here; the top histogram bucket matches.
const LATENCY_CLAMP_SECONDS: f64 = 5.0;

/// Generation cycles per simulated minute (one per 5-second interval).
pub const CYCLES_PER_MINUTE: u64 = 12;

/// Batch size used while backfilling history.
const BACKFILL_BATCH_SIZE: u32 = 3;

/// Traffic-shape coefficient for the given hour of day.
///
/// Peak hours (9-12 and 14-17, both ends inclusive) sit at 1.0 plus up to
/// 0.3 of jitter; shoulder hours (6-9 and 17-20) at 0.6 plus up to 0.2; all
/// other hours at 0.3 plus up to 0.1. Hours 9 and 17 belong to the peak
/// ranges (first match wins); dashboards rely on this exact diurnal shape.
pub fn load_multiplier(hour: u32) -> f64 {
    let mut rng = rand::thread_rng();
    if (9..=12).contains(&hour) || (14..=17).contains(&hour) {
        1.0 + rng.gen_range(0.0..0.3)
    } else if (6..=9).contains(&hour) || (17..=20).contains(&hour) {
        0.6 + rng.gen_range(0.0..0.2)
    } else {
        0.3 + rng.gen_range(0.0..0.1)
    }
}

/// Generates synthetic request observations and point-in-time gauges.
///
/// Owns no metric storage itself: the metric state is injected at
/// construction and shared with the exposition endpoint.
pub struct TrafficGenerator {
    catalog: &'static [TenantProfile],
    metrics: Arc<SimulatorMetrics>,
    cycles: AtomicU64,
}

impl TrafficGenerator {
    #[must_use]
    pub fn new(catalog: &'static [TenantProfile], metrics: Arc<SimulatorMetrics>) -> Self {
        Self {
            catalog,
            metrics,
            cycles: AtomicU64::new(0),
        }
    }

    /// Number of generation batches run so far, backfill included.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Generate one batch of synthetic requests across the whole catalog.
    ///
    /// For every (tenant, api, endpoint) triple draws a request count of
    /// `floor(U[5,25) * multiplier * batch_size)`, then folds each request
    /// into the request counter, the error counter (when classified as an
    /// error), and the duration histogram. Returns the total number of
    /// requests drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency distribution cannot be constructed
    /// from a tenant's parameters.
    pub fn generate_batch(&self, multiplier: f64, batch_size: u32) -> Result<u64, SimError> {
        let mut rng = rand::thread_rng();
        let mut total = 0u64;

        for tenant in self.catalog {
            let latency = LogNormal::new(tenant.base_latency.ln(), LATENCY_SIGMA)
                .map_err(|e| SimError::Distribution(e.to_string()))?;

            for api in tenant.apis {
                for endpoint in api.endpoints {
                    let request_count =
                        (rng.gen_range(5.0..25.0) * multiplier * f64::from(batch_size)) as u64;
                    total += request_count;

                    for _ in 0..request_count {
                        let method = HTTP_METHODS.choose(&mut rng).copied().unwrap_or("GET");

                        let status = if rng.gen::<f64>() < tenant.error_rate {
                            let status = ERROR_CODES.choose(&mut rng).copied().unwrap_or("500");
                            self.metrics
                                .api_errors_total
                                .with_label_values(&[tenant.id, api.id, &format!("http_{status}")])
                                .inc();
                            status
                        } else {
                            SUCCESS_CODES.choose(&mut rng).copied().unwrap_or("200")
                        };

                        self.metrics
                            .api_requests_total
                            .with_label_values(&[tenant.id, api.id, endpoint, method, status])
                            .inc();

                        // Log-normal for a realistic latency tail, clamped so
                        // outliers stay inside the histogram range.
                        let seconds = latency.sample(&mut rng).min(LATENCY_CLAMP_SECONDS);
                        self.metrics
                            .api_request_duration_seconds
                            .with_label_values(&[tenant.id, api.id, endpoint])
                            .observe(seconds);
                    }
                }
            }
        }

        self.cycles.fetch_add(1, Ordering::Relaxed);
        Ok(total)
    }

    /// Overwrite the point-in-time gauges for every tenant.
    ///
    /// Subscriptions jitter by up to +/-2 around the catalog count. The
    /// near-rate-limit tenant reports 5-15% headroom, everyone else 40-90%.
    pub fn update_gauges(&self) {
        let mut rng = rand::thread_rng();

        for tenant in self.catalog {
            let jitter = rng.gen_range(-2i64..=2);
            self.metrics
                .subscriptions_active
                .with_label_values(&[tenant.id])
                .set(tenant.subscriptions + jitter);

            for api in tenant.apis {
                let remaining = if tenant.near_rate_limit {
                    rng.gen_range(0.05..0.15)
                } else {
                    rng.gen_range(0.4..0.9)
                };
                self.metrics
                    .rate_limit_remaining_ratio
                    .with_label_values(&[tenant.id, api.id])
                    .set(remaining);
            }
        }
    }

    /// Replay enough generation cycles to cover `minutes` of history, then
    /// set the gauges once.
    ///
    /// Each iteration recomputes the multiplier for the real current hour.
    /// The replay runs near-instantaneously, so the history is
    /// volume-inflated rather than spread over simulated timestamps.
    ///
    /// # Errors
    ///
    /// Returns the first generation error; partial history is kept.
    pub fn backfill_history(&self, minutes: u64) -> Result<(), SimError> {
        info!(minutes, "Generating historical data");

        let batches = minutes * CYCLES_PER_MINUTE;
        for i in 0..batches {
            let multiplier = load_multiplier(current_hour());
            self.generate_batch(multiplier, BACKFILL_BATCH_SIZE)?;

            if (i + 1) % CYCLES_PER_MINUTE == 0 {
                info!(
                    minute = (i + 1) / CYCLES_PER_MINUTE,
                    total_minutes = minutes,
                    "Backfill progress"
                );
            }
        }

        self.update_gauges();
        info!("Historical data generation complete");
        Ok(())
    }

    /// One live simulation cycle: a single batch at the current hour's
    /// multiplier, then a gauge refresh. Returns the requests generated.
    ///
    /// # Errors
    ///
    /// Propagates generation errors; the caller decides the backoff.
    pub fn run_cycle(&self) -> Result<u64, SimError> {
        let multiplier = load_multiplier(current_hour());
        let generated = self.generate_batch(multiplier, 1)?;
        self.update_gauges();
        Ok(generated)
    }
}

/// Hour of day in [0, 23], local time.
fn current_hour() -> u32 {
    Local::now().hour()
}
