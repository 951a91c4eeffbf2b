//! Continuous metric generation task.
//!
//! Runs one simulation cycle per interval tick until cancelled. A failed
//! cycle is logged and followed by a longer backoff sleep; the loop itself
//! never terminates on error.
//!
//! # Graceful Shutdown
//!
//! The task supports graceful shutdown via a cancellation token. When the
//! token is cancelled, the task finishes its current iteration and exits
//! cleanly, which also lets tests drive a bounded number of iterations.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::simulation::{TrafficGenerator, CYCLES_PER_MINUTE};

/// Drive the generator until the cancellation token fires.
///
/// Each tick computes the current-hour multiplier, generates one batch, and
/// refreshes the gauges. A cycle error backs off for `error_backoff` before
/// the next tick; progress is logged once per simulated minute.
pub async fn run_simulation_loop(
    generator: Arc<TrafficGenerator>,
    interval: Duration,
    error_backoff: Duration,
    cancel_token: CancellationToken,
) {
    info!(
        target: "sim.task.generator",
        interval_seconds = interval.as_secs(),
        "Starting continuous metric generation"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut iteration: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match generator.run_cycle() {
                    Ok(generated) => {
                        iteration += 1;
                        if iteration % CYCLES_PER_MINUTE == 0 {
                            info!(
                                target: "sim.task.generator",
                                iteration,
                                generated,
                                "Metrics generated"
                            );
                        }
                    }
                    Err(e) => {
                        // Log and keep going - the loop only exits on shutdown
                        error!(
                            target: "sim.task.generator",
                            error = %e,
                            "Simulation cycle failed"
                        );
                        tokio::time::sleep(error_backoff).await;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                info!(
                    target: "sim.task.generator",
                    "Generation task received shutdown signal, exiting"
                );
                break;
            }
        }
    }

    info!(target: "sim.task.generator", "Generation task stopped");
}
