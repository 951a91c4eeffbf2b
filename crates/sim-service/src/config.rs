//! Simulator configuration.
//!
//! Every tunable is a compiled-in constant: the simulator reads no
//! configuration file and no tunable environment variables. The `Config`
//! struct exists so the values travel together through startup and so tests
//! can substitute an ephemeral bind address.

use std::time::Duration;

/// Address the exposition endpoint listens on.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9091";

/// Seconds between live generation cycles.
pub const SIMULATION_INTERVAL_SECONDS: u64 = 5;

/// Seconds to back off after a failed generation cycle.
pub const ERROR_BACKOFF_SECONDS: u64 = 10;

/// Minutes of synthetic history generated at startup.
pub const HISTORICAL_MINUTES: u64 = 5;

/// Metrics simulator configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind address for `/metrics` and `/health`.
    pub bind_address: String,

    /// Interval between live generation cycles.
    pub simulation_interval: Duration,

    /// Backoff after a failed generation cycle.
    pub error_backoff: Duration,

    /// Historical window backfilled at startup.
    pub historical_minutes: u64,
}

impl Config {
    /// The compiled-in configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            simulation_interval: Duration::from_secs(SIMULATION_INTERVAL_SECONDS),
            error_backoff: Duration::from_secs(ERROR_BACKOFF_SECONDS),
            historical_minutes: HISTORICAL_MINUTES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();

        assert_eq!(config.bind_address, "0.0.0.0:9091");
        assert_eq!(config.simulation_interval, Duration::from_secs(5));
        assert_eq!(config.error_backoff, Duration::from_secs(10));
        assert_eq!(config.historical_minutes, 5);
    }

    #[test]
    fn test_config_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Config>();
    }
}
