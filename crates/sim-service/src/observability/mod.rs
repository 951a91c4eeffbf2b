//! Metric state shared between the generator and the exposition endpoint.

pub mod metrics;

pub use metrics::{render, SimulatorMetrics, CONTENT_TYPE_TEXT, DURATION_BUCKETS};
