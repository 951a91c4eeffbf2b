//! STOA Metrics Simulator library.
//!
//! Fabricates plausible multi-tenant API traffic metrics and serves them in
//! the Prometheus text exposition format so the quickstart dashboards have
//! data the moment they load:
//!
//! - request counters, error counters, and latency histograms per tenant,
//!   API, and endpoint, with volume following a diurnal curve
//! - point-in-time gauges for active subscriptions and rate-limit headroom
//! - a synthetic historical backfill at startup so graphs render immediately
//!
//! # Architecture
//!
//! ```text
//! catalog -> simulation -> observability (shared registry) <- handlers/routes
//!                ^
//!            tasks (interval loop)
//! ```
//!
//! The metric registry is constructed in `main` and injected into both the
//! generator and the HTTP state; nothing records through process globals.
//!
//! # Modules
//!
//! - `catalog` - static tenant/API catalog
//! - `config` - compiled-in tunables
//! - `errors` - error types with HTTP response mapping
//! - `handlers` - HTTP request handlers
//! - `observability` - metric definitions and text exposition
//! - `routes` - Axum router setup
//! - `simulation` - the traffic-shape model
//! - `tasks` - the continuous generation loop

pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod observability;
pub mod routes;
pub mod simulation;
pub mod tasks;
