//! Test utilities for the metrics simulator.
//!
//! Provides `TestSimServer` for spawning real simulator instances in tests.

pub mod server_harness;

pub use server_harness::TestSimServer;
