//! Background tasks for the metrics simulator.
//!
//! # Tasks
//!
//! - `simulation_loop` - regenerates a synthetic traffic batch every interval

pub mod simulation_loop;

pub use simulation_loop::run_simulation_loop;
