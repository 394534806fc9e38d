//! # Synsim Runtime
//!
//! Runs single-synapse simulations and handles their results.
//!
//! The runtime owns the mutable side of a run: the [`simulation::Simulation`]
//! driver steps the weight forward in fixed increments, [`export`] writes
//! the recorded rows as CSV, [`metrics`] summarises them and [`batch`] runs
//! several independently labelled regions back to back.

pub mod batch;
pub mod export;
pub mod metrics;
pub mod prelude;
pub mod simulation;
