//! # Synsim Core
//!
//! Core types and the numerical building blocks for simulating a single
//! synapse under a decayed Hebbian learning rule.
//!
//! The crate is split along the two components of a run:
//!
//! - **Activity**: produce one binary (pre, post) spike pair per time step,
//!   with post-synaptic firing biased towards steps where the pre-synaptic
//!   side fired
//! - **Plasticity**: advance the synaptic weight from that pair, clamped to
//!   `[0, 1]` after every step
//!
//! Randomness is never global: every generator owns a [`random::RandomSource`],
//! so runs can be seeded or replayed exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use synsim_core::prelude::*;
//!
//! let params = SimulationParameters::default();
//! let mut weight = SynapticWeight::new(params.initial_weight);
//!
//! // A seeded generator gives a reproducible spike train
//! let mut activity = ActivityGenerator::new(RngSource::seeded(7));
//! let sample = activity.next_sample();
//!
//! let w = weight.apply(sample, &params);
//! assert!((0.0..=1.0).contains(&w));
//! ```

pub mod types;
pub mod random;
pub mod activity;
pub mod plasticity;
pub mod error;
pub mod prelude;
