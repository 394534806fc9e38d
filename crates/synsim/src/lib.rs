//! # Synsim
//!
//! Hebbian plasticity of a single synapse, simulated in fixed time steps.
//!
//! A pre-synaptic and a post-synaptic neuron fire stochastically. Whenever
//! both fire in the same step the connection between them strengthens;
//! otherwise it slowly decays. The weight is recorded every step and can be
//! written out as CSV for plotting.
//!
//! ## Quick Start
//!
//! ```rust
//! use synsim::prelude::*;
//!
//! // One second at 10 ms resolution, reproducible from a seed
//! let params = SimulationParameters::new(1.0, 0.01, 0.5, 0.1, 0.5);
//! let mut sim = Simulation::seeded(params, 42);
//!
//! let rows = sim.run();
//! assert_eq!(rows.len(), 100);
//! assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.synaptic_weight)));
//! ```
//!
//! ## Architecture
//!
//! - [`synsim_core`] - Parameters, activity sources and the weight rule
//! - [`synsim_runtime`] - The simulation driver, CSV export, statistics and region batches
//!
//! ## The Update Rule
//!
//! "Neurons that fire together wire together."
//!
//! ```text
//! dw = (-lambda * w + eta * pre * post) * dt
//! w' = clamp(w + dw, 0, 1)
//! ```
//!
//! | Step activity | Effect on the weight |
//! |---------------|----------------------|
//! | both fire | potentiation, minus decay |
//! | one or neither fires | decay only |
//!
//! ## Activity
//!
//! The default generator fires the pre-synaptic neuron 30% of the time. After
//! a pre-synaptic spike the post-synaptic neuron fires 73% of the time (a 70%
//! coupled draw with a 10% baseline draw as fallback); without one it fires
//! 10% of the time. Any [`ActivitySource`](prelude::ActivitySource)
//! can drive a run instead:
//!
//! ```rust
//! use synsim::prelude::*;
//!
//! let params = SimulationParameters::new(0.01, 0.01, 0.5, 0.1, 0.5);
//! let activity = ScriptedActivity::constant(ActivitySample::coincident());
//! let mut sim = Simulation::with_activity(params, activity);
//!
//! let weight = sim.run()[0].synaptic_weight;
//! assert!((weight - 0.5045).abs() < 1e-12);
//! ```
//!
//! ## Saving Results
//!
//! ```rust,ignore
//! use synsim::prelude::*;
//!
//! let run = run_single(SimulationParameters::default(), Some(7));
//! run.save(&run.default_output_path())?; // data/synapse_data.csv
//! ```

pub use synsim_core as core;
pub use synsim_runtime as runtime;

/// Prelude: import everything commonly needed.
pub mod prelude {
    // Shared types
    pub use synsim_core::types::{ActivitySample, ResultRow, Seconds, SimulationParameters, Step};

    // Randomness and activity
    pub use synsim_core::random::{RandomSource, ReplaySource, RngSource};
    pub use synsim_core::activity::{ActivityGenerator, ActivityProfile, ActivitySource, ScriptedActivity};

    // Weight rule
    pub use synsim_core::plasticity::{next_weight, HebbianRule, SynapticWeight, MAX_WEIGHT, MIN_WEIGHT};

    // Error types
    pub use synsim_core::error::{ConfigError, OutputError, Result, SynsimError};

    // Runtime
    pub use synsim_runtime::simulation::{Simulation, SimulationState};
    pub use synsim_runtime::export::{
        default_output_path, load_results, read_csv, save_results, to_csv_string, write_csv, CsvLayout,
    };
    pub use synsim_runtime::metrics::RunStats;
    pub use synsim_runtime::batch::{execute, plan_regions, run_regions, run_single, CompletedRun};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
