//! Synsim Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use synsim_runtime::prelude::*;
//! ```

// Re-export the driver
pub use crate::simulation::{Simulation, SimulationState};

// Re-export CSV export
pub use crate::export::{
    default_output_path, load_results, read_csv, save_results, to_csv_string, write_csv,
    CsvLayout, DEFAULT_OUTPUT_DIR, OUTPUT_STEM,
};

// Re-export run statistics
pub use crate::metrics::RunStats;

// Re-export batch runs
pub use crate::batch::{execute, plan_regions, run_regions, run_single, CompletedRun};

// Re-export from core
pub use synsim_core::prelude::*;
