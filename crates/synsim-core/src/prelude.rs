//! Synsim Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use synsim_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{ActivitySample, ResultRow, Seconds, SimulationParameters, Step};

// Re-export random sources
pub use crate::random::{RandomSource, ReplaySource, RngSource};

// Re-export activity generation
pub use crate::activity::{ActivityGenerator, ActivityProfile, ActivitySource, ScriptedActivity};

// Re-export the weight rule
pub use crate::plasticity::{next_weight, HebbianRule, SynapticWeight, MAX_WEIGHT, MIN_WEIGHT};

// Re-export error types
pub use crate::error::{ConfigError, OutputError, Result, SynsimError};
