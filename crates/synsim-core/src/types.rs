//! Shared types used across the simulator crates.

use serde::{Deserialize, Serialize};

/// Simulated time in seconds.
pub type Seconds = f64;

/// Index of a discrete simulation step, starting at zero.
pub type Step = u64;

/// Tolerance, in units of machine epsilon, for snapping `duration / dt`.
const RATIO_ULPS: f64 = 8.0;

/// Parameters for one simulation run.
///
/// Built once, handed to the driver at construction and never mutated
/// while the run is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Total simulated time in seconds.
    pub duration: Seconds,
    /// Fixed time step in seconds.
    pub dt: Seconds,
    /// Hebbian learning rate (eta).
    pub learning_rate: f64,
    /// Passive decay rate (lambda).
    pub decay_rate: f64,
    /// Starting synaptic weight, expected in `[0, 1]`.
    pub initial_weight: f64,
    /// Optional label used to tell runs apart (e.g. a brain region).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            duration: 10.0,
            dt: 0.01,
            learning_rate: 0.5,
            decay_rate: 0.1,
            initial_weight: 0.5,
            region: None,
        }
    }
}

impl SimulationParameters {
    pub fn new(duration: Seconds, dt: Seconds, learning_rate: f64, decay_rate: f64, initial_weight: f64) -> Self {
        Self {
            duration,
            dt,
            learning_rate,
            decay_rate,
            initial_weight,
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Region label, or the empty string for unlabelled runs.
    pub fn region_label(&self) -> &str {
        self.region.as_deref().unwrap_or("")
    }

    /// Number of steps the driver takes for these parameters.
    ///
    /// Mirrors the loop condition `t < duration` with `t = i * dt`: the ratio
    /// `duration / dt` is rounded up, except that ratios within a few ulps of
    /// an integer snap to that integer (so 1.0 / 0.1 gives 10, not 11).
    /// Degenerate parameters (non-positive or non-finite) give zero steps.
    pub fn step_count(&self) -> Step {
        if !self.is_well_formed() {
            return 0;
        }
        let ratio = self.duration / self.dt;
        if !ratio.is_finite() {
            return 0;
        }
        let nearest = ratio.round();
        // Division error only; a genuine fraction of a step still rounds up
        if (ratio - nearest).abs() <= RATIO_ULPS * f64::EPSILON * nearest.max(1.0) {
            nearest as Step
        } else {
            ratio.ceil() as Step
        }
    }

    /// Time of the given step, computed from the index rather than accumulated.
    pub fn time_at(&self, step: Step) -> Seconds {
        step as f64 * self.dt
    }

    /// True when duration and dt are finite and strictly positive.
    pub fn is_well_formed(&self) -> bool {
        self.duration.is_finite() && self.dt.is_finite() && self.duration > 0.0 && self.dt > 0.0
    }
}

/// Binary pre/post-synaptic activity for one time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActivitySample {
    pub pre: bool,
    pub post: bool,
}

impl ActivitySample {
    pub fn new(pre: bool, post: bool) -> Self {
        Self { pre, post }
    }

    /// Both sides fired.
    pub fn coincident() -> Self {
        Self::new(true, true)
    }

    /// Neither side fired.
    pub fn silent() -> Self {
        Self::new(false, false)
    }

    /// Pre-synaptic activity as 0.0 or 1.0.
    pub fn pre_level(&self) -> f64 {
        if self.pre { 1.0 } else { 0.0 }
    }

    /// Post-synaptic activity as 0.0 or 1.0.
    pub fn post_level(&self) -> f64 {
        if self.post { 1.0 } else { 0.0 }
    }

    pub fn is_coincident(&self) -> bool {
        self.pre && self.post
    }
}

/// One recorded simulation step.
///
/// Field names double as the CSV column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub time: Seconds,
    pub pre_activity: u8,
    pub post_activity: u8,
    pub synaptic_weight: f64,
    #[serde(default)]
    pub region: String,
}

impl ResultRow {
    pub fn new(time: Seconds, sample: ActivitySample, weight: f64, region: &str) -> Self {
        Self {
            time,
            pre_activity: sample.pre as u8,
            post_activity: sample.post as u8,
            synaptic_weight: weight,
            region: region.to_string(),
        }
    }

    /// The activity pair this row was recorded from.
    pub fn sample(&self) -> ActivitySample {
        ActivitySample::new(self.pre_activity != 0, self.post_activity != 0)
    }
}
