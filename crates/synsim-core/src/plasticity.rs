//! Decayed Hebbian plasticity for a single synaptic weight.
//!
//! One forward-Euler step of
//!
//! ```text
//! dw/dt = -lambda * w + eta * pre * post
//! ```
//!
//! followed by a clamp into `[0, 1]`. The clamp runs after every step,
//! including the first, so an out-of-range initial weight is pulled back on
//! the first update.

use crate::types::{ActivitySample, SimulationParameters};

/// Lower bound of the synaptic weight.
pub const MIN_WEIGHT: f64 = 0.0;
/// Upper bound of the synaptic weight.
pub const MAX_WEIGHT: f64 = 1.0;

/// Weight change for one step, before clamping.
pub fn weight_delta(weight: f64, pre: f64, post: f64, learning_rate: f64, decay_rate: f64, dt: f64) -> f64 {
    (-decay_rate * weight + learning_rate * pre * post) * dt
}

/// Next weight after one step. Pure: no state, no side effects.
///
/// A NaN result (NaN weight, or `inf * 0` from an infinite rate) maps to
/// `MIN_WEIGHT`, so the output is always inside `[0, 1]`.
pub fn next_weight(weight: f64, pre: f64, post: f64, learning_rate: f64, decay_rate: f64, dt: f64) -> f64 {
    let next = weight + weight_delta(weight, pre, post, learning_rate, decay_rate, dt);
    if next.is_nan() {
        MIN_WEIGHT
    } else {
        next.clamp(MIN_WEIGHT, MAX_WEIGHT)
    }
}

/// The update rule with its rates bound, ready to apply to samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HebbianRule {
    pub learning_rate: f64,
    pub decay_rate: f64,
    pub dt: f64,
}

impl HebbianRule {
    pub fn new(learning_rate: f64, decay_rate: f64, dt: f64) -> Self {
        Self {
            learning_rate,
            decay_rate,
            dt,
        }
    }

    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self::new(params.learning_rate, params.decay_rate, params.dt)
    }

    /// Unclamped change for one sample.
    pub fn delta(&self, weight: f64, sample: ActivitySample) -> f64 {
        weight_delta(
            weight,
            sample.pre_level(),
            sample.post_level(),
            self.learning_rate,
            self.decay_rate,
            self.dt,
        )
    }

    /// Clamped next weight for one sample.
    pub fn apply(&self, weight: f64, sample: ActivitySample) -> f64 {
        next_weight(
            weight,
            sample.pre_level(),
            sample.post_level(),
            self.learning_rate,
            self.decay_rate,
            self.dt,
        )
    }
}

/// The synapse's weight state.
///
/// Owned by whoever drives the run; mutated once per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynapticWeight {
    value: f64,
}

impl SynapticWeight {
    /// Start at the given weight. Not clamped until the first update.
    pub fn new(initial: f64) -> Self {
        Self { value: initial }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advance one step under `rule` and return the new weight.
    pub fn update(&mut self, sample: ActivitySample, rule: &HebbianRule) -> f64 {
        self.value = rule.apply(self.value, sample);
        self.value
    }

    /// Advance one step using the rates in `params`.
    pub fn apply(&mut self, sample: ActivitySample, params: &SimulationParameters) -> f64 {
        self.update(sample, &HebbianRule::from_parameters(params))
    }
}
