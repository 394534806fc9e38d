//! Activity generation: correlated binary spike pairs.
//!
//! The pre-synaptic side fires independently. The post-synaptic side fires
//! with a high probability on steps where the pre side fired and with a low
//! baseline probability otherwise, which is what gives the Hebbian term
//! something to learn.
//!
//! # Draw order
//!
//! Each sample takes two or three draws from the random source:
//!
//! 1. `u1`: `pre = u1 > pre_threshold`
//! 2. If pre fired, `u2`: `post = u2 > coupled_threshold`
//! 3. If pre stayed silent, or the coupled draw failed, one more draw:
//!    `post = u > baseline_threshold`
//!
//! A pre spike therefore gets two chances to drive post, so with the default
//! thresholds `P(post | pre) = 0.7 + 0.3 * 0.1 = 0.73`, not 0.7. Comparisons
//! are strict, so a draw equal to a threshold does not fire.

use crate::random::{RandomSource, RngSource};
use crate::types::ActivitySample;
use serde::{Deserialize, Serialize};

/// Anything that yields one activity sample per simulation step.
pub trait ActivitySource {
    /// Produce the sample for the next step.
    fn next_sample(&mut self) -> ActivitySample;
}

impl<A: ActivitySource + ?Sized> ActivitySource for &mut A {
    fn next_sample(&mut self) -> ActivitySample {
        (**self).next_sample()
    }
}

impl<A: ActivitySource + ?Sized> ActivitySource for Box<A> {
    fn next_sample(&mut self) -> ActivitySample {
        (**self).next_sample()
    }
}

/// Firing thresholds for the stochastic activity rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfile {
    /// Pre fires when its draw exceeds this (0.7 → 30% firing).
    pub pre_threshold: f64,
    /// Post fires after a pre spike when its first draw exceeds this (0.3 → 70%).
    pub coupled_threshold: f64,
    /// Post fires when its baseline draw exceeds this (0.9 → 10%). Also the
    /// fallback draw after a failed coupled draw.
    pub baseline_threshold: f64,
}

impl Default for ActivityProfile {
    fn default() -> Self {
        Self {
            pre_threshold: 0.7,
            coupled_threshold: 0.3,
            baseline_threshold: 0.9,
        }
    }
}

impl ActivityProfile {
    /// Probability that the pre side fires on a step.
    pub fn pre_probability(&self) -> f64 {
        (1.0 - self.pre_threshold).clamp(0.0, 1.0)
    }

    /// Probability that post fires given that pre fired, counting the
    /// baseline fallback draw.
    pub fn coupled_probability(&self) -> f64 {
        let missed = self.coupled_threshold.clamp(0.0, 1.0) * self.baseline_threshold.clamp(0.0, 1.0);
        1.0 - missed
    }

    /// Probability that post fires given that pre stayed silent.
    pub fn baseline_probability(&self) -> f64 {
        (1.0 - self.baseline_threshold).clamp(0.0, 1.0)
    }
}

/// Stochastic activity generator driven by an owned random source.
#[derive(Debug, Clone)]
pub struct ActivityGenerator<R = RngSource> {
    source: R,
    profile: ActivityProfile,
    draws: u64,
}

impl ActivityGenerator<RngSource> {
    /// Generator over a fresh entropy-seeded source.
    pub fn from_entropy() -> Self {
        Self::new(RngSource::from_entropy())
    }

    /// Generator over a deterministic seeded source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource::seeded(seed))
    }
}

impl<R: RandomSource> ActivityGenerator<R> {
    /// Create a generator with the default firing profile.
    pub fn new(source: R) -> Self {
        Self::with_profile(source, ActivityProfile::default())
    }

    /// Create a generator with a custom firing profile.
    pub fn with_profile(source: R, profile: ActivityProfile) -> Self {
        Self {
            source,
            profile,
            draws: 0,
        }
    }

    pub fn profile(&self) -> &ActivityProfile {
        &self.profile
    }

    /// Total draws taken from the random source so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    fn draw(&mut self) -> f64 {
        self.draws += 1;
        self.source.next_uniform()
    }
}

impl<R: RandomSource> ActivitySource for ActivityGenerator<R> {
    fn next_sample(&mut self) -> ActivitySample {
        let pre = self.draw() > self.profile.pre_threshold;
        // A failed coupled draw falls through to the baseline draw
        let post = (pre && self.draw() > self.profile.coupled_threshold)
            || self.draw() > self.profile.baseline_threshold;
        ActivitySample::new(pre, post)
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
///
/// An empty script produces silence.
#[derive(Debug, Clone, Default)]
pub struct ScriptedActivity {
    samples: Vec<ActivitySample>,
    cursor: usize,
}

impl ScriptedActivity {
    pub fn new(samples: impl IntoIterator<Item = ActivitySample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            cursor: 0,
        }
    }

    /// The same sample on every step.
    pub fn constant(sample: ActivitySample) -> Self {
        Self::new([sample])
    }
}

impl ActivitySource for ScriptedActivity {
    fn next_sample(&mut self) -> ActivitySample {
        if self.samples.is_empty() {
            return ActivitySample::silent();
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ReplaySource;

    fn replay(values: &[f64]) -> ActivityGenerator<ReplaySource> {
        ActivityGenerator::new(ReplaySource::new(values.iter().copied()))
    }

    #[test]
    fn pre_spike_uses_coupled_threshold() {
        let mut gen = replay(&[0.71, 0.31]);
        assert_eq!(gen.next_sample(), ActivitySample::new(true, true));

        let mut gen = replay(&[0.71, 0.3]);
        assert_eq!(gen.next_sample(), ActivitySample::new(true, false));
    }

    #[test]
    fn silent_pre_uses_baseline_threshold() {
        let mut gen = replay(&[0.2, 0.5]);
        assert_eq!(gen.next_sample(), ActivitySample::new(false, false));

        let mut gen = replay(&[0.2, 0.95]);
        assert_eq!(gen.next_sample(), ActivitySample::new(false, true));
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly 0.7 does not fire pre; exactly 0.9 does not fire post
        let mut gen = replay(&[0.7, 0.9]);
        assert_eq!(gen.next_sample(), ActivitySample::silent());
    }

    #[test]
    fn failed_coupled_draw_falls_back_to_baseline() {
        // Pre fires, coupled draw fails, baseline draw fires post
        let mut gen = replay(&[0.8, 0.2, 0.95]);
        assert_eq!(gen.next_sample(), ActivitySample::coincident());
        assert_eq!(gen.draws(), 3);

        let mut gen = replay(&[0.8, 0.2, 0.5]);
        assert_eq!(gen.next_sample(), ActivitySample::new(true, false));
        assert_eq!(gen.draws(), 3);
    }

    #[test]
    fn draw_count_depends_on_branch() {
        // Coupled success: two draws
        let mut gen = replay(&[0.9, 0.5]);
        gen.next_sample();
        assert_eq!(gen.draws(), 2);

        // Silent pre: two draws
        let mut gen = replay(&[0.1, 0.5]);
        gen.next_sample();
        assert_eq!(gen.draws(), 2);
    }

    #[test]
    fn draws_are_consumed_in_order() {
        // (pre, coupled fails, baseline fails), (silent pre, baseline fires)
        let mut gen = replay(&[0.8, 0.2, 0.1, 0.1, 0.99]);
        assert_eq!(gen.next_sample(), ActivitySample::new(true, false));
        assert_eq!(gen.next_sample(), ActivitySample::new(false, true));
        assert_eq!(gen.draws(), 5);
    }

    #[test]
    fn firing_rates_match_profile() {
        let mut gen = ActivityGenerator::seeded(2024);
        let n = 200_000;
        let mut pre = 0u32;
        let mut post_given_pre = 0u32;
        let mut post_given_silent = 0u32;
        for _ in 0..n {
            let s = gen.next_sample();
            if s.pre {
                pre += 1;
                if s.post {
                    post_given_pre += 1;
                }
            } else if s.post {
                post_given_silent += 1;
            }
        }
        let silent = n - pre;
        let pre_rate = pre as f64 / n as f64;
        let coupled = post_given_pre as f64 / pre as f64;
        let baseline = post_given_silent as f64 / silent as f64;

        assert!((pre_rate - 0.3).abs() < 0.01, "pre rate {}", pre_rate);
        assert!((coupled - 0.73).abs() < 0.01, "coupled rate {}", coupled);
        assert!((baseline - 0.1).abs() < 0.01, "baseline rate {}", baseline);
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = ActivityGenerator::seeded(9);
        let mut b = ActivityGenerator::seeded(9);
        for _ in 0..500 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn custom_profile_can_silence_everything() {
        let profile = ActivityProfile {
            pre_threshold: 1.0,
            coupled_threshold: 1.0,
            baseline_threshold: 1.0,
        };
        let mut gen = ActivityGenerator::with_profile(RngSource::seeded(3), profile);
        assert!((0..1000).all(|_| gen.next_sample() == ActivitySample::silent()));
        assert_eq!(profile.pre_probability(), 0.0);
    }

    #[test]
    fn default_profile_probabilities() {
        let p = ActivityProfile::default();
        assert!((p.pre_probability() - 0.3).abs() < 1e-12);
        assert!((p.coupled_probability() - 0.73).abs() < 1e-12);
        assert!((p.baseline_probability() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn script_cycles_and_empty_script_is_silent() {
        let mut script = ScriptedActivity::new([
            ActivitySample::coincident(),
            ActivitySample::new(true, false),
        ]);
        assert_eq!(script.next_sample(), ActivitySample::coincident());
        assert_eq!(script.next_sample(), ActivitySample::new(true, false));
        assert_eq!(script.next_sample(), ActivitySample::coincident());

        let mut empty = ScriptedActivity::default();
        assert_eq!(empty.next_sample(), ActivitySample::silent());
    }
}
