//! Simulation: the fixed-timestep driver.
//!
//! The driver owns everything mutable in a run: the synaptic weight, the
//! activity source and the growing list of result rows. Nothing else touches
//! them while the run is in progress.
//!
//! Each step:
//! 1. Draw one activity sample
//! 2. Advance the weight under the Hebbian rule
//! 3. Append a result row stamped with `t = step * dt`
//!
//! Time is computed from the step index, never accumulated, so long runs do
//! not drift and the step count is known before the run starts
//! (see [`SimulationParameters::step_count`]).

use synsim_core::activity::{ActivityGenerator, ActivitySource};
use synsim_core::plasticity::{HebbianRule, SynapticWeight};
use synsim_core::types::{ResultRow, SimulationParameters, Step};
use tracing::{debug, info, warn};

/// Upper bound on rows reserved up front; larger runs grow on demand.
const MAX_PREALLOCATED_ROWS: u64 = 1 << 20;

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    NotStarted,
    Running,
    Completed,
}

/// A single-synapse simulation run.
pub struct Simulation<A = ActivityGenerator> {
    params: SimulationParameters,
    rule: HebbianRule,
    activity: A,
    weight: SynapticWeight,
    rows: Vec<ResultRow>,
    state: SimulationState,
    step: Step,
    total_steps: Step,
}

impl Simulation<ActivityGenerator> {
    /// Create a run driven by an entropy-seeded activity generator.
    pub fn new(params: SimulationParameters) -> Self {
        Self::with_activity(params, ActivityGenerator::from_entropy())
    }

    /// Create a reproducible run from a seed.
    pub fn seeded(params: SimulationParameters, seed: u64) -> Self {
        Self::with_activity(params, ActivityGenerator::seeded(seed))
    }
}

impl<A: ActivitySource> Simulation<A> {
    /// Create a run driven by any activity source.
    pub fn with_activity(params: SimulationParameters, activity: A) -> Self {
        let total_steps = params.step_count();
        let rule = HebbianRule::from_parameters(&params);
        let weight = SynapticWeight::new(params.initial_weight);
        let capacity = total_steps.min(MAX_PREALLOCATED_ROWS) as usize;

        Self {
            params,
            rule,
            activity,
            weight,
            rows: Vec::with_capacity(capacity),
            state: SimulationState::NotStarted,
            step: 0,
            total_steps,
        }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Current synaptic weight.
    pub fn weight(&self) -> f64 {
        self.weight.value()
    }

    /// Steps taken so far.
    pub fn steps_taken(&self) -> Step {
        self.step
    }

    /// Steps the run will take in total.
    pub fn total_steps(&self) -> Step {
        self.total_steps
    }

    /// Rows recorded so far, in chronological order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn is_complete(&self) -> bool {
        self.state == SimulationState::Completed
    }

    /// Advance one step and return the row it recorded.
    ///
    /// The first call moves the run from `NotStarted` to `Running`. Returns
    /// `None` once the run has completed.
    pub fn step(&mut self) -> Option<&ResultRow> {
        match self.state {
            SimulationState::Completed => return None,
            SimulationState::NotStarted => self.start(),
            SimulationState::Running => {}
        }

        if self.step >= self.total_steps {
            self.finish();
            return None;
        }

        let time = self.params.time_at(self.step);
        let sample = self.activity.next_sample();
        let weight = self.weight.update(sample, &self.rule);
        self.rows
            .push(ResultRow::new(time, sample, weight, self.params.region_label()));
        self.step += 1;

        if self.step >= self.total_steps {
            self.finish();
        }
        self.rows.last()
    }

    /// Run to completion and return every recorded row.
    ///
    /// Calling `run` on a completed simulation returns the existing rows
    /// without stepping again.
    pub fn run(&mut self) -> &[ResultRow] {
        while self.step().is_some() {}
        &self.rows
    }

    /// Consume the simulation, keeping only its rows.
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    fn start(&mut self) {
        self.state = SimulationState::Running;
        if !self.params.is_well_formed() {
            warn!(
                duration = self.params.duration,
                dt = self.params.dt,
                "degenerate simulation parameters, run produces no steps"
            );
        } else if !(0.0..=1.0).contains(&self.params.initial_weight) {
            warn!(
                initial_weight = self.params.initial_weight,
                "initial weight outside [0, 1], clamped on the first step"
            );
        }
        debug!(
            region = self.params.region_label(),
            steps = self.total_steps,
            dt = self.params.dt,
            "simulation started"
        );
    }

    fn finish(&mut self) {
        self.state = SimulationState::Completed;
        info!(
            region = self.params.region_label(),
            steps = self.step,
            final_weight = self.weight.value(),
            "simulation completed"
        );
    }
}
