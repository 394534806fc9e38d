//! Batch runs: one independent simulation per region.
//!
//! Each region gets its own driver, weight, random source and rows. Regions
//! run one after another; nothing is shared between them. With a base seed,
//! region `i` is seeded with `seed + i` so a batch is reproducible as a whole
//! while its regions still see different spike trains.

use crate::export::{default_output_path, save_results, CsvLayout};
use crate::metrics::RunStats;
use crate::simulation::Simulation;
use std::path::{Path, PathBuf};
use synsim_core::error::Result;
use synsim_core::types::{ResultRow, SimulationParameters, Step};
use tracing::debug;

/// A completed run with its rows and summary.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub params: SimulationParameters,
    /// Seed the run was started from, if it was seeded.
    pub seed: Option<u64>,
    pub rows: Vec<ResultRow>,
    pub stats: RunStats,
}

impl CompletedRun {
    pub fn region(&self) -> Option<&str> {
        self.params.region.as_deref()
    }

    /// CSV layout matching whether the run is labelled.
    pub fn layout(&self) -> CsvLayout {
        CsvLayout::for_region(self.region())
    }

    /// Where the run is saved unless told otherwise.
    pub fn default_output_path(&self) -> PathBuf {
        default_output_path(self.region())
    }

    /// Save the rows to `path` in this run's layout.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_results(path, &self.rows, self.layout())
    }
}

/// Run one simulation to completion.
///
/// `on_step` is called after every step with `(steps_taken, total_steps)`.
pub fn execute<F>(params: SimulationParameters, seed: Option<u64>, mut on_step: F) -> CompletedRun
where
    F: FnMut(Step, Step),
{
    let mut sim = match seed {
        Some(seed) => Simulation::seeded(params.clone(), seed),
        None => Simulation::new(params.clone()),
    };

    let total = sim.total_steps();
    while sim.step().is_some() {
        on_step(sim.steps_taken(), total);
    }

    let rows = sim.into_rows();
    let stats = RunStats::from_rows(params.initial_weight, &rows);
    CompletedRun {
        params,
        seed,
        rows,
        stats,
    }
}

/// Run one simulation without progress reporting.
pub fn run_single(params: SimulationParameters, seed: Option<u64>) -> CompletedRun {
    execute(params, seed, |_, _| {})
}

/// Parameters and seed for each run of a region batch.
///
/// Each region overrides `base.region`; with a base seed, region `i` gets
/// `seed + i`. Blank labels count as unset and are skipped, so a list with
/// no usable label plans `base` once as given.
pub fn plan_regions(
    base: &SimulationParameters,
    regions: &[String],
    seed: Option<u64>,
) -> Vec<(SimulationParameters, Option<u64>)> {
    let labelled: Vec<&String> = regions.iter().filter(|r| !r.trim().is_empty()).collect();
    if labelled.is_empty() {
        return vec![(base.clone(), seed)];
    }

    labelled
        .into_iter()
        .enumerate()
        .map(|(i, region)| {
            let params = base.clone().with_region(region.as_str());
            (params, seed.map(|s| s.wrapping_add(i as u64)))
        })
        .collect()
}

/// Run one simulation per region, sequentially.
pub fn run_regions(base: &SimulationParameters, regions: &[String], seed: Option<u64>) -> Vec<CompletedRun> {
    plan_regions(base, regions, seed)
        .into_iter()
        .map(|(params, seed)| {
            debug!(region = params.region_label(), seed = ?seed, "running region");
            run_single(params, seed)
        })
        .collect()
}
