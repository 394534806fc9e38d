//! Run simulations and save their results.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use synsim::prelude::*;

/// Runs with more steps than this get a progress bar.
const PROGRESS_THRESHOLD: Step = 10_000;

/// What to run and where to put it.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub params: SimulationParameters,
    pub seed: Option<u64>,
    /// Explicit output file; only valid for a single run.
    pub output: Option<PathBuf>,
    /// Region labels, one run each. Empty runs `params` once.
    pub regions: Vec<String>,
    /// Suppress progress and summaries.
    pub quiet: bool,
}

pub fn run(request: RunRequest) -> Result<()> {
    let plan = plan_regions(&request.params, &request.regions, request.seed);

    if request.output.is_some() && plan.len() > 1 {
        return Err(SynsimError::Output(OutputError::InvalidTarget(format!(
            "one output file cannot hold {} regions; drop --output to write one file per region",
            plan.len()
        )))
        .into());
    }

    for (params, seed) in plan {
        let label = describe(&params);
        if !request.quiet {
            println!("{} Running simulation{}...", "→".blue(), label);
        }

        let completed = run_with_progress(params, seed, request.quiet)?;
        let path = request
            .output
            .clone()
            .unwrap_or_else(|| completed.default_output_path());
        completed
            .save(&path)
            .with_context(|| format!("Failed to save results{}", label))?;

        if !request.quiet {
            print_summary(&completed, &path);
        }
    }

    Ok(())
}

fn run_with_progress(params: SimulationParameters, seed: Option<u64>, quiet: bool) -> Result<CompletedRun> {
    let total = params.step_count();
    if quiet || total <= PROGRESS_THRESHOLD {
        return Ok(run_single(params, seed));
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} steps ({eta})")?
            .progress_chars("#>-"),
    );

    let completed = execute(params, seed, |_, _| pb.inc(1));
    pb.finish_and_clear();
    Ok(completed)
}

fn describe(params: &SimulationParameters) -> String {
    match params.region.as_deref() {
        Some(region) => format!(" for region '{}'", region),
        None => String::new(),
    }
}

fn print_summary(completed: &CompletedRun, path: &Path) {
    let stats = &completed.stats;
    let change = stats.net_change();
    let change = if change >= 0.0 {
        format!("{:+.4}", change).green()
    } else {
        format!("{:+.4}", change).red()
    };

    println!("{} Simulation complete!", "✓".green().bold());
    println!("  Steps: {}", stats.steps.to_string().cyan());
    println!(
        "  Weight: {} → {} ({})",
        format!("{:.4}", stats.initial_weight).yellow(),
        format!("{:.4}", stats.final_weight).green(),
        change
    );
    println!(
        "  Range: {:.4} to {:.4}, mean {:.4}",
        stats.min_weight, stats.max_weight, stats.mean_weight
    );
    println!(
        "  Spikes: pre {} ({:.1}%), post {} ({:.1}%), coincident {}",
        stats.pre_spikes,
        stats.pre_rate() * 100.0,
        stats.post_spikes,
        stats.post_rate() * 100.0,
        stats.coincident_spikes
    );
    if let Some(seed) = completed.seed {
        println!("  Seed: {}", seed);
    }
    println!("  Data saved to {}", path.display().to_string().cyan());
}
