//! Synsim CLI - simulate Hebbian plasticity of a single synapse.

mod commands;
mod config;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use colored::Colorize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

use crate::commands::run::RunRequest;
use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "synsim")]
#[command(author, version, about = "Synsim - Hebbian plasticity of a single synapse", long_about = None)]
struct Cli {
    /// Nothing (defaults), a parameter file, or LEARNING_RATE DECAY_RATE SIM_DURATION
    #[arg(value_name = "INPUTS", allow_negative_numbers = true)]
    inputs: Vec<String>,

    /// Output CSV file (single region only)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Region label; repeat for one run and one file per region
    #[arg(long = "region", value_name = "NAME")]
    regions: Vec<String>,

    /// Write the default parameters as TOML and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// How the positional inputs select parameters.
#[derive(Debug, PartialEq)]
enum Inputs<'a> {
    Defaults,
    File(&'a str),
    Rates {
        learning_rate: &'a str,
        decay_rate: &'a str,
        sim_duration: &'a str,
    },
}

impl<'a> Inputs<'a> {
    fn classify(inputs: &'a [String]) -> Option<Self> {
        match inputs {
            [] => Some(Inputs::Defaults),
            [path] => Some(Inputs::File(path)),
            [learning_rate, decay_rate, sim_duration] => Some(Inputs::Rates {
                learning_rate,
                decay_rate,
                sim_duration,
            }),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    real_main(std::env::args_os())
}

/// Parse `args` (program name first), run, and map the outcome to an exit code.
fn real_main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose, cli.quiet);

    let Some(inputs) = Inputs::classify(&cli.inputs) else {
        eprintln!(
            "{} expected 0, 1 or 3 inputs, got {}",
            "error:".red().bold(),
            cli.inputs.len()
        );
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    };

    match dispatch(&cli, inputs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli, inputs: Inputs<'_>) -> Result<()> {
    if let Some(path) = &cli.write_config {
        return commands::init::run(path, cli.quiet);
    }

    let config = match inputs {
        Inputs::Defaults => RunConfig::default(),
        Inputs::File(path) => RunConfig::load(Path::new(path))?,
        Inputs::Rates {
            learning_rate,
            decay_rate,
            sim_duration,
        } => RunConfig::from_rates(learning_rate, decay_rate, sim_duration)?,
    };

    commands::run::run(RunRequest {
        params: config.params,
        seed: cli.seed.or(config.seed),
        output: cli.output.clone().or(config.output),
        regions: cli.regions.clone(),
        quiet: cli.quiet,
    })
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    // Only the first call installs a subscriber
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use synsim::prelude::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("synsim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn classifies_positional_counts() {
        assert_eq!(Inputs::classify(&parse(&[]).inputs), Some(Inputs::Defaults));
        assert_eq!(
            Inputs::classify(&parse(&["params.toml"]).inputs),
            Some(Inputs::File("params.toml"))
        );
        assert_eq!(
            Inputs::classify(&parse(&["0.5", "0.1", "10"]).inputs),
            Some(Inputs::Rates {
                learning_rate: "0.5",
                decay_rate: "0.1",
                sim_duration: "10",
            })
        );
        assert_eq!(Inputs::classify(&parse(&["0.5", "0.1"]).inputs), None);
        assert_eq!(Inputs::classify(&parse(&["1", "2", "3", "4"]).inputs), None);
    }

    #[test]
    fn negative_numbers_are_inputs() {
        let cli = parse(&["-0.5", "0.1", "10"]);
        assert_eq!(cli.inputs, vec!["-0.5", "0.1", "10"]);
    }

    #[test]
    fn options_parse() {
        let cli = parse(&[
            "--seed", "9", "--region", "cortex", "--region", "striatum", "-vv", "-o", "out.csv",
        ]);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.regions, vec!["cortex", "striatum"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let args = ["synsim", "-q", "-v"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn bad_seed_is_a_parse_error() {
        let err = Cli::try_parse_from(["synsim", "--seed", "soon"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn command_line_seed_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("p.toml");
        std::fs::write(
            &params,
            "sim_duration = 0.1\ndt = 0.01\nlearning_rate = 0.5\ndecay_rate = 0.1\ninitial_weight = 0.5\nseed = 1\n",
        )
        .unwrap();
        let out = dir.path().join("out.csv");

        let args = [
            params.to_str().unwrap(),
            "--seed",
            "2",
            "-q",
            "-o",
            out.to_str().unwrap(),
        ];
        let cli = parse(&args);
        let inputs = Inputs::classify(&cli.inputs).unwrap();
        dispatch(&cli, inputs).unwrap();

        let expected = run_single(SimulationParameters::new(0.1, 0.01, 0.5, 0.1, 0.5), Some(2));
        assert_eq!(load_results(&out).unwrap(), expected.rows);
    }

    fn exit_code(args: &[&str]) -> String {
        let code = real_main(std::iter::once("synsim").chain(args.iter().copied()));
        format!("{:?}", code)
    }

    fn failure() -> String {
        format!("{:?}", ExitCode::FAILURE)
    }

    fn success() -> String {
        format!("{:?}", ExitCode::SUCCESS)
    }

    #[test]
    fn wrong_input_count_exits_with_failure() {
        assert_eq!(exit_code(&["1", "2"]), failure());
        assert_eq!(exit_code(&["1", "2", "3", "4"]), failure());
    }

    #[test]
    fn non_numeric_rate_exits_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        assert_eq!(exit_code(&["a", "0.1", "1", "-q", "-o", out.to_str().unwrap()]), failure());
        assert!(!out.exists());
    }

    #[test]
    fn parse_errors_and_help_map_to_exit_codes() {
        assert_eq!(exit_code(&["--seed", "soon"]), failure());
        assert_eq!(exit_code(&["--help"]), success());
    }

    #[test]
    fn completed_run_exits_with_success() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        assert_eq!(
            exit_code(&["0.5", "0.1", "0.1", "--seed", "1", "-q", "-o", out.to_str().unwrap()]),
            success()
        );
        assert_eq!(load_results(&out).unwrap().len(), 10);
    }

    #[test]
    fn blank_region_writes_plain_table() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let args = ["0.5", "0.1", "0.1", "--region", "", "-q", "-o", out.to_str().unwrap()];
        assert_eq!(exit_code(&args), success());
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("time,pre_activity,post_activity,synaptic_weight\n"));
    }
}
