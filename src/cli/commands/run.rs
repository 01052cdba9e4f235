//! Run command - evolve a language from a configuration file

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    analysis::{self, VaguenessReport},
    cli::output::{
        format_verdict, print_kv, print_matrix, print_section, print_vagueness_report,
    },
    config::SimulationConfig,
    dynamics::Dynamics,
    export::{StrategyCsvExporter, StrategyFiles},
    pipeline::{
        ConsoleObserver, ConvergencePipeline, ConvergenceResult, ConvergenceStatus,
        ProgressObserver,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Run the dynamics until the language converges")]
pub struct RunArgs {
    /// Simulation configuration (TOML, or JSON with a .json extension)
    pub config: PathBuf,

    /// Only print the expected utility of each step
    #[arg(long)]
    pub batch: bool,

    /// Prefix of the strategy CSV files (defaults to the current time)
    #[arg(long, short = 'o')]
    pub output_prefix: Option<String>,

    /// Random seed, overrides the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many steps, overrides the configuration
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Write a JSON summary of the run
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show a progress spinner
    #[arg(long)]
    pub progress: bool,
}

/// Everything a run produced
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub dynamics: String,
    pub seed: u64,
    pub status: ConvergenceStatus,
    pub iterations: usize,
    pub normalized_expected_utility: f64,
    pub sender_file: PathBuf,
    pub receiver_file: PathBuf,
    pub vagueness: VaguenessReport,
}

pub fn execute(args: RunArgs) -> Result<()> {
    run(&args).map(|_| ())
}

/// Execute the command and return what it produced
pub fn run(args: &RunArgs) -> Result<RunOutcome> {
    let mut config = SimulationConfig::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;
    let seed = args
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random::<u64>);
    config.seed = Some(seed);
    if args.max_iterations.is_some() {
        config.max_iterations = args.max_iterations;
    }

    let game = config.build_game().context("Failed to build game")?;
    let dynamics = config.build_dynamics().context("Invalid dynamics")?;
    let (sender, receiver) = config.initial_strategies(&game);

    if !args.batch {
        print_section("Vagueness simulation");
        print_kv("Dynamics", dynamics.name());
        print_kv("States", &game.n_states().to_string());
        print_kv("Messages", &game.n_messages().to_string());
        print_kv("Opt-out", &game.has_opt_out().to_string());
        print_kv("Seed", &seed.to_string());
        println!();
    }

    let mut pipeline = ConvergencePipeline::new(config.convergence_config())
        .with_observer(Box::new(ConsoleObserver::new(args.batch)));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result: ConvergenceResult = pipeline
        .run(&dynamics, &game, sender, receiver)
        .context("Simulation failed")?;

    let vagueness = analysis::evaluate(&result.sender, &result.receiver, game.similarity())
        .context("Failed to evaluate vagueness")?;

    let prefix = args
        .output_prefix
        .clone()
        .unwrap_or_else(default_prefix);
    let StrategyFiles { sender, receiver } =
        StrategyCsvExporter::export(&prefix, &result.sender, &result.receiver)
            .with_context(|| format!("Failed to write strategies with prefix {prefix}"))?;

    if !args.batch {
        println!("{}", format_verdict(&vagueness, result.status.is_converged()));
        print_matrix("Sender", &result.sender);
        print_matrix("Receiver", &result.receiver);
        print_vagueness_report(&vagueness);
        print_kv("Sender file", &sender.display().to_string());
        print_kv("Receiver file", &receiver.display().to_string());
    }

    let outcome = RunOutcome {
        dynamics: dynamics.name().to_string(),
        seed,
        status: result.status,
        iterations: result.iterations,
        normalized_expected_utility: result.normalized_expected_utility,
        sender_file: sender,
        receiver_file: receiver,
        vagueness,
    };

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary {}", path.display()))?;
        to_writer_pretty(file, &outcome).context("Failed to write summary")?;
    }

    Ok(outcome)
}

/// Local timestamp, e.g. `20240131-142501`
fn default_prefix() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}
