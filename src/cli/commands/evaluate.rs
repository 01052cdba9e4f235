//! Evaluate command - test saved strategies for proper vagueness

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    analysis::{self, VaguenessReport},
    cli::output::{print_kv, print_section, print_vagueness_report},
    config::SimulationConfig,
    export::StrategyCsvExporter,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate saved strategies for proper vagueness")]
pub struct EvaluateArgs {
    /// Configuration the strategies were produced with
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Sender strategy CSV
    #[arg(long, short = 's')]
    pub sender: PathBuf,

    /// Receiver strategy CSV
    #[arg(long, short = 'r')]
    pub receiver: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let report = evaluate(&args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_section("Vagueness evaluation");
        print_kv("Sender", &args.sender.display().to_string());
        print_kv("Receiver", &args.receiver.display().to_string());
        print_vagueness_report(&report);
        println!("\n{}", report.verdict());
    }
    Ok(())
}

/// Load the strategies and evaluate them against the configured similarity
pub fn evaluate(args: &EvaluateArgs) -> Result<VaguenessReport> {
    let config = SimulationConfig::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;
    let game = config.build_game().context("Failed to build game")?;

    let sender = StrategyCsvExporter::read_matrix(&args.sender)
        .with_context(|| format!("Failed to read {}", args.sender.display()))?;
    let receiver = StrategyCsvExporter::read_matrix(&args.receiver)
        .with_context(|| format!("Failed to read {}", args.receiver.display()))?;

    if sender.cols() != game.n_sender_actions() {
        bail!(
            "Sender has {} columns but the configuration has {} sender actions",
            sender.cols(),
            game.n_sender_actions()
        );
    }
    game.check_receiver(&receiver)
        .context("Receiver does not fit the configuration")?;

    analysis::evaluate(&sender, &receiver, game.similarity())
        .context("Failed to evaluate vagueness")
}
