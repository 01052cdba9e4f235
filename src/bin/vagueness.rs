//! Vagueness CLI - evolve and evaluate vague languages in signaling games
//!
//! This CLI provides:
//! - Running replicator, best-response or quantal-response dynamics from a
//!   configuration file until the language converges
//! - Evaluating saved strategies against the proper-vagueness criteria
//!
//! Log verbosity is controlled with `RUST_LOG`, e.g. `RUST_LOG=vagueness=debug`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vagueness")]
#[command(version, about = "Simulate the evolution of vague languages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dynamics from a configuration file
    Run(vagueness::cli::commands::run::RunArgs),

    /// Evaluate saved Sender and Receiver strategies
    Evaluate(vagueness::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => vagueness::cli::commands::run::execute(args),
        Commands::Evaluate(args) => vagueness::cli::commands::evaluate::execute(args),
    }
}
