//! Observer adapters for the convergence loop
//!
//! Observers allow composable reporting during a run without coupling the
//! loop to specific output formats.

use std::io::{self, Write};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::convergence::ConvergenceStatus;
use crate::{
    Result,
    game::Game,
    ports::{IterationSnapshot, Observer},
};

/// Console observer - prints the normalised expected utility every step
pub struct ConsoleObserver {
    out: Box<dyn Write + Send>,
    batch: bool,
}

impl ConsoleObserver {
    /// Print to standard output
    pub fn new(batch: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), batch)
    }

    /// Print to an arbitrary writer
    pub fn with_writer(out: Box<dyn Write + Send>, batch: bool) -> Self {
        Self { out, batch }
    }
}

impl Observer for ConsoleObserver {
    fn on_iteration(&mut self, snapshot: &IterationSnapshot<'_>) -> Result<()> {
        writeln!(self.out, "{}", snapshot.normalized_expected_utility)?;
        Ok(())
    }

    fn on_run_end(
        &mut self,
        _snapshot: &IterationSnapshot<'_>,
        status: ConvergenceStatus,
    ) -> Result<()> {
        if !self.batch {
            match status {
                ConvergenceStatus::Converged => writeln!(self.out, "Language converged!")?,
                _ => writeln!(self.out, "Language did not converge")?,
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Progress spinner observer - shows iteration count and expected utility
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, _game: &Game, dynamics: &str) -> Result<()> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {prefix} step {pos} ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?,
        );
        pb.set_prefix(dynamics.to_string());
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_iteration(&mut self, snapshot: &IterationSnapshot<'_>) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(snapshot.iteration as u64);
            pb.set_message(format!("EU {:.4}", snapshot.normalized_expected_utility));
        }
        Ok(())
    }

    fn on_run_end(
        &mut self,
        snapshot: &IterationSnapshot<'_>,
        status: ConvergenceStatus,
    ) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(snapshot.iteration as u64);
            pb.finish_with_message(format!(
                "EU {:.4}, {}",
                snapshot.normalized_expected_utility,
                if status.is_converged() {
                    "converged"
                } else {
                    "iteration limit"
                }
            ));
        }
        Ok(())
    }
}

/// Metrics observer - tracks summary figures of a run
#[derive(Debug, Default)]
pub struct MetricsObserver {
    iterations: usize,
    initial_utility: Option<f64>,
    final_utility: Option<f64>,
    best_utility: Option<f64>,
    status: Option<ConvergenceStatus>,
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub iterations: usize,
    pub initial_utility: Option<f64>,
    pub final_utility: Option<f64>,
    pub best_utility: Option<f64>,
    pub status: Option<ConvergenceStatus>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `on_iteration` callbacks received
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Change in normalised expected utility over the run
    pub fn utility_gain(&self) -> Option<f64> {
        Some(self.final_utility? - self.initial_utility?)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            iterations: self.iterations,
            initial_utility: self.initial_utility,
            final_utility: self.final_utility,
            best_utility: self.best_utility,
            status: self.status,
        }
    }

    fn record(&mut self, utility: f64) {
        self.initial_utility.get_or_insert(utility);
        self.final_utility = Some(utility);
        self.best_utility = Some(self.best_utility.map_or(utility, |best| best.max(utility)));
    }
}

impl Observer for MetricsObserver {
    fn on_iteration(&mut self, snapshot: &IterationSnapshot<'_>) -> Result<()> {
        self.iterations += 1;
        self.record(snapshot.normalized_expected_utility);
        Ok(())
    }

    fn on_run_end(
        &mut self,
        snapshot: &IterationSnapshot<'_>,
        status: ConvergenceStatus,
    ) -> Result<()> {
        self.record(snapshot.normalized_expected_utility);
        self.status = Some(status);
        Ok(())
    }
}
