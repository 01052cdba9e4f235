//! Observer port - abstraction for watching a simulation run
//!
//! This port defines the interface for observing the convergence loop,
//! allowing plotting, console reporting or progress display without
//! coupling the loop to any of them.

use crate::{
    Result, game::Game, matrix::Matrix, pipeline::convergence::ConvergenceStatus,
};

/// State of the strategy profile at one point of a run
#[derive(Debug, Clone, Copy)]
pub struct IterationSnapshot<'a> {
    /// Number of completed update steps
    pub iteration: usize,
    /// The game, including priors, utility and confusion
    pub game: &'a Game,
    pub sender: &'a Matrix,
    pub receiver: &'a Matrix,
    /// Expected utility divided by the total of the utility matrix
    pub normalized_expected_utility: f64,
}

/// Observer trait for monitoring a run
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_run_start(game, dynamics)` - Once at the beginning
/// 2. `on_iteration(snapshot)` - Before every update step, with the
///    strategies that step starts from
/// 3. `on_run_end(snapshot, status)` - Once with the final strategies
///
/// A run without observers behaves identically (batch mode).
///
/// # Examples
///
/// ```no_run
/// use vagueness::ports::{IterationSnapshot, Observer};
///
/// struct CountingObserver {
///     steps: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_iteration(&mut self, _snapshot: &IterationSnapshot<'_>) -> vagueness::Result<()> {
///         self.steps += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first update.
    ///
    /// # Parameters
    ///
    /// * `game` - The game being played
    /// * `dynamics` - Name of the update rule
    fn on_run_start(&mut self, _game: &Game, _dynamics: &str) -> Result<()> {
        Ok(())
    }

    /// Called before every update step.
    fn on_iteration(&mut self, _snapshot: &IterationSnapshot<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once when the loop stops, with the final strategies.
    fn on_run_end(
        &mut self,
        _snapshot: &IterationSnapshot<'_>,
        _status: ConvergenceStatus,
    ) -> Result<()> {
        Ok(())
    }
}
