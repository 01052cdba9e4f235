//! Convergence loop for Sender/Receiver dynamics

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Result,
    dynamics::Dynamics,
    game::Game,
    matrix::Matrix,
    ports::{IterationSnapshot, Observer},
};

/// Both strategies must change by less than this (summed absolute
/// difference) in one step for the run to count as converged.
pub const CONVERGENCE_TOLERANCE: f64 = 0.01;

/// Convergence settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceConfig {
    /// Threshold on the per-step L1 change of each strategy
    pub tolerance: f64,

    /// Optional bound on the number of update steps; `None` runs until
    /// convergence
    pub max_iterations: Option<usize>,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            tolerance: CONVERGENCE_TOLERANCE,
            max_iterations: None,
        }
    }
}

/// Where the loop is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceStatus {
    Running,
    Converged,
    /// Stopped by `max_iterations` before reaching the tolerance
    IterationLimit,
}

impl ConvergenceStatus {
    pub fn is_converged(self) -> bool {
        self == Self::Converged
    }
}

/// Strategies after one update step and how much they moved
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub sender: Matrix,
    pub receiver: Matrix,
    pub sender_change: f64,
    pub receiver_change: f64,
}

/// Result of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceResult {
    pub status: ConvergenceStatus,

    /// Number of update steps performed
    pub iterations: usize,

    pub sender: Matrix,
    pub receiver: Matrix,

    /// L1 change of each strategy in the last step
    pub sender_change: f64,
    pub receiver_change: f64,

    /// Normalised expected utility of the final profile
    pub normalized_expected_utility: f64,
}

/// Apply one update step.
///
/// The Sender is updated first and the Receiver then responds to the
/// *updated* Sender; the two updates are not simultaneous.
pub fn step(
    dynamics: &dyn Dynamics,
    game: &Game,
    sender: &Matrix,
    receiver: &Matrix,
) -> Result<StepOutcome> {
    let new_sender = dynamics.update_sender(sender, receiver, game)?;
    let new_receiver = dynamics.update_receiver(&new_sender, receiver, game)?;
    Ok(StepOutcome {
        sender_change: new_sender.l1_distance(sender)?,
        receiver_change: new_receiver.l1_distance(receiver)?,
        sender: new_sender,
        receiver: new_receiver,
    })
}

/// Drives a dynamics rule to a fixed point
pub struct ConvergencePipeline {
    config: ConvergenceConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl ConvergencePipeline {
    /// Create a new pipeline
    pub fn new(config: ConvergenceConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ConvergenceConfig {
        &self.config
    }

    /// Iterate from the given strategies until both stabilise or the
    /// iteration bound is reached.
    ///
    /// # Errors
    ///
    /// Fails if the strategies do not fit the game, if the dynamics rule
    /// rejects the update (see [`crate::dynamics::BaseDynamics`]) or if an
    /// observer fails.
    pub fn run(
        &mut self,
        dynamics: &dyn Dynamics,
        game: &Game,
        sender: Matrix,
        receiver: Matrix,
    ) -> Result<ConvergenceResult> {
        game.check_sender(&sender)?;
        game.check_receiver(&receiver)?;

        for observer in &mut self.observers {
            observer.on_run_start(game, dynamics.name())?;
        }

        let mut sender = sender;
        let mut receiver = receiver;
        let mut status = ConvergenceStatus::Running;
        let mut iterations = 0;
        let mut sender_change = f64::INFINITY;
        let mut receiver_change = f64::INFINITY;

        while status == ConvergenceStatus::Running {
            if self
                .config
                .max_iterations
                .is_some_and(|limit| iterations >= limit)
            {
                status = ConvergenceStatus::IterationLimit;
                break;
            }

            let utility = game.normalized_expected_utility(&sender, &receiver)?;
            let snapshot = IterationSnapshot {
                iteration: iterations,
                game,
                sender: &sender,
                receiver: &receiver,
                normalized_expected_utility: utility,
            };
            for observer in &mut self.observers {
                observer.on_iteration(&snapshot)?;
            }

            let outcome = step(dynamics, game, &sender, &receiver)?;
            iterations += 1;
            sender_change = outcome.sender_change;
            receiver_change = outcome.receiver_change;
            sender = outcome.sender;
            receiver = outcome.receiver;

            debug!(
                iteration = iterations,
                expected_utility = utility,
                sender_change,
                receiver_change,
                "dynamics step"
            );

            if sender_change < self.config.tolerance && receiver_change < self.config.tolerance {
                status = ConvergenceStatus::Converged;
            }
        }

        match status {
            ConvergenceStatus::Converged => {
                info!(iterations, dynamics = dynamics.name(), "language converged")
            }
            _ => warn!(
                iterations,
                sender_change, receiver_change, "stopped at iteration limit before converging"
            ),
        }

        let normalized_expected_utility = game.normalized_expected_utility(&sender, &receiver)?;
        let snapshot = IterationSnapshot {
            iteration: iterations,
            game,
            sender: &sender,
            receiver: &receiver,
            normalized_expected_utility,
        };
        for observer in &mut self.observers {
            observer.on_run_end(&snapshot, status)?;
        }

        Ok(ConvergenceResult {
            status,
            iterations,
            sender,
            receiver,
            sender_change,
            receiver_change,
            normalized_expected_utility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{BaseDynamics, BestResponse, Replicator};

    fn game() -> Game {
        let utility = Matrix::from_rows(vec![vec![2.0, 0.5], vec![0.1, 1.0]]).unwrap();
        Game::new(utility, vec![0.6, 0.4], 2).unwrap()
    }

    fn sender() -> Matrix {
        Matrix::from_rows(vec![vec![0.3, 0.7], vec![0.4, 0.6]]).unwrap()
    }

    fn receiver() -> Matrix {
        Matrix::from_rows(vec![vec![0.2, 0.8], vec![0.9, 0.1]]).unwrap()
    }

    #[test]
    fn receiver_responds_to_updated_sender() {
        let game = game();
        let outcome = step(&BestResponse, &game, &sender(), &receiver()).unwrap();
        // With the updated sender [[0,1],[1,0]], message 0 signals state 1.
        assert_eq!(outcome.sender.to_rows(), vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(
            outcome.receiver.to_rows(),
            vec![vec![0.0, 1.0], vec![1.0, 0.0]]
        );
    }

    #[test]
    fn best_response_converges_quickly() {
        let mut pipeline = ConvergencePipeline::new(ConvergenceConfig::default());
        let result = pipeline
            .run(&BestResponse, &game(), sender(), receiver())
            .unwrap();
        assert_eq!(result.status, ConvergenceStatus::Converged);
        assert!(result.iterations <= 3, "took {}", result.iterations);
        assert!(result.sender_change < CONVERGENCE_TOLERANCE);
    }

    #[test]
    fn iteration_limit_stops_the_loop() {
        let config = ConvergenceConfig {
            max_iterations: Some(1),
            ..ConvergenceConfig::default()
        };
        let mut pipeline = ConvergencePipeline::new(config);
        let result = pipeline
            .run(&Replicator, &game(), sender(), receiver())
            .unwrap();
        assert_eq!(result.status, ConvergenceStatus::IterationLimit);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn base_dynamics_error_propagates() {
        let mut pipeline = ConvergencePipeline::new(ConvergenceConfig::default());
        let err = pipeline
            .run(&BaseDynamics, &game(), sender(), receiver())
            .unwrap_err();
        assert!(matches!(err, crate::Error::NotSupported { .. }));
    }

    #[test]
    fn mismatched_strategies_are_rejected_before_running() {
        let mut pipeline = ConvergencePipeline::new(ConvergenceConfig::default());
        let err = pipeline
            .run(&Replicator, &game(), Matrix::zeros(3, 2), receiver())
            .unwrap_err();
        assert!(matches!(err, crate::Error::ShapeMismatch { .. }));
    }
}
