//! Replicator dynamics
//!
//! Each strategy entry grows in proportion to its payoff relative to the
//! row's average payoff: the new row is `old ⊙ payoff`, renormalised.

use super::{Dynamics, finish_receiver, finish_sender};
use crate::{Result, game::Game, matrix::Matrix};

/// Multiplicative-weights update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Replicator;

impl Dynamics for Replicator {
    fn name(&self) -> &str {
        "replicator"
    }

    fn update_sender(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        game.check_sender(sender)?;
        // Messages earn their raw utility, opting out earns the cost.
        let cost = game.cost();
        let fitness = game.sender_payoffs(receiver)?.map(|payoff| payoff + cost);
        finish_sender(sender.hadamard(&fitness)?, game)
    }

    fn update_receiver(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        game.check_receiver(receiver)?;
        let payoffs = game.receiver_payoffs(sender)?;
        finish_receiver(receiver.hadamard(&payoffs)?, game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        let utility = Matrix::from_rows(vec![vec![2.0, 0.5], vec![0.1, 1.0]]).unwrap();
        Game::new(utility, vec![0.6, 0.4], 2).unwrap()
    }

    #[test]
    fn zero_fitness_row_becomes_uniform() {
        // The sender never uses message 1 in state 0 and message 0 pays nothing there.
        let utility = Matrix::from_rows(vec![vec![0.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let game = Game::new(utility, vec![0.5, 0.5], 2).unwrap();
        let sender = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.5, 0.5]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();

        let updated = Replicator.update_sender(&sender, &receiver, &game).unwrap();
        assert_eq!(updated.row(0), &[0.5, 0.5]);
    }

    #[test]
    fn pure_strategies_are_rest_points() {
        let sender = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let game = game();
        assert_eq!(
            Replicator.update_sender(&sender, &receiver, &game).unwrap(),
            sender
        );
        assert_eq!(
            Replicator.update_receiver(&sender, &receiver, &game).unwrap(),
            receiver
        );
    }

    #[test]
    fn opt_out_keeps_its_share_when_messages_earn_the_cost() {
        // uniform receiver: every message earns the average utility, which is the cost
        let utility = Matrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let game = Game::new(utility, vec![0.5, 0.5], 2).unwrap().with_opt_out();
        let sender = Matrix::from_rows(vec![vec![0.2, 0.3, 0.5], vec![0.6, 0.2, 0.2]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();

        let updated = Replicator.update_sender(&sender, &receiver, &game).unwrap();
        assert!(updated.max_abs_difference(&sender).unwrap() < 1e-12);
    }

    #[test]
    fn opt_out_column_is_blended_with_imprecision() {
        let game = game().with_opt_out().with_imprecision();
        let sender =
            Matrix::from_rows(vec![vec![0.2, 0.5, 0.3], vec![0.4, 0.4, 0.2]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![0.2, 0.8], vec![0.9, 0.1]]).unwrap();

        let updated = Replicator.update_sender(&sender, &receiver, &game).unwrap();

        // fitness [[0.8, 1.85, 0.9], [0.82, 0.19, 0.9]], then C · S and renormalise
        let expected = [[0.20679, 0.57215, 0.22105], [0.52132, 0.18037, 0.29831]];
        for (i, row) in expected.iter().enumerate() {
            for (j, want) in row.iter().enumerate() {
                assert!(
                    (updated.get(i, j) - want).abs() < 1e-4,
                    "row {i}: {:?}",
                    updated.row(i)
                );
            }
        }
        assert!(updated.is_row_stochastic(1e-9));
    }
}
