//! Best-response dynamics
//!
//! Every row moves all its mass onto the actions with the highest payoff.
//! Maxima are compared with exact float equality. The 0/1 indicator rows
//! are blended through confusion as they are and normalised once, so tied
//! actions share the mass equally.

use super::{Dynamics, blend_receiver, blend_sender};
use crate::{Result, game::Game, matrix::Matrix, utils::argmax_indicator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestResponse;

impl Dynamics for BestResponse {
    fn name(&self) -> &str {
        "best response"
    }

    fn update_sender(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        game.check_sender(sender)?;
        let payoffs = game.sender_payoffs(receiver)?;
        blend_sender(&payoffs.map_rows(|_, row| argmax_indicator(row)), game)
    }

    fn update_receiver(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        game.check_receiver(receiver)?;
        let payoffs = game.receiver_payoffs(sender)?;
        blend_receiver(&payoffs.map_rows(|_, row| argmax_indicator(row)), game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_split_mass_uniformly() {
        let utility = Matrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let game = Game::new(utility, vec![0.5, 0.5], 2).unwrap();
        let sender = Matrix::from_rows(vec![vec![0.9, 0.1], vec![0.3, 0.7]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();

        let updated = BestResponse.update_sender(&sender, &receiver, &game).unwrap();
        assert_eq!(updated.row(0), &[0.5, 0.5]);
        assert_eq!(updated.row(1), &[0.5, 0.5]);
    }

    #[test]
    fn opting_out_wins_when_messages_cost_more_than_they_earn() {
        // the receiver always guesses state 1, which is worthless in state 0
        let utility = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let game = Game::new(utility, vec![0.5, 0.5], 2).unwrap().with_opt_out();
        let sender = Matrix::from_rows(vec![vec![0.4, 0.3, 0.3], vec![0.4, 0.3, 0.3]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![0.0, 1.0], vec![0.0, 1.0]]).unwrap();

        let updated = BestResponse.update_sender(&sender, &receiver, &game).unwrap();
        assert_eq!(updated.row(0), &[0.0, 0.0, 1.0]);
        assert_eq!(updated.row(1), &[0.5, 0.5, 0.0]);
    }

    #[test]
    fn tied_row_is_blended_before_normalising() {
        // state 0 ties both messages, state 1 prefers message 1
        let utility = Matrix::from_rows(vec![vec![1.0, 1.0], vec![0.0, 1.0]]).unwrap();
        let confusion = Matrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        let game = Game::new(utility, vec![0.5, 0.5], 2)
            .unwrap()
            .with_confusion(confusion)
            .unwrap();
        let sender = Matrix::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();

        let updated = BestResponse
            .update_sender(&sender, &Matrix::identity(2), &game)
            .unwrap();

        // C · [[1, 1], [0, 1]] = [[1, 1.5], [0.5, 1.5]]
        let expected = [[0.4, 0.6], [0.25, 0.75]];
        for (i, row) in expected.iter().enumerate() {
            for (j, want) in row.iter().enumerate() {
                assert!(
                    (updated.get(i, j) - want).abs() < 1e-12,
                    "row {i}: {:?}",
                    updated.row(i)
                );
            }
        }
    }

    #[test]
    fn indicator_rows_stay_pure_under_identity_confusion() {
        let utility = Matrix::from_rows(vec![vec![2.0, 0.5], vec![0.1, 1.0]]).unwrap();
        let game = Game::new(utility, vec![0.6, 0.4], 2).unwrap();
        let sender = Matrix::from_rows(vec![vec![0.3, 0.7], vec![0.4, 0.6]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![0.2, 0.8], vec![0.9, 0.1]]).unwrap();

        let updated = BestResponse.update_receiver(&sender, &receiver, &game).unwrap();
        assert_eq!(updated.to_rows(), vec![vec![1.0, 0.0], vec![1.0, 0.0]]);
    }
}
