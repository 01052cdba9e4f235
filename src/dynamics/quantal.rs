//! Quantal-response (logit) dynamics
//!
//! Rows become a softmax of the payoffs scaled by the rationality `λ`.
//! As `λ → ∞` this approaches best response; as `λ → 0`, the uniform
//! strategy.

use super::{Dynamics, finish_receiver, finish_sender};
use crate::{Error, Result, game::Game, matrix::Matrix, utils::scaled_softmax};

/// Logit response with rationality `λ > 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantalResponse {
    rationality: f64,
}

impl QuantalResponse {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `rationality` is
    /// positive and finite.
    pub fn new(rationality: f64) -> Result<Self> {
        if !(rationality.is_finite() && rationality > 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("rationality must be positive, got {rationality}"),
            });
        }
        Ok(Self { rationality })
    }

    pub fn rationality(&self) -> f64 {
        self.rationality
    }
}

impl Dynamics for QuantalResponse {
    fn name(&self) -> &str {
        "quantal best response"
    }

    fn update_sender(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        game.check_sender(sender)?;
        let payoffs = game.sender_payoffs(receiver)?;
        finish_sender(
            payoffs.map_rows(|_, row| scaled_softmax(row, self.rationality)),
            game,
        )
    }

    fn update_receiver(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        game.check_receiver(receiver)?;
        let payoffs = game.receiver_payoffs(sender)?;
        finish_receiver(
            payoffs.map_rows(|_, row| scaled_softmax(row, self.rationality)),
            game,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rationality_must_be_positive() {
        assert!(QuantalResponse::new(0.0).is_err());
        assert!(QuantalResponse::new(-1.0).is_err());
        assert!(QuantalResponse::new(f64::INFINITY).is_err());
        assert_eq!(QuantalResponse::new(5.0).unwrap().rationality(), 5.0);
    }

    #[test]
    fn tiny_rationality_is_nearly_uniform() {
        let utility = Matrix::from_rows(vec![vec![2.0, 0.5], vec![0.1, 1.0]]).unwrap();
        let game = Game::new(utility, vec![0.6, 0.4], 2).unwrap();
        let sender = Matrix::from_rows(vec![vec![0.3, 0.7], vec![0.4, 0.6]]).unwrap();
        let receiver = Matrix::from_rows(vec![vec![0.2, 0.8], vec![0.9, 0.1]]).unwrap();

        let dynamics = QuantalResponse::new(1e-6).unwrap();
        let updated = dynamics.update_sender(&sender, &receiver, &game).unwrap();
        let uniform = Matrix::from_fn(2, 2, |_, _| 0.5);
        assert!(updated.max_abs_difference(&uniform).unwrap() < 1e-5);
    }
}
