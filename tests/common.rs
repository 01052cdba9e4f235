//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng};
use vagueness::{Game, Matrix, PerceptualSpace};

/// Two-state game with diagonal-dominant payoffs, perfect perception and
/// no opt-out.
///
/// The utility is not symmetric, unlike every configured game. These
/// entries were fitted to reproduce the reference one-step values.
pub fn two_state_game() -> Game {
    let utility = Matrix::from_rows(vec![vec![2.0, 0.5], vec![0.1, 1.0]]).unwrap();
    Game::new(utility, vec![0.6, 0.4], 2).unwrap()
}

/// The same game with confusion equal to similarity.
pub fn imprecise_two_state_game() -> Game {
    two_state_game().with_imprecision()
}

pub fn initial_sender() -> Matrix {
    Matrix::from_rows(vec![vec![0.3, 0.7], vec![0.4, 0.6]]).unwrap()
}

pub fn initial_receiver() -> Matrix {
    Matrix::from_rows(vec![vec![0.2, 0.8], vec![0.9, 0.1]]).unwrap()
}

/// Gaussian-similarity game over `n_states` evenly spaced states.
pub fn perceptual_game(n_states: usize, n_messages: usize, acuity: f64) -> Game {
    let space = PerceptualSpace::new(n_states).unwrap();
    let similarity = space.similarity(acuity).unwrap();
    let priors = vec![1.0 / n_states as f64; n_states];
    Game::new(similarity, priors, n_messages).unwrap()
}

/// Seeded random strategies fitting `game`.
pub fn random_strategies(game: &Game, seed: u64) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(seed);
    let sender = Matrix::random_stochastic(game.n_states(), game.n_sender_actions(), &mut rng);
    let receiver = Matrix::random_stochastic(game.n_messages(), game.n_states(), &mut rng);
    (sender, receiver)
}

/// Entrywise comparison against expected rows.
pub fn assert_close(actual: &Matrix, expected: &[[f64; 2]], tolerance: f64) {
    assert_eq!(actual.shape(), (expected.len(), 2), "shape of {actual}");
    for (i, row) in expected.iter().enumerate() {
        for (j, want) in row.iter().enumerate() {
            let got = actual.get(i, j);
            assert!(
                (got - want).abs() < tolerance,
                "entry ({i}, {j}) = {got}, expected {want}\n{actual}"
            );
        }
    }
}

/// Every row sums to one and no entry is negative.
pub fn assert_row_stochastic(matrix: &Matrix) {
    for (i, row) in matrix.row_iter().enumerate() {
        let total: f64 = row.iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "row {i} sums to {total}");
        assert!(row.iter().all(|&p| p >= 0.0), "row {i} has a negative entry: {row:?}");
    }
}
