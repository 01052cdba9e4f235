//! Sim-max signaling game
//!
//! A [`Game`] holds everything the dynamics need besides the two
//! strategies: the payoff kernel, the perceptual confusion kernel, the
//! similarity structure used by the vagueness criteria, the prior over
//! states and the opt-out cost.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, matrix::Matrix};

/// Signaling game with `n_states` states and `n_messages` messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    utility: Matrix,
    confusion: Matrix,
    similarity: Matrix,
    priors: Vec<f64>,
    n_messages: usize,
    opt_out: bool,
    cost: f64,
}

impl Game {
    /// Game without an opt-out action and with perfect perception
    /// (identity confusion). The utility doubles as the similarity.
    ///
    /// # Errors
    ///
    /// Returns an error if `utility` is not square, if `priors` does not
    /// have one entry per state, if any entry is negative or not finite,
    /// or if there are no messages.
    pub fn new(utility: Matrix, priors: Vec<f64>, n_messages: usize) -> Result<Self> {
        let n_states = utility.rows();
        utility.ensure_shape(n_states, n_states, "utility")?;
        if priors.len() != n_states {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "expected {n_states} prior probabilities, got {}",
                    priors.len()
                ),
            });
        }
        if n_messages == 0 {
            return Err(Error::InvalidConfiguration {
                message: "message space must contain at least one message".to_string(),
            });
        }
        check_entries("utility", utility.row_iter().flatten().copied())?;
        check_entries("priors", priors.iter().copied())?;

        Ok(Self {
            confusion: Matrix::identity(n_states),
            similarity: utility.clone(),
            utility,
            priors,
            n_messages,
            opt_out: false,
            cost: 0.0,
        })
    }

    /// Enable the opt-out action, priced at the average utility
    /// `sum(utility) / n_states²`.
    pub fn with_opt_out(mut self) -> Self {
        let n = self.n_states() as f64;
        self.opt_out = true;
        self.cost = self.utility.sum() / (n * n);
        self
    }

    /// Use a similarity structure that differs from the utility.
    pub fn with_similarity(mut self, similarity: Matrix) -> Result<Self> {
        let n = self.n_states();
        similarity.ensure_shape(n, n, "similarity")?;
        check_entries("similarity", similarity.row_iter().flatten().copied())?;
        self.similarity = similarity;
        Ok(self)
    }

    /// Builder form of [`Game::set_confusion`].
    pub fn with_confusion(mut self, confusion: Matrix) -> Result<Self> {
        self.set_confusion(confusion)?;
        Ok(self)
    }

    /// Replace the confusion kernel.
    ///
    /// This is how imprecise perception is modelled: the kernel through
    /// which both players' strategies are blended can differ from the
    /// payoff structure.
    pub fn set_confusion(&mut self, confusion: Matrix) -> Result<()> {
        let n = self.n_states();
        confusion.ensure_shape(n, n, "confusion")?;
        check_entries("confusion", confusion.row_iter().flatten().copied())?;
        self.confusion = confusion;
        Ok(())
    }

    /// Set the confusion kernel equal to the similarity structure.
    pub fn with_imprecision(mut self) -> Self {
        self.confusion = self.similarity.clone();
        self
    }

    pub fn utility(&self) -> &Matrix {
        &self.utility
    }

    pub fn confusion(&self) -> &Matrix {
        &self.confusion
    }

    pub fn similarity(&self) -> &Matrix {
        &self.similarity
    }

    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    pub fn n_states(&self) -> usize {
        self.utility.rows()
    }

    pub fn n_messages(&self) -> usize {
        self.n_messages
    }

    /// Messages plus the opt-out action when it exists
    pub fn n_sender_actions(&self) -> usize {
        if self.opt_out {
            self.n_messages + 1
        } else {
            self.n_messages
        }
    }

    pub fn has_opt_out(&self) -> bool {
        self.opt_out
    }

    /// Cost of opting out; zero without an opt-out action
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Check a Sender strategy's shape
    pub fn check_sender(&self, sender: &Matrix) -> Result<()> {
        sender.ensure_shape(self.n_states(), self.n_sender_actions(), "sender strategy")
    }

    /// Check a Receiver strategy's shape
    pub fn check_receiver(&self, receiver: &Matrix) -> Result<()> {
        receiver.ensure_shape(self.n_messages, self.n_states(), "receiver strategy")
    }

    /// Sender payoff of each action in each state.
    ///
    /// Sending message `m` in state `t` earns the utility the Receiver's
    /// interpretation of `m` yields, minus the opt-out cost; opting out
    /// earns nothing.
    pub fn sender_payoffs(&self, receiver: &Matrix) -> Result<Matrix> {
        self.check_receiver(receiver)?;
        Ok(Matrix::from_fn(
            self.n_states(),
            self.n_sender_actions(),
            |t, m| {
                if m < self.n_messages {
                    dot(receiver.row(m), self.utility.row(t)) - self.cost
                } else {
                    0.0
                }
            },
        ))
    }

    /// Receiver payoff of interpreting each message as each state.
    ///
    /// Entry `(m, t)` is `Σ_x priors[x] · sender[x, m] · utility[t, x]`.
    pub fn receiver_payoffs(&self, sender: &Matrix) -> Result<Matrix> {
        self.check_sender(sender)?;
        let n = self.n_states();
        let weighted: Vec<Vec<f64>> = (0..self.n_messages)
            .map(|m| (0..n).map(|x| self.priors[x] * sender.get(x, m)).collect())
            .collect();
        Ok(Matrix::from_fn(self.n_messages, n, |m, t| {
            dot(&weighted[m], self.utility.row(t))
        }))
    }

    /// Expected utility of the strategy profile.
    ///
    /// Opting out contributes nothing.
    pub fn expected_utility(&self, sender: &Matrix, receiver: &Matrix) -> Result<f64> {
        self.check_sender(sender)?;
        self.check_receiver(receiver)?;
        let n = self.n_states();
        let mut total = 0.0;
        for t in 0..n {
            for m in 0..self.n_messages {
                let weight = self.priors[t] * sender.get(t, m);
                if weight == 0.0 {
                    continue;
                }
                total += weight * dot(receiver.row(m), self.utility.row(t));
            }
        }
        Ok(total)
    }

    /// Expected utility divided by the total of the utility matrix
    pub fn normalized_expected_utility(&self, sender: &Matrix, receiver: &Matrix) -> Result<f64> {
        let total = self.utility.sum();
        let expected = self.expected_utility(sender, receiver)?;
        Ok(if total > 0.0 { expected / total } else { 0.0 })
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn check_entries(name: &str, mut values: impl Iterator<Item = f64>) -> Result<()> {
    match values.find(|v| !v.is_finite() || *v < 0.0) {
        Some(bad) => Err(Error::InvalidConfiguration {
            message: format!("{name} entries must be finite and non-negative, found {bad}"),
        }),
        None => Ok(()),
    }
}
