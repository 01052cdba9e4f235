//! Proper-vagueness criteria for a converged language
//!
//! A language is properly vague when every message has a single
//! prototype state, prototypes differ between messages, and both players'
//! strategies fall off monotonically with perceptual distance from the
//! prototypes.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, matrix::Matrix, utils};

/// Slack allowed when checking monotonicity. Converged strategies are
/// only approximately monotone, so a reversal smaller than this passes.
pub const MONOTONICITY_TOLERANCE: f64 = 0.01;

/// Outcome of each criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaguenessReport {
    /// Arg-max state of every receiver row (first one on ties)
    pub prototypes: Vec<usize>,
    /// Every receiver row has exactly one maximal entry
    pub unique_maxima: bool,
    /// No two messages share a prototype
    pub distinct_prototypes: bool,
    /// Receiver rows decrease with distance from the prototype
    pub receiver_monotone: bool,
    /// Sender rows prefer messages whose prototype is more similar
    pub sender_monotone: bool,
    /// Mean Shannon entropy (nats) of the receiver rows
    pub mean_receiver_entropy: f64,
}

impl VaguenessReport {
    /// All four criteria hold
    pub fn is_properly_vague(&self) -> bool {
        self.unique_maxima
            && self.distinct_prototypes
            && self.receiver_monotone
            && self.sender_monotone
    }

    /// Console verdict
    pub fn verdict(&self) -> &'static str {
        if self.is_properly_vague() {
            "Language is proper vague language"
        } else {
            "Language is NOT properly vague"
        }
    }
}

/// Evaluate the criteria on final strategies.
///
/// `sender` is `n_states × n_actions` (an opt-out column, if any, is
/// ignored), `receiver` is `n_messages × n_states` and `similarity` is
/// `n_states × n_states`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the matrices do not fit together.
pub fn evaluate(sender: &Matrix, receiver: &Matrix, similarity: &Matrix) -> Result<VaguenessReport> {
    let n_messages = receiver.rows();
    let n_states = receiver.cols();
    similarity.ensure_shape(n_states, n_states, "similarity")?;
    if sender.rows() != n_states || sender.cols() < n_messages {
        return Err(Error::ShapeMismatch {
            context: "sender strategy".to_string(),
            expected_rows: n_states,
            expected_cols: n_messages,
            rows: sender.rows(),
            cols: sender.cols(),
        });
    }

    let maxima: Vec<Vec<usize>> = receiver.row_iter().map(utils::argmax_set).collect();
    let prototypes: Vec<usize> = maxima
        .iter()
        .map(|set| set.first().copied().unwrap_or(0))
        .collect();

    let unique_maxima = maxima.iter().all(|set| set.len() == 1);

    let distinct_prototypes = prototypes
        .iter()
        .enumerate()
        .all(|(i, p)| prototypes[i + 1..].iter().all(|q| q != p));

    let receiver_monotone = (0..n_messages).all(|m| {
        let p = prototypes[m];
        (0..n_states).all(|t1| {
            (0..n_states).all(|t2| {
                similarity.get(t1, p) <= similarity.get(t2, p)
                    || weakly_greater(receiver.get(m, t1), receiver.get(m, t2))
            })
        })
    });

    let sender_monotone = (0..n_states).all(|t| {
        (0..n_messages).all(|m1| {
            (0..n_messages).all(|m2| {
                similarity.get(t, prototypes[m1]) <= similarity.get(t, prototypes[m2])
                    || weakly_greater(sender.get(t, m1), sender.get(t, m2))
            })
        })
    });

    let mean_receiver_entropy = if n_messages == 0 {
        0.0
    } else {
        receiver
            .row_iter()
            .map(|row| utils::shannon_entropy(row.iter().copied()))
            .sum::<f64>()
            / n_messages as f64
    };

    Ok(VaguenessReport {
        prototypes,
        unique_maxima,
        distinct_prototypes,
        receiver_monotone,
        sender_monotone,
        mean_receiver_entropy,
    })
}

/// `a > b`, or `a` falls short of `b` by less than the tolerance
fn weakly_greater(a: f64, b: f64) -> bool {
    a > b || b - a < MONOTONICITY_TOLERANCE
}
