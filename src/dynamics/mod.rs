//! Strategy update rules
//!
//! This module defines a common interface for the adaptation rules that
//! drive Sender and Receiver strategies towards an equilibrium. Every rule
//! computes each row's payoffs against the partner's current strategy,
//! responds row by row, blends the response through the game's confusion
//! kernel (`C · S` for the Sender, `R · Cᵀ` for the Receiver) and
//! renormalises, substituting a uniform row for an all-zero one.
//!
//! Replicator and quantal responses are distributions before blending.
//! Best response blends its raw 0/1 indicator rows, so a row with tied
//! maxima carries more weight into its neighbours than a row with a single
//! maximum. With identity confusion blending changes nothing.

mod best_response;
mod quantal;
mod replicator;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use best_response::BestResponse;
pub use quantal::QuantalResponse;
pub use replicator::Replicator;

use crate::{Error, Result, game::Game, matrix::Matrix};

/// A strategy update rule
///
/// Both updates are pure: they read the current strategies and return a
/// new matrix of the same shape. The provided methods reject the call
/// with [`Error::NotSupported`]; concrete rules override both.
pub trait Dynamics: Send + Sync {
    /// Human-readable name of the rule
    fn name(&self) -> &str;

    /// New Sender strategy (`n_states × n_sender_actions`)
    fn update_sender(&self, _sender: &Matrix, _receiver: &Matrix, _game: &Game) -> Result<Matrix> {
        Err(Error::NotSupported {
            operation: "update_sender",
            dynamics: self.name().to_string(),
        })
    }

    /// New Receiver strategy (`n_messages × n_states`)
    fn update_receiver(
        &self,
        _sender: &Matrix,
        _receiver: &Matrix,
        _game: &Game,
    ) -> Result<Matrix> {
        Err(Error::NotSupported {
            operation: "update_receiver",
            dynamics: self.name().to_string(),
        })
    }
}

/// The bare interface with no update rule behind it
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseDynamics;

impl Dynamics for BaseDynamics {
    fn name(&self) -> &str {
        "base"
    }
}

/// Renormalise a Sender response, then blend it through the confusion kernel.
pub(crate) fn finish_sender(response: Matrix, game: &Game) -> Result<Matrix> {
    blend_sender(&response.normalize_rows(), game)
}

/// Renormalise a Receiver response, then blend it through the confusion kernel.
pub(crate) fn finish_receiver(response: Matrix, game: &Game) -> Result<Matrix> {
    blend_receiver(&response.normalize_rows(), game)
}

/// `normalize_rows(C · response)`; `response` is used as given.
pub(crate) fn blend_sender(response: &Matrix, game: &Game) -> Result<Matrix> {
    Ok(game.confusion().matmul(response)?.normalize_rows())
}

/// `normalize_rows(response · Cᵀ)`; `response` is used as given.
pub(crate) fn blend_receiver(response: &Matrix, game: &Game) -> Result<Matrix> {
    Ok(response
        .matmul(&game.confusion().transpose())?
        .normalize_rows())
}

/// Names of the available rules, as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DynamicsRule {
    Replicator,
    BestResponse,
    QuantalResponse,
}

impl DynamicsRule {
    pub const VARIANTS: &'static str = "replicator, best response, quantal best response";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replicator => "replicator",
            Self::BestResponse => "best response",
            Self::QuantalResponse => "quantal best response",
        }
    }
}

impl fmt::Display for DynamicsRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DynamicsRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "replicator" => Ok(Self::Replicator),
            "best response" => Ok(Self::BestResponse),
            "quantal best response" | "quantal response" | "logit" => Ok(Self::QuantalResponse),
            _ => Err(Error::ParseDynamics {
                input: s.to_string(),
                expected: Self::VARIANTS.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for DynamicsRule {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DynamicsRule> for String {
    fn from(value: DynamicsRule) -> Self {
        value.as_str().to_string()
    }
}

/// Enumeration of the concrete rules
///
/// Gives configuration-driven code a single owned value to pass around
/// without boxing a trait object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DynamicsKind {
    Replicator(Replicator),
    BestResponse(BestResponse),
    QuantalResponse(QuantalResponse),
}

impl DynamicsKind {
    /// Instantiate `rule`; `rationality` is only used by quantal response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a non-positive rationality
    /// when quantal response is requested.
    pub fn new(rule: DynamicsRule, rationality: f64) -> Result<Self> {
        Ok(match rule {
            DynamicsRule::Replicator => Self::Replicator(Replicator),
            DynamicsRule::BestResponse => Self::BestResponse(BestResponse),
            DynamicsRule::QuantalResponse => {
                Self::QuantalResponse(QuantalResponse::new(rationality)?)
            }
        })
    }

    pub fn rule(&self) -> DynamicsRule {
        match self {
            Self::Replicator(_) => DynamicsRule::Replicator,
            Self::BestResponse(_) => DynamicsRule::BestResponse,
            Self::QuantalResponse(_) => DynamicsRule::QuantalResponse,
        }
    }
}

impl Dynamics for DynamicsKind {
    fn name(&self) -> &str {
        match self {
            Self::Replicator(rule) => rule.name(),
            Self::BestResponse(rule) => rule.name(),
            Self::QuantalResponse(rule) => rule.name(),
        }
    }

    fn update_sender(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        match self {
            Self::Replicator(rule) => rule.update_sender(sender, receiver, game),
            Self::BestResponse(rule) => rule.update_sender(sender, receiver, game),
            Self::QuantalResponse(rule) => rule.update_sender(sender, receiver, game),
        }
    }

    fn update_receiver(&self, sender: &Matrix, receiver: &Matrix, game: &Game) -> Result<Matrix> {
        match self {
            Self::Replicator(rule) => rule.update_receiver(sender, receiver, game),
            Self::BestResponse(rule) => rule.update_receiver(sender, receiver, game),
            Self::QuantalResponse(rule) => rule.update_receiver(sender, receiver, game),
        }
    }
}
