//! Evolution of vague languages in sim-max signaling games
//!
//! This crate provides:
//! - Dense row-stochastic matrices and the signaling [`Game`]
//! - Perceptual spaces, prior distributions and similarity kernels
//! - Replicator, best-response and quantal-response dynamics behind the
//!   [`Dynamics`] trait
//! - A convergence loop with pluggable observers
//! - Criteria deciding whether a converged language is properly vague
//! - Configuration loading, CSV export and a command line front-end

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod export;
pub mod game;
pub mod matrix;
pub mod perception;
pub mod pipeline;
pub mod ports;
pub mod utils;

pub use analysis::{VaguenessReport, evaluate as evaluate_vagueness};
pub use config::SimulationConfig;
pub use dynamics::{
    BaseDynamics, BestResponse, Dynamics, DynamicsKind, DynamicsRule, QuantalResponse, Replicator,
};
pub use error::{Error, Result};
pub use game::Game;
pub use matrix::Matrix;
pub use perception::{PerceptualSpace, PriorDistribution};
pub use pipeline::{ConvergenceConfig, ConvergencePipeline, ConvergenceResult, ConvergenceStatus};
