//! CLI infrastructure for the vagueness simulator
//!
//! Runs a simulation from a configuration file, or evaluates strategies
//! saved by an earlier run.

pub mod commands;
pub mod output;
