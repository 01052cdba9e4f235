//! Analysis of converged languages
//!
//! This module provides the post-convergence checks that classify a
//! language as properly vague or not.

pub mod vagueness;

pub use vagueness::{MONOTONICITY_TOLERANCE, VaguenessReport, evaluate};
