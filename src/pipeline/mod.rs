//! Simulation pipeline
//!
//! This module provides:
//! - The convergence loop driving a dynamics rule to a fixed point
//! - Observer adapters for console output, progress display and metrics

pub mod convergence;
pub mod observers;

pub use convergence::{
    CONVERGENCE_TOLERANCE, ConvergenceConfig, ConvergencePipeline, ConvergenceResult,
    ConvergenceStatus, StepOutcome, step,
};
pub use observers::{ConsoleObserver, MetricsObserver, MetricsSummary, ProgressObserver};

pub use crate::ports::{IterationSnapshot, Observer};
