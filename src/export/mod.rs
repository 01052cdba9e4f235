//! Export functionality for simulation results
//!
//! Final strategies are written as headerless comma-separated tables:
//! one row per state for the Sender, one row per message for the Receiver.

mod strategy_csv;

pub use strategy_csv::{StrategyCsvExporter, StrategyFiles};
