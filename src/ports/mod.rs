//! Ports (trait boundaries) for external collaborators.
//!
//! The convergence loop only talks to the outside world through these
//! traits; visualisation, console reporting and progress display are
//! adapters implemented elsewhere.

pub mod observer;

pub use observer::{IterationSnapshot, Observer};
