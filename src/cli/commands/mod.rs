//! Subcommands of the `vagueness` binary

pub mod evaluate;
pub mod run;
