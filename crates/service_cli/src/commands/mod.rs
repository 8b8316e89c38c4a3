//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod batch;
pub mod derive;
pub mod sample;
pub mod solve;
