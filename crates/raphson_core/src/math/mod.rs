//! Numerical routines built on parsed expressions.
//!
//! - [`solvers`]: the Newton-Raphson engine and its trace
//! - [`sampling`]: evenly spaced curve samples for plotting

pub mod sampling;
pub mod solvers;
