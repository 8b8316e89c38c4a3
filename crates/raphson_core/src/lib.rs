//! # raphson_core: Traced Newton-Raphson Root Finding
//!
//! Finds a real root of a single-variable function given as text, by
//! Newton-Raphson iteration with an exact symbolic derivative, and records
//! every step so the run can be shown, plotted or checked afterwards.
//!
//! ## Layout
//!
//! - Expression model: parser, printer, evaluator, differentiator and
//!   simplifier (`expr`)
//! - Iteration engine: configuration, solver, trace (`math::solvers`)
//! - Curve sampling for plots (`math::sampling`)
//! - Error types: `ParseError`, `EvaluationError`, `ConfigError`,
//!   `RootFinderError` (`types::error`)
//! - End-to-end entry points: [`solve`], [`solve_batch`]
//!
//! ## Usage Examples
//!
//! ```rust
//! use raphson_core::math::solvers::{Config, Outcome};
//! use raphson_core::solve;
//!
//! let config = Config::new("x**3 - 2*x - 5", 3.0, 5);
//! let solution = solve(&config).unwrap();
//!
//! assert_eq!(solution.derivative.to_string(), "3 * x^2 - 2");
//! assert!(matches!(solution.trace.outcome(), Outcome::Converged { .. }));
//!
//! for record in solution.trace.records() {
//!     println!("{} {:.5} {:.5}", record.index + 1, record.x_n, record.error);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): run [`solve_batch`] on the rayon pool
//! - `serde` (default): enable serialisation for configuration, trace,
//!   expressions and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod expr;
pub mod math;
mod solution;
pub mod types;

pub use solution::{solve, solve_batch, Solution};
