//! Newton-Raphson iteration engine.
//!
//! ## Components
//!
//! - [`Config`]: formula, initial guess, precision digits and iteration cap
//! - [`NewtonRaphsonSolver`]: runs the iteration on a parsed function and
//!   its derivative, all at once ([`NewtonRaphsonSolver::run`]) or step by
//!   step ([`NewtonRaphsonSolver::iter`])
//! - [`Trace`]: every [`IterationRecord`] plus the terminal [`Outcome`]
//!
//! ## Termination
//!
//! Checked in this order at each iteration `n`:
//!
//! 1. `f(x_n)` or `f'(x_n)` fails to evaluate: [`Outcome::EvaluationFailed`]
//! 2. `|f'(x_n)| < 1e-10`: [`Outcome::DerivativeVanished`]
//! 3. the step is recorded; `|x_{n+1} - x_n| <= 10^-precision`:
//!    [`Outcome::Converged`]
//! 4. `n + 1` iterations reached the cap: [`Outcome::MaxIterationsExceeded`]
//!
//! ## Examples
//!
//! ```
//! use raphson_core::expr::{derive, parse};
//! use raphson_core::math::solvers::{run, Config, Outcome};
//!
//! let f = parse("x^2 - 4").unwrap();
//! let df = derive(&f);
//!
//! let trace = run(&f, &df, &Config::new("x^2 - 4", 0.0, 5));
//! assert!(trace.is_empty());
//! assert_eq!(trace.outcome(), &Outcome::DerivativeVanished { index: 0, x: 0.0 });
//! ```

mod config;
mod newton_raphson;
mod trace;

// Re-export public types at module level
pub use config::{
    Config, DEFAULT_FORMULA, DEFAULT_INITIAL_GUESS, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION,
    MAX_PRECISION, MIN_PRECISION,
};
pub use newton_raphson::{run, NewtonIterations, NewtonRaphsonSolver, DERIVATIVE_EPSILON};
pub use trace::{IterationRecord, Outcome, Trace};
