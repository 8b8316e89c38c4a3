//! End-to-end root finding from formula text.

use crate::expr::{derive, parse, simplify, Expression};
use crate::math::solvers::{run, Config, Trace};
use crate::types::RootFinderError;
use tracing::debug;

/// Parsed function, its simplified derivative and the run's trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Parsed `f`.
    pub function: Expression,
    /// Simplified `f'`, also the derivative used by the iteration.
    pub derivative: Expression,
    /// Every iteration and the terminal outcome.
    pub trace: Trace,
}

impl Solution {
    /// Root, for a converged run.
    pub fn root(&self) -> Option<f64> {
        self.trace.root()
    }
}

/// Validate `config`, parse its formula, differentiate and run.
///
/// Non-convergence is not an error here: it is reported through
/// [`Trace::outcome`]. Only an invalid configuration or formula fails.
///
/// # Examples
///
/// ```
/// use raphson_core::math::solvers::Config;
/// use raphson_core::solve;
///
/// let solution = solve(&Config::default()).unwrap();
/// assert_eq!(solution.derivative.to_string(), "3 * x^2 - 2");
/// assert!((solution.root().unwrap() - 2.0945515).abs() < 1e-5);
///
/// assert!(solve(&Config::new("x**", 1.0, 5)).is_err());
/// ```
pub fn solve(config: &Config) -> Result<Solution, RootFinderError> {
    config.validate()?;
    let function = parse(&config.formula)?;
    let derivative = simplify(&derive(&function));
    debug!(f = %function, df = %derivative, x0 = config.x0, "solving");

    let trace = run(&function, &derivative, config);
    Ok(Solution {
        function,
        derivative,
        trace,
    })
}

/// Solve independent problems, keeping input order.
///
/// Runs on the rayon pool when the `parallel` feature is enabled.
pub fn solve_batch(configs: &[Config]) -> Vec<Result<Solution, RootFinderError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        configs.par_iter().map(solve).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        configs.iter().map(solve).collect()
    }
}
