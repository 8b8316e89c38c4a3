//! Newton-Raphson iteration engine.

use super::{Config, IterationRecord, Outcome, Trace};
use crate::expr::{evaluate, Expression};
use crate::types::EvaluationError;
use tracing::{debug, trace};

/// `|f'(x)|` below this stops the run with [`Outcome::DerivativeVanished`].
pub const DERIVATIVE_EPSILON: f64 = 1e-10;

/// Newton-Raphson root finder over parsed expressions.
///
/// Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)` from `config.x0` and stops
/// as soon as the step size `|x_{n+1} - x_n|` is at most
/// [`Config::tolerance`]. Every completed step is recorded, so the run can
/// be inspected afterwards whatever its outcome.
///
/// Convergence is quadratic near a simple root. The run gives up when:
/// - the derivative vanishes (`|f'(x_n)| < 1e-10`)
/// - `f` or `f'` cannot be evaluated at `x_n`
/// - the iteration cap is reached
///
/// # Example
///
/// ```
/// use raphson_core::expr::{derive, parse};
/// use raphson_core::math::solvers::{Config, NewtonRaphsonSolver};
///
/// let f = parse("x^2 - 2").unwrap();
/// let df = derive(&f);
///
/// let solver = NewtonRaphsonSolver::new(Config::new("x^2 - 2", 1.0, 10));
/// let trace = solver.run(&f, &df);
///
/// let root = trace.root().unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver {
    /// Solver configuration
    config: Config,
}

impl NewtonRaphsonSolver {
    /// Create a solver with the given configuration.
    ///
    /// The configuration is not validated here; [`crate::solve`] does that
    /// before parsing. A zero iteration cap yields an empty trace.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Step through the iteration one record at a time.
    ///
    /// The iterator ends when the run terminates; the reason is then
    /// available from [`NewtonIterations::outcome`].
    ///
    /// # Example
    ///
    /// ```
    /// use raphson_core::expr::{derive, parse};
    /// use raphson_core::math::solvers::{NewtonRaphsonSolver, Outcome};
    ///
    /// let f = parse("x^3 - 2*x - 5").unwrap();
    /// let df = derive(&f);
    /// let solver = NewtonRaphsonSolver::with_defaults();
    ///
    /// let mut steps = solver.iter(&f, &df);
    /// let first = steps.next().unwrap();
    /// assert_eq!(first.x_n, 3.0);
    /// assert_eq!(first.x_next, 3.0 - 16.0 / 25.0);
    ///
    /// steps.by_ref().for_each(drop);
    /// assert!(matches!(steps.outcome(), Some(Outcome::Converged { .. })));
    /// ```
    pub fn iter<'a>(&self, f: &'a Expression, df: &'a Expression) -> NewtonIterations<'a> {
        NewtonIterations::new(f, df, &self.config)
    }

    /// Run to completion and return the full trace.
    pub fn run(&self, f: &Expression, df: &Expression) -> Trace {
        self.iter(f, df).into_trace()
    }
}

/// Run Newton-Raphson on `f` with derivative `df` under `config`.
///
/// Shorthand for `NewtonRaphsonSolver::new(config.clone()).run(f, df)`.
pub fn run(f: &Expression, df: &Expression, config: &Config) -> Trace {
    NewtonIterations::new(f, df, config).into_trace()
}

/// Step-wise Newton-Raphson run, created by [`NewtonRaphsonSolver::iter`].
///
/// Yields one [`IterationRecord`] per completed step. Records are also
/// retained, so [`into_trace`](NewtonIterations::into_trace) returns the
/// whole run even after partial consumption.
#[derive(Debug, Clone)]
pub struct NewtonIterations<'a> {
    f: &'a Expression,
    df: &'a Expression,
    tolerance: f64,
    max_iterations: usize,
    x: f64,
    index: usize,
    records: Vec<IterationRecord>,
    outcome: Option<Outcome>,
}

impl<'a> NewtonIterations<'a> {
    fn new(f: &'a Expression, df: &'a Expression, config: &Config) -> Self {
        let outcome = (config.max_iterations == 0)
            .then_some(Outcome::MaxIterationsExceeded { iterations: 0 });
        Self {
            f,
            df,
            tolerance: config.tolerance(),
            max_iterations: config.max_iterations,
            x: config.x0,
            index: 0,
            records: Vec::new(),
            outcome,
        }
    }

    /// Terminal outcome, once the iterator is exhausted.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Records produced so far.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Finish the run and return every record with the outcome.
    pub fn into_trace(mut self) -> Trace {
        loop {
            self.next();
            if let Some(outcome) = self.outcome.take() {
                return Trace::new(self.records, outcome);
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!(outcome = %outcome, iterations = self.records.len(), "newton-raphson finished");
        self.outcome = Some(outcome);
    }

    fn fail(&mut self, error: EvaluationError) {
        let outcome = Outcome::EvaluationFailed {
            index: self.index,
            x: self.x,
            error,
        };
        self.finish(outcome);
    }

    fn step(&mut self) -> Option<IterationRecord> {
        let index = self.index;
        let x_n = self.x;

        let f_x = match evaluate(self.f, x_n) {
            Ok(value) => value,
            Err(error) => {
                self.fail(error);
                return None;
            }
        };
        let df_x = match evaluate(self.df, x_n) {
            Ok(value) => value,
            Err(error) => {
                self.fail(error);
                return None;
            }
        };

        if df_x.abs() < DERIVATIVE_EPSILON {
            self.finish(Outcome::DerivativeVanished { index, x: x_n });
            return None;
        }

        let x_next = x_n - f_x / df_x;
        if !x_next.is_finite() {
            self.fail(EvaluationError::overflow("newton step"));
            return None;
        }

        let error = (x_next - x_n).abs();
        let record = IterationRecord {
            index,
            x_n,
            f_x,
            df_x,
            x_next,
            error,
        };
        trace!(index, x_n, f_x, df_x, x_next, error, "newton step");
        self.records.push(record);

        if error <= self.tolerance {
            self.finish(Outcome::Converged { root: x_next });
        } else if index + 1 >= self.max_iterations {
            self.finish(Outcome::MaxIterationsExceeded {
                iterations: index + 1,
            });
        } else {
            self.x = x_next;
            self.index += 1;
        }
        Some(record)
    }
}

impl Iterator for NewtonIterations<'_> {
    type Item = IterationRecord;

    fn next(&mut self) -> Option<IterationRecord> {
        if self.outcome.is_some() {
            return None;
        }
        self.step()
    }
}
