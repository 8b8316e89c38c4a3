//! Inspectable record of a Newton-Raphson run.

use crate::types::EvaluationError;
use std::fmt;

/// One Newton-Raphson step.
///
/// `error` is the step size `|x_next - x_n|`, the quantity compared with
/// the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRecord {
    /// 0-based iteration number.
    pub index: usize,
    /// Current iterate `x_n`.
    pub x_n: f64,
    /// `f(x_n)`
    pub f_x: f64,
    /// `f'(x_n)`
    pub df_x: f64,
    /// Next iterate `x_n - f(x_n) / f'(x_n)`.
    pub x_next: f64,
    /// Step size `|x_next - x_n|`.
    pub error: f64,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Outcome {
    /// A step no larger than the tolerance was taken; `root` is its end point.
    Converged {
        /// Final iterate.
        root: f64,
    },

    /// `|f'(x)|` fell below the vanishing threshold at iteration `index`.
    DerivativeVanished {
        /// Iteration at which the derivative vanished.
        index: usize,
        /// Point where it vanished.
        x: f64,
    },

    /// The iteration cap was reached without convergence.
    MaxIterationsExceeded {
        /// Iterations performed.
        iterations: usize,
    },

    /// `f`, `f'` or the step itself could not be evaluated.
    EvaluationFailed {
        /// Iteration at which evaluation failed.
        index: usize,
        /// Point being evaluated.
        x: f64,
        /// Underlying failure.
        error: EvaluationError,
    },
}

impl Outcome {
    /// Check if the run converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged { .. })
    }

    /// Root, for a converged run.
    pub fn root(&self) -> Option<f64> {
        match self {
            Outcome::Converged { root } => Some(*root),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Converged { root } => write!(f, "converged to {}", root),
            Outcome::DerivativeVanished { index, x } => {
                write!(f, "derivative vanished at x = {} (iteration {})", x, index + 1)
            }
            Outcome::MaxIterationsExceeded { iterations } => {
                write!(f, "no convergence after {} iterations", iterations)
            }
            Outcome::EvaluationFailed { index, x, error } => {
                write!(f, "{} at x = {} (iteration {})", error, x, index + 1)
            }
        }
    }
}

/// Ordered iteration records plus the terminal outcome of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    records: Vec<IterationRecord>,
    outcome: Outcome,
}

impl Trace {
    pub(crate) fn new(records: Vec<IterationRecord>, outcome: Outcome) -> Self {
        Self { records, outcome }
    }

    /// Records in iteration order.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Terminal outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Root, for a converged run.
    pub fn root(&self) -> Option<f64> {
        self.outcome.root()
    }

    /// Check if the run converged.
    pub fn converged(&self) -> bool {
        self.outcome.is_converged()
    }

    /// Step size of the last recorded iteration.
    pub fn final_error(&self) -> Option<f64> {
        self.records.last().map(|record| record.error)
    }

    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no iteration completed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(x_n, f(x_n))` for every recorded iterate, for plotting.
    pub fn iterates(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.records.iter().map(|record| (record.x_n, record.f_x))
    }

    /// Empirical order of convergence estimated from successive step sizes.
    ///
    /// Entry `k` is `ln(e[k+2] / e[k+1]) / ln(e[k+1] / e[k])`, where `e` are
    /// the recorded step sizes. Values near 2 indicate quadratic
    /// convergence. Triples with a zero step or an undefined ratio are
    /// skipped.
    pub fn convergence_orders(&self) -> Vec<f64> {
        self.records
            .windows(3)
            .filter_map(|window| {
                let (e0, e1, e2) = (window[0].error, window[1].error, window[2].error);
                if e0 <= 0.0 || e1 <= 0.0 || e2 <= 0.0 {
                    return None;
                }
                let order = (e2 / e1).ln() / (e1 / e0).ln();
                order.is_finite().then_some(order)
            })
            .collect()
    }
}
