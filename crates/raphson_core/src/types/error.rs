//! Error types for structured error handling.
//!
//! This module provides:
//! - `ParseError`: Malformed or multi-variable formula text
//! - `EvaluationError`: Domain violations and overflow while evaluating a tree
//! - `ConfigError`: Invalid root-finding configuration
//! - `RootFinderError`: Everything that can stop [`crate::solve`] before a run starts

use std::fmt;
use thiserror::Error;

/// Reason a formula failed to parse.
///
/// # Variants
/// - `EmptyInput`: Formula is empty or whitespace only
/// - `UnexpectedCharacter`: Character outside the formula alphabet
/// - `InvalidNumber`: Malformed or non-finite numeric literal
/// - `UnexpectedToken`: Token not allowed at this position
/// - `UnexpectedEnd`: Input ended where an operand was required
/// - `UnbalancedParenthesis`: Missing `(` or `)`
/// - `UnknownIdentifier`: Name is neither a function, a constant nor a variable
/// - `MultipleVariables`: More than one distinct variable symbol
/// - `ImplicitMultiplication`: Two operands written side by side (`3x`)
/// - `AmbiguousDivision`: `//` has no real-valued meaning
/// - `TooDeep`: Nesting exceeds the parser's depth limit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorReason {
    /// Formula is empty.
    #[error("empty formula")]
    EmptyInput,

    /// Character that cannot start any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// Numeric literal could not be read as a real number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Token that does not fit the grammar at this position.
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    /// Input ended while an operand or `)` was still expected.
    #[error("unexpected end of formula")]
    UnexpectedEnd,

    /// Parentheses do not pair up.
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,

    /// Identifier that is not a supported function, constant or variable.
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    /// Formula mentions two different variables.
    #[error("more than one variable: '{first}' and '{second}'")]
    MultipleVariables {
        /// Variable seen first.
        first: String,
        /// Conflicting variable.
        second: String,
    },

    /// Operands written next to each other without an operator.
    #[error("missing operator between operands (write 3*x, not 3x)")]
    ImplicitMultiplication,

    /// `//` written where a single `/` was probably meant.
    #[error("ambiguous division '//'")]
    AmbiguousDivision,

    /// Formula nests deeper than the given number of levels.
    #[error("formula nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Formula parse failure with the byte offset of the offending input.
///
/// # Examples
/// ```
/// use raphson_core::expr::parse;
/// use raphson_core::types::ParseErrorReason;
///
/// let err = parse("x + y").unwrap_err();
/// assert_eq!(err.position, 4);
/// assert!(matches!(err.reason, ParseErrorReason::MultipleVariables { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{reason} at position {position}")]
pub struct ParseError {
    /// 0-based byte offset into the formula text.
    pub position: usize,
    /// What went wrong.
    pub reason: ParseErrorReason,
}

impl ParseError {
    /// Create a parse error at `position`.
    pub fn new(position: usize, reason: ParseErrorReason) -> Self {
        Self { position, reason }
    }
}

/// Evaluation error kind.
///
/// # Variants
/// - `DomainError`: The operation is undefined for its argument
/// - `Overflow`: The result magnitude is not representable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluationErrorKind {
    /// Undefined result (`ln(0)`, `0/0`, `sqrt(-1)`).
    DomainError,
    /// Result is infinite although the operands were finite.
    Overflow,
}

impl fmt::Display for EvaluationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationErrorKind::DomainError => write!(f, "domain error"),
            EvaluationErrorKind::Overflow => write!(f, "overflow"),
        }
    }
}

/// Failure while evaluating an expression tree at a point.
///
/// # Examples
/// ```
/// use raphson_core::types::{EvaluationError, EvaluationErrorKind};
///
/// let err = EvaluationError::domain("ln");
/// assert_eq!(err.kind, EvaluationErrorKind::DomainError);
/// assert_eq!(format!("{}", err), "domain error in ln");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} in {operation}")]
pub struct EvaluationError {
    /// Category of the failure.
    pub kind: EvaluationErrorKind,
    /// Operation that failed (`"ln"`, `"/"`, `"^"`, `"newton step"`, ...).
    pub operation: String,
}

impl EvaluationError {
    /// Create a domain error raised by `operation`.
    pub fn domain(operation: impl Into<String>) -> Self {
        Self {
            kind: EvaluationErrorKind::DomainError,
            operation: operation.into(),
        }
    }

    /// Create an overflow error raised by `operation`.
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self {
            kind: EvaluationErrorKind::Overflow,
            operation: operation.into(),
        }
    }

    /// Check if the error is a domain violation.
    pub fn is_domain_error(&self) -> bool {
        matches!(self.kind, EvaluationErrorKind::DomainError)
    }

    /// Check if the error is an overflow.
    pub fn is_overflow(&self) -> bool {
        matches!(self.kind, EvaluationErrorKind::Overflow)
    }
}

/// Invalid root-finding configuration.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// Precision digits outside the supported range.
    #[error("precision must be between {min} and {max} digits, got {got}")]
    PrecisionOutOfRange {
        /// Requested digits.
        got: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// Iteration cap of zero.
    #[error("max_iterations must be > 0")]
    ZeroIterations,

    /// Initial guess is NaN or infinite.
    #[error("initial guess must be finite, got {0}")]
    NonFiniteGuess(f64),
}

/// Errors that prevent a root-finding run from starting.
///
/// Failures *during* a run are not errors: they are reported as the
/// trace's terminal [`Outcome`](crate::math::solvers::Outcome).
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RootFinderError {
    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Formula text could not be parsed.
    #[error("Invalid function: {0}")]
    Parse(#[from] ParseError),
}
