//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for parsing, evaluation, configuration and solving
//!
//! # Re-exports
//!
//! For convenience, all error types are re-exported at this module level.

pub mod error;

pub use error::{
    ConfigError, EvaluationError, EvaluationErrorKind, ParseError, ParseErrorReason,
    RootFinderError,
};
