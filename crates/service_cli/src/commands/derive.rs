//! Derive command implementation
//!
//! Prints the parsed function and its simplified derivative.

use raphson_core::expr::{derive, parse, simplify};
use raphson_core::types::RootFinderError;
use tracing::info;

use crate::Result;

/// Run the derive command
pub fn run(formula: &str) -> Result<()> {
    info!("Differentiating {}", formula);

    let (function, derivative) = derivative_text(formula)?;
    println!("f(x) = {}", function);
    println!("f'(x) = {}", derivative);
    Ok(())
}

/// Printed forms of `formula` and of its simplified derivative.
pub fn derivative_text(formula: &str) -> Result<(String, String)> {
    let function = parse(formula).map_err(RootFinderError::from)?;
    let derivative = simplify(&derive(&function));
    Ok((function.to_string(), derivative.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivative_text() {
        let (f, df) = derivative_text("x**3 - 2*x - 5").unwrap();
        assert_eq!(f, "x^3 - 2 * x - 5");
        assert_eq!(df, "3 * x^2 - 2");
    }

    #[test]
    fn test_other_variable() {
        let (_, df) = derivative_text("sin(t) * t").unwrap();
        assert_eq!(df, "cos(t) * t + sin(t)");
    }

    #[test]
    fn test_parse_error() {
        let err = derivative_text("x**").unwrap_err();
        assert!(err.to_string().starts_with("Invalid function"));
    }
}
