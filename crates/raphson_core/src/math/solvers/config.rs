//! Root-finding configuration.

use crate::types::ConfigError;

/// Formula used when none is given.
pub const DEFAULT_FORMULA: &str = "x**3 - 2*x - 5";

/// Initial guess used when none is given.
pub const DEFAULT_INITIAL_GUESS: f64 = 3.0;

/// Decimal digits of precision used when none is given.
pub const DEFAULT_PRECISION: u32 = 5;

/// Iteration cap used when none is given.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Smallest accepted precision, in decimal digits.
pub const MIN_PRECISION: u32 = 1;

/// Largest accepted precision, in decimal digits.
pub const MAX_PRECISION: u32 = 10;

/// Input of one Newton-Raphson run.
///
/// The run stops successfully once a step `|x_{n+1} - x_n|` is no larger
/// than [`tolerance`](Config::tolerance) `= 10^-precision`.
///
/// # Example
///
/// ```
/// use raphson_core::math::solvers::Config;
///
/// let config = Config::default();
/// assert_eq!(config.formula, "x**3 - 2*x - 5");
/// assert_eq!(config.tolerance(), 1e-5);
///
/// let custom = Config::new("cos(x) - x", 1.0, 8).with_max_iterations(20);
/// assert!(custom.validate().is_ok());
/// assert_eq!(custom.max_iterations, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Function text, e.g. `x**3 - 2*x - 5`.
    pub formula: String,

    /// Initial guess `x_0`.
    pub x0: f64,

    /// Decimal digits of precision (1 to 10).
    pub precision: u32,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl Default for Config {
    /// `x**3 - 2*x - 5` from `x0 = 3` to five digits, at most 100
    /// iterations.
    fn default() -> Self {
        Self {
            formula: DEFAULT_FORMULA.to_string(),
            x0: DEFAULT_INITIAL_GUESS,
            precision: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Config {
    /// Create a configuration with the default iteration cap.
    pub fn new(formula: impl Into<String>, x0: f64, precision: u32) -> Self {
        Self {
            formula: formula.into(),
            x0,
            precision,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Replace the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Step-size tolerance `10^-precision`.
    pub fn tolerance(&self) -> f64 {
        // 10^p is exact for p <= 22, so this is the correctly rounded 1e-p.
        1.0 / 10_f64.powi(self.precision as i32)
    }

    /// Check precision range, iteration cap and initial guess.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&self.precision) {
            return Err(ConfigError::PrecisionOutOfRange {
                got: self.precision,
                min: MIN_PRECISION,
                max: MAX_PRECISION,
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !self.x0.is_finite() {
            return Err(ConfigError::NonFiniteGuess(self.x0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.formula, DEFAULT_FORMULA);
        assert_eq!(config.x0, 3.0);
        assert_eq!(config.precision, 5);
        assert_eq!(config.max_iterations, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tolerance_from_precision() {
        for digits in MIN_PRECISION..=MAX_PRECISION {
            let config = Config::new("x", 0.0, digits);
            let expected: f64 = format!("1e-{}", digits).parse().unwrap();
            assert_eq!(config.tolerance(), expected);
        }
    }

    #[test]
    fn test_precision_out_of_range() {
        assert_eq!(
            Config::new("x", 0.0, 0).validate(),
            Err(ConfigError::PrecisionOutOfRange {
                got: 0,
                min: 1,
                max: 10
            })
        );
        assert!(Config::new("x", 0.0, 11).validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = Config::default().with_max_iterations(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn test_non_finite_guess_rejected() {
        let config = Config::new("x", f64::INFINITY, 5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteGuess(_))
        ));
        assert!(Config::new("x", f64::NAN, 5).validate().is_err());
    }

    #[test]
    fn test_config_clone() {
        let config1 = Config::new("sin(x)", 3.0, 8);
        let config2 = config1.clone();
        assert_eq!(config1, config2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"formula": "x^2 - 2"}"#).unwrap();
        assert_eq!(config.formula, "x^2 - 2");
        assert_eq!(config.x0, DEFAULT_INITIAL_GUESS);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
