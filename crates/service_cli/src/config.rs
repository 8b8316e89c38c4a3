//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line arguments.

use raphson_core::math::solvers::{Config, MAX_PRECISION, MIN_PRECISION};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Configuration file looked up in the working directory when `-c` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "raphson.toml";

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "RAPHSON_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, steps")]
    InvalidFormat(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels accepted in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How solve results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Summary plus one row per iteration.
    #[default]
    Table,
    /// Machine-readable report.
    Json,
    /// Worked calculation for every iteration.
    Steps,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "steps" => Ok(OutputFormat::Steps),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Steps => write!(f, "steps"),
        }
    }
}

/// Layered CLI configuration (`raphson.toml`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
    /// Function text
    pub formula: String,
    /// Initial guess
    pub x0: f64,
    /// Decimal digits of precision
    pub precision: u32,
    /// Iteration cap
    pub max_iterations: usize,
    /// Points sampled by the `sample` command
    pub sample_points: usize,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        let solver = Config::default();
        Self {
            log_level: LogLevel::default(),
            format: OutputFormat::default(),
            formula: solver.formula,
            x0: solver.x0,
            precision: solver.precision,
            max_iterations: solver.max_iterations,
            sample_points: raphson_core::math::sampling::PLOT_POINTS,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `RAPHSON_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level.parse()?;
        }
        if let Some(format) = var("FORMAT") {
            self.format = format.parse()?;
        }
        if let Some(formula) = var("FORMULA") {
            self.formula = formula;
        }
        if let Some(x0) = var("X0") {
            self.x0 = parse_value("RAPHSON_X0", &x0)?;
        }
        if let Some(precision) = var("PRECISION") {
            self.precision = parse_value("RAPHSON_PRECISION", &precision)?;
        }
        if let Some(max) = var("MAX_ITERATIONS") {
            self.max_iterations = parse_value("RAPHSON_MAX_ITERATIONS", &max)?;
        }
        if let Some(points) = var("SAMPLE_POINTS") {
            self.sample_points = parse_value("RAPHSON_SAMPLE_POINTS", &points)?;
        }

        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(formula) = &cli.formula {
            self.formula = formula.clone();
        }
        if let Some(x0) = cli.x0 {
            self.x0 = x0;
        }
        if let Some(precision) = cli.precision {
            self.precision = precision;
        }
        if let Some(max) = cli.max_iterations {
            self.max_iterations = max;
        }
        if let Some(points) = cli.sample_points {
            self.sample_points = points;
        }
        if let Some(format) = &cli.format {
            self.format = format.parse()?;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        Ok(())
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(MIN_PRECISION..=MAX_PRECISION).contains(&self.precision) {
            errors.push(format!(
                "precision {} must be between {} and {}",
                self.precision, MIN_PRECISION, MAX_PRECISION
            ));
        }
        if self.max_iterations == 0 {
            errors.push("max_iterations must be greater than 0".to_string());
        }
        if !self.x0.is_finite() {
            errors.push(format!("x0 must be finite, got {}", self.x0));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Solver input for the configured problem
    pub fn solver_config(&self) -> Config {
        Config::new(self.formula.clone(), self.x0, self.precision)
            .with_max_iterations(self.max_iterations)
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Command-line overrides gathered from clap
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Force debug logging
    pub verbose: bool,
    /// Formula override
    pub formula: Option<String>,
    /// Initial guess override
    pub x0: Option<f64>,
    /// Precision override
    pub precision: Option<u32>,
    /// Iteration cap override
    pub max_iterations: Option<usize>,
    /// Sample count override
    pub sample_points: Option<usize>,
    /// Output format override
    pub format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    }
    .with_overrides(lookup)?;

    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.formula, "x**3 - 2*x - 5");
        assert_eq!(config.x0, 3.0);
        assert_eq!(config.precision, 5);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.sample_points, 100);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("steps".parse::<OutputFormat>().unwrap(), OutputFormat::Steps);
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(format!("{}", OutputFormat::Steps), "steps");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            format = "steps"
            formula = "cos(x) - x"
            x0 = 1.0
            precision = 8
            max_iterations = 20
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Steps);
        assert_eq!(config.formula, "cos(x) - x");
        assert_eq!(config.x0, 1.0);
        assert_eq!(config.precision, 8);
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.sample_points, 100);
    }

    #[test]
    fn test_toml_rejects_unknown_format() {
        let result: Result<CliConfig, _> = toml::from_str(r#"format = "csv""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_override() {
        let config = CliConfig::default()
            .with_overrides(env(&[
                ("RAPHSON_FORMULA", "x^2 - 2"),
                ("RAPHSON_X0", "1.5"),
                ("RAPHSON_PRECISION", "9"),
                ("RAPHSON_FORMAT", "json"),
            ]))
            .unwrap();

        assert_eq!(config.formula, "x^2 - 2");
        assert_eq!(config.x0, 1.5);
        assert_eq!(config.precision, 9);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_env_override_rejects_bad_number() {
        let result = CliConfig::default().with_overrides(env(&[("RAPHSON_X0", "three")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = CliConfig::default();
        let cli = CliArgs {
            formula: Some("sin(x)".to_string()),
            x0: Some(3.0),
            precision: Some(10),
            format: Some("steps".to_string()),
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.formula, "sin(x)");
        assert_eq!(config.precision, 10);
        assert_eq!(config.format, OutputFormat::Steps);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_cli_overrides_env() {
        let cli = CliArgs {
            config_file: None,
            precision: Some(3),
            ..Default::default()
        };
        let config =
            build_config_with(&cli, env(&[("RAPHSON_PRECISION", "7"), ("RAPHSON_X0", "2")]))
                .unwrap();

        assert_eq!(config.precision, 3);
        assert_eq!(config.x0, 2.0);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/raphson.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let config = CliConfig {
            precision: 0,
            max_iterations: 0,
            x0: f64::NAN,
            ..Default::default()
        };

        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_ignores_sample_points() {
        let config = CliConfig {
            sample_points: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_solver_config() {
        let config = CliConfig {
            max_iterations: 7,
            ..Default::default()
        };
        let solver = config.solver_config();
        assert_eq!(solver.formula, "x**3 - 2*x - 5");
        assert_eq!(solver.max_iterations, 7);
        assert!(solver.validate().is_ok());
    }
}
