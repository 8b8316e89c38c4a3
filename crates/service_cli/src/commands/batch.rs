//! Batch command implementation
//!
//! Solves every problem of a TOML file. Missing fields fall back to the
//! layered configuration.
//!
//! ```toml
//! [[problem]]
//! name = "sqrt2"
//! formula = "x^2 - 2"
//! x0 = 1.0
//!
//! [[problem]]
//! formula = "cos(x) - x"
//! precision = 10
//! ```

use raphson_core::math::solvers::Config;
use raphson_core::{solve_batch, Solution};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::render::{boxed_table, SolveReport};
use crate::{CliError, Result};

/// Contents of a problems file
#[derive(Debug, Default, Deserialize)]
pub struct ProblemFile {
    /// Problems in file order
    #[serde(default, rename = "problem")]
    pub problems: Vec<Problem>,
}

/// One entry of a problems file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Problem {
    /// Label shown in the output
    pub name: Option<String>,
    pub formula: Option<String>,
    pub x0: Option<f64>,
    pub precision: Option<u32>,
    pub max_iterations: Option<usize>,
}

impl Problem {
    /// Solver input with unset fields taken from `base`
    pub fn to_config(&self, base: &CliConfig) -> Config {
        Config::new(
            self.formula.clone().unwrap_or_else(|| base.formula.clone()),
            self.x0.unwrap_or(base.x0),
            self.precision.unwrap_or(base.precision),
        )
        .with_max_iterations(self.max_iterations.unwrap_or(base.max_iterations))
    }

    fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("problem {}", index + 1))
    }
}

/// Parse a problems file
pub fn load_problems(path: &Path) -> Result<ProblemFile> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_problems(&content)
}

/// Parse problems file text
pub fn parse_problems(content: &str) -> Result<ProblemFile> {
    toml::from_str(content).map_err(|e| CliError::InvalidArgument(format!("Invalid problems file: {}", e)))
}

/// Run the batch command
pub fn run(input: &str, config: &CliConfig) -> Result<()> {
    info!("Loading problems from {}", input);
    let file = load_problems(Path::new(input))?;
    info!("  {} problems", file.problems.len());

    let configs: Vec<Config> = file
        .problems
        .iter()
        .map(|problem| problem.to_config(config))
        .collect();
    let results = solve_batch(&configs);

    let output = match config.format {
        OutputFormat::Table => render_summary(&file.problems, &configs, &results),
        OutputFormat::Json => render_reports(&file.problems, &configs, &results)?,
        OutputFormat::Steps => {
            return Err(CliError::InvalidArgument(
                "Unknown format: steps. Supported for batch: json, table".to_string(),
            ));
        }
    };
    println!("{}", output.trim_end());

    let failed = results
        .iter()
        .filter(|result| !matches!(result, Ok(solution) if solution.root().is_some()))
        .count();
    if failed > 0 {
        warn!("{} of {} problems did not converge", failed, results.len());
        return Err(CliError::BatchFailed {
            failed,
            total: results.len(),
        });
    }

    info!("Batch complete");
    Ok(())
}

type BatchResult = std::result::Result<Solution, raphson_core::types::RootFinderError>;

/// One table row per problem
pub fn render_summary(problems: &[Problem], configs: &[Config], results: &[BatchResult]) -> String {
    let rows: Vec<Vec<String>> = problems
        .iter()
        .zip(configs)
        .zip(results)
        .enumerate()
        .map(|(i, ((problem, config), result))| {
            let precision = config.precision as usize;
            let (root, iterations, status) = match result {
                Ok(solution) => (
                    solution
                        .root()
                        .map(|root| format!("{:.*}", precision, root))
                        .unwrap_or_else(|| "-".to_string()),
                    solution.trace.len().to_string(),
                    solution.trace.outcome().to_string(),
                ),
                Err(err) => ("-".to_string(), "0".to_string(), err.to_string()),
            };
            vec![problem.label(i), config.formula.clone(), root, iterations, status]
        })
        .collect();

    boxed_table(&["Problem", "Formula", "Root", "Iterations", "Outcome"], &rows)
}

/// JSON array with a report or an error per problem
pub fn render_reports(
    problems: &[Problem],
    configs: &[Config],
    results: &[BatchResult],
) -> Result<String> {
    let entries: Vec<serde_json::Value> = problems
        .iter()
        .zip(configs)
        .zip(results)
        .enumerate()
        .map(|(i, ((problem, config), result))| {
            let body = match result {
                Ok(solution) => serde_json::to_value(SolveReport::new(config, solution))?,
                Err(err) => serde_json::json!({ "error": err.to_string() }),
            };
            Ok(serde_json::json!({ "name": problem.label(i), "result": body }))
        })
        .collect::<Result<_>>()?;

    Ok(serde_json::to_string_pretty(&entries)?)
}
