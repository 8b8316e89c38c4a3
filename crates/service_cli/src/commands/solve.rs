//! Solve command implementation
//!
//! Runs Newton-Raphson on the configured formula and prints the trace.

use raphson_core::solve;
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::render::{render_json, render_steps, render_table};
use crate::{CliError, Result};

/// Run the solve command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Solving f(x) = {}", config.formula);
    info!("  Initial guess: {}", config.x0);
    info!("  Precision: {} digits", config.precision);
    info!("  Max iterations: {}", config.max_iterations);
    info!("  Output format: {}", config.format);

    let solver_config = config.solver_config();
    let solution = solve(&solver_config)?;
    let precision = config.precision as usize;

    let output = match config.format {
        OutputFormat::Table => render_table(&solution, precision),
        OutputFormat::Steps => render_steps(&solution, precision),
        OutputFormat::Json => render_json(&solver_config, &solution)?,
    };
    println!("{}", output.trim_end());

    match solution.root() {
        Some(root) => {
            info!("Converged to {} after {} iterations", root, solution.trace.len());
            Ok(())
        }
        None => {
            let outcome = solution.trace.outcome().to_string();
            warn!("{}", outcome);
            Err(CliError::NotConverged(outcome))
        }
    }
}
