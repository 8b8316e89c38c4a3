//! Raphson CLI - Newton-Raphson Root Finding from the Command Line
//!
//! Command-line front end for `raphson_core`.
//!
//! # Commands
//!
//! - `raphson solve -f <formula> -x <x0>` - Find a root and print the iterations
//! - `raphson derive -f <formula>` - Print the simplified derivative
//! - `raphson batch -i <problems.toml>` - Solve many problems at once
//! - `raphson sample` - Sample the function around the initial guess
//!
//! # Configuration
//!
//! Defaults, then `raphson.toml` (or `-c <file>`), then `RAPHSON_*`
//! environment variables, then command-line flags.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod render;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};

/// Newton-Raphson root finder
#[derive(Parser)]
#[command(name = "raphson")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: ./raphson.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a root by Newton-Raphson iteration
    Solve {
        /// Function of one variable, e.g. "x**3 - 2*x - 5"
        #[arg(short, long)]
        formula: Option<String>,

        /// Initial guess
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        x0: Option<f64>,

        /// Decimal digits of precision (1-10)
        #[arg(short, long)]
        precision: Option<u32>,

        /// Maximum number of iterations
        #[arg(short, long)]
        max_iterations: Option<usize>,

        /// Output format (table, json, steps)
        #[arg(long)]
        format: Option<String>,
    },

    /// Print the simplified derivative of a function
    Derive {
        /// Function of one variable
        #[arg(short, long)]
        formula: Option<String>,
    },

    /// Solve every problem listed in a TOML file
    Batch {
        /// Path to problems file
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(long)]
        format: Option<String>,
    },

    /// Sample the function for plotting
    Sample {
        /// Function of one variable
        #[arg(short, long)]
        formula: Option<String>,

        /// Initial guess; the window defaults to x0 - 5 .. x0 + 5
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        x0: Option<f64>,

        /// Number of points
        #[arg(short = 'n', long)]
        points: Option<usize>,

        /// Window start
        #[arg(long, allow_negative_numbers = true)]
        start: Option<f64>,

        /// Window end
        #[arg(long, allow_negative_numbers = true)]
        end: Option<f64>,

        /// Output format (csv, json)
        #[arg(long, default_value = "csv")]
        format: String,
    },
}

impl Cli {
    /// Overrides carried by the command line
    fn args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            verbose: self.verbose,
            ..Default::default()
        };
        match &self.command {
            Commands::Solve {
                formula,
                x0,
                precision,
                max_iterations,
                format,
            } => {
                args.formula = formula.clone();
                args.x0 = *x0;
                args.precision = *precision;
                args.max_iterations = *max_iterations;
                args.format = format.clone();
            }
            Commands::Derive { formula } => args.formula = formula.clone(),
            Commands::Batch { format, .. } => args.format = format.clone(),
            Commands::Sample {
                formula,
                x0,
                points,
                ..
            } => {
                args.formula = formula.clone();
                args.x0 = *x0;
                args.sample_points = *points;
            }
        }
        args
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.args()).context("failed to load configuration")?;

    // Initialise tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Solve { .. } => commands::solve::run(&config)?,
        Commands::Derive { .. } => commands::derive::run(&config.formula)?,
        Commands::Batch { input, .. } => commands::batch::run(&input, &config)?,
        Commands::Sample {
            start, end, format, ..
        } => commands::sample::run(&config, start, end, &format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solve_arguments() {
        let cli = Cli::parse_from([
            "raphson", "-v", "solve", "-f", "x^2 - 2", "-x", "-1.5", "-p", "8", "--format", "steps",
        ]);
        let args = cli.args();

        assert!(args.verbose);
        assert_eq!(args.formula.as_deref(), Some("x^2 - 2"));
        assert_eq!(args.x0, Some(-1.5));
        assert_eq!(args.precision, Some(8));
        assert_eq!(args.format.as_deref(), Some("steps"));
        assert_eq!(args.max_iterations, None);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["raphson", "derive", "-f", "sin(x)", "-c", "custom.toml"]);
        let args = cli.args();
        assert_eq!(args.config_file, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.formula.as_deref(), Some("sin(x)"));
    }

    #[test]
    fn test_sample_arguments() {
        let cli = Cli::parse_from(["raphson", "sample", "-n", "50", "--start", "-3", "--end", "3"]);
        let args = cli.args();
        assert_eq!(args.sample_points, Some(50));
        match cli.command {
            Commands::Sample {
                start, end, format, ..
            } => {
                assert_eq!(start, Some(-3.0));
                assert_eq!(end, Some(3.0));
                assert_eq!(format, "csv");
            }
            _ => panic!("expected sample"),
        }
    }
}
