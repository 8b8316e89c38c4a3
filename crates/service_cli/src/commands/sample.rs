//! Sample command implementation
//!
//! Samples the function around the initial guess for plotting and lists
//! the Newton iterates to mark on the curve.

use raphson_core::expr::parse;
use raphson_core::math::sampling::{plot_window, sample_curve, CurvePoint};
use raphson_core::solve;
use raphson_core::types::RootFinderError;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Curve plus iterate markers
#[derive(Debug, Serialize)]
pub struct Plot {
    /// Sampled curve
    pub curve: Vec<CurvePoint>,
    /// `(x_n, f(x_n))` of every iteration
    pub iterates: Vec<(f64, f64)>,
}

/// Fewest points that still span the window
pub const MIN_SAMPLE_POINTS: usize = 2;

/// Sample the configured function over `[start, end]`, by default `x0 ± 5`
pub fn build_plot(config: &CliConfig, start: Option<f64>, end: Option<f64>) -> Result<Plot> {
    if config.sample_points < MIN_SAMPLE_POINTS {
        return Err(CliError::InvalidArgument(format!(
            "sample_points must be at least {}, got {}",
            MIN_SAMPLE_POINTS, config.sample_points
        )));
    }

    let function = parse(&config.formula).map_err(RootFinderError::from)?;
    let (default_start, default_end) = plot_window(config.x0);
    let (start, end) = (start.unwrap_or(default_start), end.unwrap_or(default_end));
    if start.is_nan() || end.is_nan() || start >= end {
        return Err(CliError::InvalidArgument(format!(
            "Empty plot window: [{}, {}]",
            start, end
        )));
    }

    let curve = sample_curve(&function, start, end, config.sample_points);
    let iterates = solve(&config.solver_config())?.trace.iterates().collect();
    Ok(Plot { curve, iterates })
}

/// CSV rendering; undefined points leave `y` empty
pub fn render_csv(plot: &Plot) -> String {
    let mut out = String::from("x,y\n");
    for point in &plot.curve {
        let line = match point.y {
            Some(y) => format!("{},{}\n", point.x, y),
            None => format!("{},\n", point.x),
        };
        out.push_str(&line);
    }
    out
}

/// Run the sample command
pub fn run(config: &CliConfig, start: Option<f64>, end: Option<f64>, format: &str) -> Result<()> {
    info!("Sampling f(x) = {}", config.formula);
    info!("  Points: {}", config.sample_points);

    let plot = build_plot(config, start, end)?;
    let undefined = plot.curve.iter().filter(|p| p.y.is_none()).count();
    if undefined > 0 {
        info!("  {} points undefined", undefined);
    }

    match format {
        "csv" => print!("{}", render_csv(&plot)),
        "json" => println!("{}", serde_json::to_string_pretty(&plot)?),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: csv, json",
                other
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let plot = build_plot(&CliConfig::default(), None, None).unwrap();
        assert_eq!(plot.curve.len(), 100);
        assert_eq!(plot.curve.first().unwrap().x, -2.0);
        assert_eq!(plot.curve.last().unwrap().x, 8.0);
        assert_eq!(plot.iterates.len(), 5);
        assert_eq!(plot.iterates[0], (3.0, 16.0));
    }

    #[test]
    fn test_csv_gaps() {
        let config = CliConfig {
            formula: "ln(x)".to_string(),
            x0: 1.0,
            sample_points: 3,
            ..Default::default()
        };
        let plot = build_plot(&config, Some(-1.0), Some(1.0)).unwrap();
        assert_eq!(render_csv(&plot), "x,y\n-1,\n0,\n1,0\n");
    }

    #[test]
    fn test_empty_window_rejected() {
        let result = build_plot(&CliConfig::default(), Some(2.0), Some(2.0));
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_too_few_points_rejected() {
        let config = CliConfig {
            sample_points: 1,
            ..Default::default()
        };
        let result = build_plot(&config, None, None);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_format() {
        let result = run(&CliConfig::default(), None, None, "svg");
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
