//! Text and JSON rendering of solutions.
//!
//! Every number is printed with `precision` decimals, as the results page
//! of the calculator shows them. Iterations are numbered from 1.

use raphson_core::math::solvers::{Config, Outcome, Trace};
use raphson_core::Solution;
use serde::Serialize;

use crate::Result;

const TABLE_HEADERS: [&str; 6] = ["Iteration", "x_n", "f(x_n)", "f'(x_n)", "x_{n+1}", "Error"];

/// One-line summary of how a run ended.
pub fn outcome_line(outcome: &Outcome, precision: usize) -> String {
    match outcome {
        Outcome::Converged { root } => format!("Root: {:.*}", precision, root),
        other => format!("No root found: {}", other),
    }
}

/// `f` and `f'` header lines shared by the text layouts.
fn header_lines(solution: &Solution) -> Vec<String> {
    vec![
        format!("f(x) = {}", solution.function),
        format!("f'(x) = {}", solution.derivative),
    ]
}

/// Newline-terminated lines.
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Summary followed by one table row per iteration.
pub fn render_table(solution: &Solution, precision: usize) -> String {
    let mut lines = header_lines(solution);
    lines.push(outcome_line(solution.trace.outcome(), precision));
    let mut out = join_lines(&lines);

    if solution.trace.is_empty() {
        return out;
    }

    let rows: Vec<Vec<String>> = solution
        .trace
        .records()
        .iter()
        .map(|r| {
            vec![
                (r.index + 1).to_string(),
                format!("{:.*}", precision, r.x_n),
                format!("{:.*}", precision, r.f_x),
                format!("{:.*}", precision, r.df_x),
                format!("{:.*}", precision, r.x_next),
                format!("{:.*}", precision, r.error),
            ]
        })
        .collect();

    out.push('\n');
    out.push_str(&boxed_table(&TABLE_HEADERS, &rows));
    out
}

/// Worked calculation for every iteration.
pub fn render_steps(solution: &Solution, precision: usize) -> String {
    let p = precision;
    let mut lines = header_lines(solution);

    for r in solution.trace.records() {
        let (n, next) = (r.index, r.index + 1);
        lines.extend([
            String::new(),
            format!("Iteration {}:", next),
            format!("  x_{} = {:.*}", n, p, r.x_n),
            format!("  f(x_{}) = {:.*}", n, p, r.f_x),
            format!("  f'(x_{}) = {:.*}", n, p, r.df_x),
            format!(
                "  x_{next} = x_{n} - f(x_{n})/f'(x_{n}) = {:.p$} - {:.p$}/{:.p$} = {:.p$}",
                r.x_n, r.f_x, r.df_x, r.x_next,
            ),
            format!(
                "  Error = |x_{next} - x_{n}| = |{:.p$} - {:.p$}| = {:.p$}",
                r.x_next, r.x_n, r.error,
            ),
        ]);
    }

    lines.push(String::new());
    lines.push(outcome_line(solution.trace.outcome(), precision));
    join_lines(&lines)
}

/// JSON document for one solved problem.
#[derive(Debug, Serialize)]
pub struct SolveReport<'a> {
    /// Function as printed.
    pub function: String,
    /// Simplified derivative as printed.
    pub derivative: String,
    /// Solver input.
    pub config: &'a Config,
    /// Step tolerance derived from the precision.
    pub tolerance: f64,
    /// Root, when converged.
    pub root: Option<f64>,
    /// Records and outcome.
    pub trace: &'a Trace,
}

impl<'a> SolveReport<'a> {
    /// Build a report for `solution` solved under `config`.
    pub fn new(config: &'a Config, solution: &'a Solution) -> Self {
        Self {
            function: solution.function.to_string(),
            derivative: solution.derivative.to_string(),
            config,
            tolerance: config.tolerance(),
            root: solution.root(),
            trace: &solution.trace,
        }
    }
}

/// Pretty-printed JSON report.
pub fn render_json(config: &Config, solution: &Solution) -> Result<String> {
    Ok(serde_json::to_string_pretty(&SolveReport::new(
        config, solution,
    ))?)
}

/// Box-drawing table with right-aligned cells.
pub fn boxed_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!(" {:>width$} ", cell, width = w)
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = rule("┌", "┬", "┐");
    out.push_str(&line(&header_cells));
    out.push_str(&rule("├", "┼", "┤"));
    for row in rows {
        out.push_str(&line(row));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use raphson_core::solve;

    fn default_solution() -> (Config, Solution) {
        let config = Config::default();
        let solution = solve(&config).unwrap();
        (config, solution)
    }

    #[test]
    fn test_outcome_line() {
        assert_eq!(
            outcome_line(&Outcome::Converged { root: 2.0945514815 }, 5),
            "Root: 2.09455"
        );
        assert_eq!(
            outcome_line(&Outcome::DerivativeVanished { index: 0, x: 0.0 }, 5),
            "No root found: derivative vanished at x = 0 (iteration 1)"
        );
    }

    #[test]
    fn test_table_layout() {
        let (_, solution) = default_solution();
        let table = render_table(&solution, 5);

        assert!(table.starts_with("f(x) = x^3 - 2 * x - 5\nf'(x) = 3 * x^2 - 2\nRoot: 2.09455\n"));
        assert!(table.contains("│ Iteration │"));
        assert!(table.contains("│         1 │ 3.00000 │"));
        assert!(table.contains("0.64000"));
        // Header plus five rows.
        assert_eq!(table.lines().filter(|l| l.starts_with('│')).count(), 6);
    }

    #[test]
    fn test_table_without_iterations() {
        let solution = solve(&Config::new("x^2 - 4", 0.0, 5)).unwrap();
        let table = render_table(&solution, 5);
        assert!(!table.contains('┌'));
        assert!(table.contains("derivative vanished"));
    }

    #[test]
    fn test_steps_layout() {
        let (_, solution) = default_solution();
        let steps = render_steps(&solution, 5);

        assert!(steps.contains("Iteration 1:\n  x_0 = 3.00000\n  f(x_0) = 16.00000\n  f'(x_0) = 25.00000\n"));
        assert!(steps.contains(
            "  x_1 = x_0 - f(x_0)/f'(x_0) = 3.00000 - 16.00000/25.00000 = 2.36000\n"
        ));
        assert!(steps.contains("  Error = |x_1 - x_0| = |2.36000 - 3.00000| = 0.64000\n"));
        assert!(steps.contains("Iteration 5:"));
        assert!(steps.trim_end().ends_with("Root: 2.09455"));
    }

    #[test]
    fn test_json_report() {
        let (config, solution) = default_solution();
        let json = render_json(&config, &solution).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["derivative"], "3 * x^2 - 2");
        assert_eq!(value["config"]["precision"], 5);
        assert_eq!(value["trace"]["outcome"]["kind"], "converged");
        assert_eq!(value["trace"]["records"].as_array().unwrap().len(), 5);
        assert_relative_eq!(value["root"].as_f64().unwrap(), 2.0945515, epsilon = 1e-6);
    }

    #[test]
    fn test_boxed_table_widths() {
        let table = boxed_table(&["a", "long"], &[vec!["123".into(), "x".into()]]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "┌─────┬──────┐");
        assert_eq!(lines[1], "│   a │ long │");
        assert_eq!(lines[3], "│ 123 │    x │");
        assert_eq!(lines[4], "└─────┴──────┘");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_one_row_per_iteration(cap in 1usize..40, x0 in 0.5f64..5.0) {
            let config = Config::new("x^2 + 1", x0, 5).with_max_iterations(cap);
            let solution = solve(&config).unwrap();
            let len = solution.trace.len();
            prop_assert!(len <= cap);

            let table = render_table(&solution, 5);
            let rows = table.lines().filter(|l| l.starts_with('│')).count();
            let expected = if len == 0 { 0 } else { len + 1 };
            prop_assert_eq!(rows, expected);

            let steps = render_steps(&solution, 5);
            let blocks = steps.lines().filter(|l| l.starts_with("Iteration ")).count();
            prop_assert_eq!(blocks, len);
        }
    }
}
