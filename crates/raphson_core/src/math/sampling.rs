//! Curve sampling for plotting a function around the initial guess.

use crate::expr::{evaluate, Expression};

/// Half-width of the default plot window around `x0`.
pub const PLOT_HALF_WIDTH: f64 = 5.0;

/// Default number of sample points.
pub const PLOT_POINTS: usize = 100;

/// One sampled point of a curve.
///
/// `y` is `None` where the function is undefined or overflows, so a plot
/// shows a gap there instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Abscissa.
    pub x: f64,
    /// `f(x)`, if defined.
    pub y: Option<f64>,
}

/// Default plot window `[x0 - 5, x0 + 5]`.
pub fn plot_window(x0: f64) -> (f64, f64) {
    (x0 - PLOT_HALF_WIDTH, x0 + PLOT_HALF_WIDTH)
}

/// Sample `expression` at `points` evenly spaced abscissae from `start` to
/// `end` inclusive.
///
/// One point samples `start` only; zero points give an empty curve.
///
/// # Examples
///
/// ```
/// use raphson_core::expr::parse;
/// use raphson_core::math::sampling::sample_curve;
///
/// let curve = sample_curve(&parse("ln(x)").unwrap(), -1.0, 1.0, 3);
/// assert_eq!(curve.len(), 3);
/// assert_eq!(curve[0].y, None);
/// assert_eq!(curve[1].y, None);
/// assert_eq!(curve[2].y, Some(0.0));
/// ```
pub fn sample_curve(
    expression: &Expression,
    start: f64,
    end: f64,
    points: usize,
) -> Vec<CurvePoint> {
    let spacing = if points > 1 {
        (end - start) / (points - 1) as f64
    } else {
        0.0
    };
    (0..points)
        .map(|i| {
            // Pin the last point to `end` exactly.
            let x = if i + 1 == points && points > 1 {
                end
            } else {
                start + spacing * i as f64
            };
            CurvePoint {
                x,
                y: evaluate(expression, x).ok(),
            }
        })
        .collect()
}
