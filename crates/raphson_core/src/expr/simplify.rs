//! Algebraic clean-up of expression trees.
//!
//! Rewrites are local and applied bottom-up until the tree stops
//! changing:
//!
//! - constant folding of `+ - *`, of exact divisions and of integer powers
//!   (only when the result is finite)
//! - identities: `a + 0`, `a - 0`, `0 - a`, `a * 1`, `a * 0`, `a / 1`,
//!   `0 / a`, `a ^ 1`, `a ^ 0`, `1 ^ a`, `--a`, `a - a`
//! - sign normalisation: `a + -b` to `a - b`, `a - -b` to `a + b`,
//!   `-1 * a` to `-a`
//! - numeric factors move to the front and merge: `a * 3` to `3 * a`,
//!   `2 * (3 * a)` to `6 * a`
//!
//! `0 * a` becomes `0` even where `a` itself would be undefined, as
//! computer-algebra systems conventionally do.

use super::{BinaryOp, Expr, Expression};

/// Upper bound on bottom-up passes; each pass only shrinks the tree.
const MAX_PASSES: usize = 16;

/// Simplify `expression`, returning a new equivalent tree.
///
/// # Examples
///
/// ```
/// use raphson_core::expr::{derive, parse, simplify};
///
/// let df = derive(&parse("x^2 - 4").unwrap());
/// assert_eq!(simplify(&df).to_string(), "2 * x");
/// ```
pub fn simplify(expression: &Expression) -> Expression {
    let mut current = expression.root().clone();
    for _ in 0..MAX_PASSES {
        let next = simplify_node(&current);
        if next == current {
            break;
        }
        current = next;
    }
    expression.with_root(current)
}

fn simplify_node(node: &Expr) -> Expr {
    match node {
        Expr::Number(_) | Expr::Constant(_) | Expr::Variable => node.clone(),
        Expr::Neg(inner) => simplify_neg(simplify_node(inner)),
        Expr::Call(func, arg) => Expr::call(*func, simplify_node(arg)),
        Expr::Binary(op, lhs, rhs) => {
            let lhs = simplify_node(lhs);
            let rhs = simplify_node(rhs);
            match op {
                BinaryOp::Add => simplify_add(lhs, rhs),
                BinaryOp::Sub => simplify_sub(lhs, rhs),
                BinaryOp::Mul => simplify_mul(lhs, rhs),
                BinaryOp::Div => simplify_div(lhs, rhs),
                BinaryOp::Pow => simplify_pow(lhs, rhs),
            }
        }
    }
}

fn is_number(expr: &Expr, value: f64) -> bool {
    expr.as_number() == Some(value)
}

/// `Some(result)` when folding produced a finite number.
fn fold(value: f64) -> Option<Expr> {
    value.is_finite().then(|| Expr::number(value))
}

fn simplify_neg(inner: Expr) -> Expr {
    match inner {
        Expr::Number(value) => Expr::number(-value),
        Expr::Neg(double) => *double,
        other => Expr::neg(other),
    }
}

fn simplify_add(lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        if let Some(folded) = fold(a + b) {
            return folded;
        }
    }
    if is_number(&lhs, 0.0) {
        return rhs;
    }
    if is_number(&rhs, 0.0) {
        return lhs;
    }
    match rhs {
        Expr::Neg(negated) => Expr::sub(lhs, *negated),
        Expr::Number(value) if value < 0.0 => Expr::sub(lhs, Expr::number(-value)),
        rhs => Expr::add(lhs, rhs),
    }
}

fn simplify_sub(lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        if let Some(folded) = fold(a - b) {
            return folded;
        }
    }
    if is_number(&rhs, 0.0) {
        return lhs;
    }
    if is_number(&lhs, 0.0) {
        return simplify_neg(rhs);
    }
    if lhs == rhs {
        return Expr::number(0.0);
    }
    match rhs {
        Expr::Neg(negated) => Expr::add(lhs, *negated),
        Expr::Number(value) if value < 0.0 => Expr::add(lhs, Expr::number(-value)),
        rhs => Expr::sub(lhs, rhs),
    }
}

fn simplify_mul(lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        if let Some(folded) = fold(a * b) {
            return folded;
        }
    }
    if is_number(&lhs, 0.0) || is_number(&rhs, 0.0) {
        return Expr::number(0.0);
    }
    if is_number(&lhs, 1.0) {
        return rhs;
    }
    if is_number(&rhs, 1.0) {
        return lhs;
    }
    if is_number(&lhs, -1.0) {
        return simplify_neg(rhs);
    }
    if is_number(&rhs, -1.0) {
        return simplify_neg(lhs);
    }

    // Numeric factor to the front.
    let (lhs, rhs) = match (lhs, rhs) {
        (lhs, Expr::Number(value)) if lhs.as_number().is_none() => (Expr::number(value), lhs),
        pair => pair,
    };

    // c1 * (c2 * a) -> (c1 c2) * a
    if let (Some(c1), Expr::Binary(BinaryOp::Mul, inner_lhs, inner_rhs)) = (lhs.as_number(), &rhs)
    {
        if let Some(c2) = inner_lhs.as_number() {
            if let Some(product) = fold(c1 * c2) {
                return simplify_mul(product, (**inner_rhs).clone());
            }
        }
    }

    Expr::mul(lhs, rhs)
}

fn simplify_div(lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        if b != 0.0 {
            let quotient = a / b;
            // Only exact quotients fold; 1/3 stays readable.
            if quotient.is_finite() && quotient.fract() == 0.0 && quotient * b == a {
                return Expr::number(quotient);
            }
        }
    }
    if is_number(&rhs, 1.0) {
        return lhs;
    }
    if is_number(&lhs, 0.0) && rhs.as_number().map_or(true, |b| b != 0.0) {
        return Expr::number(0.0);
    }
    Expr::div(lhs, rhs)
}

fn simplify_pow(base: Expr, exponent: Expr) -> Expr {
    if let (Some(a), Some(n)) = (base.as_number(), exponent.as_number()) {
        if n.fract() == 0.0 && !(a == 0.0 && n < 0.0) {
            if let Some(folded) = fold(a.powf(n)) {
                return folded;
            }
        }
    }
    if is_number(&exponent, 1.0) {
        return base;
    }
    if is_number(&exponent, 0.0) || is_number(&base, 1.0) {
        return Expr::number(1.0);
    }
    Expr::pow(base, exponent)
}
