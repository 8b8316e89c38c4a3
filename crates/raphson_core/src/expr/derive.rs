//! Symbolic differentiation.
//!
//! Each node kind has an explicit rule; named functions use the chain
//! rule. The output is not simplified beyond skipping a `* 1` when the
//! inner derivative is literally one; run [`simplify`](super::simplify)
//! for readable output.

use super::{BinaryOp, Expr, Expression, Function};

/// Differentiate `expression` with respect to its variable.
///
/// Returns a new tree; the input is left untouched.
///
/// # Examples
///
/// ```
/// use raphson_core::expr::{derive, evaluate, parse};
///
/// let f = parse("sin(x) * x").unwrap();
/// let df = derive(&f);
///
/// // d/dx [x sin x] = sin x + x cos x
/// let expected = 1.0_f64.sin() + 1.0_f64.cos();
/// assert!((evaluate(&df, 1.0_f64).unwrap() - expected).abs() < 1e-12);
/// ```
pub fn derive(expression: &Expression) -> Expression {
    expression.with_root(derive_node(expression.root()))
}

fn derive_node(node: &Expr) -> Expr {
    match node {
        Expr::Number(_) | Expr::Constant(_) => Expr::number(0.0),
        Expr::Variable => Expr::number(1.0),
        Expr::Neg(inner) => Expr::neg(derive_node(inner)),
        Expr::Binary(op, lhs, rhs) => derive_binary(*op, lhs, rhs),
        Expr::Call(func, arg) => chain(derive_function(*func, arg), derive_node(arg)),
    }
}

fn derive_binary(op: BinaryOp, u: &Expr, v: &Expr) -> Expr {
    match op {
        BinaryOp::Add => Expr::add(derive_node(u), derive_node(v)),
        BinaryOp::Sub => Expr::sub(derive_node(u), derive_node(v)),
        // (uv)' = u'v + uv'
        BinaryOp::Mul => Expr::add(
            Expr::mul(derive_node(u), v.clone()),
            Expr::mul(u.clone(), derive_node(v)),
        ),
        // (u/v)' = (u'v - uv') / v^2
        BinaryOp::Div => Expr::div(
            Expr::sub(
                Expr::mul(derive_node(u), v.clone()),
                Expr::mul(u.clone(), derive_node(v)),
            ),
            Expr::pow(v.clone(), Expr::number(2.0)),
        ),
        BinaryOp::Pow => derive_power(u, v),
    }
}

fn derive_power(base: &Expr, exponent: &Expr) -> Expr {
    let base_varies = base.contains_variable();
    let exponent_varies = exponent.contains_variable();

    match (base_varies, exponent_varies) {
        (false, false) => Expr::number(0.0),
        // (u^n)' = n u^(n-1) u'
        (true, false) => {
            let reduced = match exponent.as_number() {
                Some(n) => Expr::number(n - 1.0),
                None => Expr::sub(exponent.clone(), Expr::number(1.0)),
            };
            chain(
                Expr::mul(exponent.clone(), Expr::pow(base.clone(), reduced)),
                derive_node(base),
            )
        }
        // (a^v)' = a^v ln(a) v'
        (false, true) => chain(
            Expr::mul(
                Expr::pow(base.clone(), exponent.clone()),
                Expr::call(Function::Ln, base.clone()),
            ),
            derive_node(exponent),
        ),
        // (u^v)' = u^v (v' ln(u) + v u' / u)
        (true, true) => Expr::mul(
            Expr::pow(base.clone(), exponent.clone()),
            Expr::add(
                Expr::mul(derive_node(exponent), Expr::call(Function::Ln, base.clone())),
                Expr::div(
                    Expr::mul(exponent.clone(), derive_node(base)),
                    base.clone(),
                ),
            ),
        ),
    }
}

/// f'(u) for each named function, before multiplying by u'.
fn derive_function(func: Function, u: &Expr) -> Expr {
    let one = || Expr::number(1.0);
    let square = |e: Expr| Expr::pow(e, Expr::number(2.0));

    match func {
        Function::Sin => Expr::call(Function::Cos, u.clone()),
        Function::Cos => Expr::neg(Expr::call(Function::Sin, u.clone())),
        Function::Tan => Expr::div(one(), square(Expr::call(Function::Cos, u.clone()))),
        Function::Asin => Expr::div(
            one(),
            Expr::call(Function::Sqrt, Expr::sub(one(), square(u.clone()))),
        ),
        Function::Acos => Expr::neg(Expr::div(
            one(),
            Expr::call(Function::Sqrt, Expr::sub(one(), square(u.clone()))),
        )),
        Function::Atan => Expr::div(one(), Expr::add(one(), square(u.clone()))),
        Function::Sinh => Expr::call(Function::Cosh, u.clone()),
        Function::Cosh => Expr::call(Function::Sinh, u.clone()),
        Function::Tanh => Expr::div(one(), square(Expr::call(Function::Cosh, u.clone()))),
        Function::Exp => Expr::call(Function::Exp, u.clone()),
        Function::Ln => Expr::div(one(), u.clone()),
        Function::Sqrt => Expr::div(
            one(),
            Expr::mul(Expr::number(2.0), Expr::call(Function::Sqrt, u.clone())),
        ),
        Function::Abs => Expr::div(u.clone(), Expr::call(Function::Abs, u.clone())),
    }
}

/// `outer * inner`, dropping the factor when `inner` is literally 1.
fn chain(outer: Expr, inner: Expr) -> Expr {
    match inner.as_number() {
        Some(value) if value == 1.0 => outer,
        _ => Expr::mul(outer, inner),
    }
}
