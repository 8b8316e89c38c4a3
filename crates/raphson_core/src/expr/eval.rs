//! Numerical evaluation of expression trees.

use super::{BinaryOp, Expr, Expression, Function};
use crate::types::EvaluationError;
use num_traits::Float;

/// Evaluate `expression` with its variable bound to `x`.
///
/// Generic over [`num_traits::Float`]; the solver uses `f64`. Every
/// intermediate result is checked, so the first undefined operation is
/// reported:
///
/// - [`DomainError`](crate::types::EvaluationErrorKind::DomainError) for
///   `ln` of a non-positive value, `sqrt` of a negative value, `asin`/`acos`
///   outside `[-1, 1]`, division by zero, `0^negative`, or any NaN result
/// - [`Overflow`](crate::types::EvaluationErrorKind::Overflow) when a
///   result is infinite although its operands were finite
///
/// # Examples
///
/// ```
/// use raphson_core::expr::{evaluate, parse};
///
/// let f = parse("x^2 - 4").unwrap();
/// assert_eq!(evaluate(&f, 3.0_f64).unwrap(), 5.0);
///
/// let g = parse("ln(x)").unwrap();
/// assert!(evaluate(&g, 0.0_f64).unwrap_err().is_domain_error());
///
/// let h = parse("exp(x)").unwrap();
/// assert!(evaluate(&h, 1000.0_f64).unwrap_err().is_overflow());
/// ```
pub fn evaluate<T: Float>(expression: &Expression, x: T) -> Result<T, EvaluationError> {
    let x = checked(x, "variable")?;
    eval_node(expression.root(), x)
}

fn eval_node<T: Float>(node: &Expr, x: T) -> Result<T, EvaluationError> {
    match node {
        Expr::Number(value) => literal(*value),
        Expr::Constant(constant) => literal(constant.value()),
        Expr::Variable => Ok(x),
        Expr::Neg(inner) => Ok(-eval_node(inner, x)?),
        Expr::Binary(op, lhs, rhs) => {
            let a = eval_node(lhs, x)?;
            let b = eval_node(rhs, x)?;
            apply_binary(*op, a, b)
        }
        Expr::Call(func, arg) => {
            let u = eval_node(arg, x)?;
            apply_function(*func, u)
        }
    }
}

fn literal<T: Float>(value: f64) -> Result<T, EvaluationError> {
    match T::from(value) {
        Some(converted) => checked(converted, "literal"),
        None => Err(EvaluationError::overflow("literal")),
    }
}

fn apply_binary<T: Float>(op: BinaryOp, a: T, b: T) -> Result<T, EvaluationError> {
    let name = op.symbol();
    match op {
        BinaryOp::Add => checked(a + b, name),
        BinaryOp::Sub => checked(a - b, name),
        BinaryOp::Mul => checked(a * b, name),
        BinaryOp::Div => {
            if b == T::zero() {
                return Err(EvaluationError::domain(name));
            }
            checked(a / b, name)
        }
        BinaryOp::Pow => {
            if a == T::zero() && b < T::zero() {
                return Err(EvaluationError::domain(name));
            }
            checked(a.powf(b), name)
        }
    }
}

fn apply_function<T: Float>(func: Function, u: T) -> Result<T, EvaluationError> {
    let name = func.name();
    let one = T::one();
    let value = match func {
        Function::Sin => u.sin(),
        Function::Cos => u.cos(),
        Function::Tan => u.tan(),
        Function::Asin | Function::Acos if u.abs() > one => {
            return Err(EvaluationError::domain(name));
        }
        Function::Asin => u.asin(),
        Function::Acos => u.acos(),
        Function::Atan => u.atan(),
        Function::Sinh => u.sinh(),
        Function::Cosh => u.cosh(),
        Function::Tanh => u.tanh(),
        Function::Exp => u.exp(),
        Function::Ln if u <= T::zero() => return Err(EvaluationError::domain(name)),
        Function::Ln => u.ln(),
        Function::Sqrt if u < T::zero() => return Err(EvaluationError::domain(name)),
        Function::Sqrt => u.sqrt(),
        Function::Abs => u.abs(),
    };
    checked(value, name)
}

/// Classify a non-finite result: NaN is a domain error, infinity an overflow.
fn checked<T: Float>(value: T, operation: &str) -> Result<T, EvaluationError> {
    if value.is_nan() {
        Err(EvaluationError::domain(operation))
    } else if value.is_infinite() {
        Err(EvaluationError::overflow(operation))
    } else {
        Ok(value)
    }
}
