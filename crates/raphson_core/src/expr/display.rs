//! Rendering expression trees back to formula text.
//!
//! Output uses the minimum number of parentheses needed for [`parse`]
//! to rebuild an equivalent tree: `+ - * /` are written with surrounding
//! spaces, `^` without.
//!
//! [`parse`]: super::parse

use super::{BinaryOp, Expr};
use std::fmt;

/// Precedence of an atom (number, constant, variable, call).
const ATOM: u8 = 5;
/// Precedence of unary minus, and of negative literals.
const PREFIX: u8 = 3;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Number(value) if value.is_sign_negative() => PREFIX,
        Expr::Number(_) | Expr::Constant(_) | Expr::Variable | Expr::Call(..) => ATOM,
        Expr::Neg(_) => PREFIX,
        Expr::Binary(op, ..) => op.precedence(),
    }
}

pub(super) fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, variable: &str) -> fmt::Result {
    match expr {
        Expr::Number(value) => write!(f, "{}", value),
        Expr::Constant(constant) => f.write_str(constant.name()),
        Expr::Variable => f.write_str(variable),
        Expr::Neg(inner) => {
            f.write_str("-")?;
            write_operand(f, inner, variable, precedence(inner) <= PREFIX)
        }
        Expr::Call(func, arg) => {
            write!(f, "{}(", func.name())?;
            write_expr(f, arg, variable)?;
            f.write_str(")")
        }
        Expr::Binary(BinaryOp::Pow, base, exponent) => {
            write_operand(f, base, variable, precedence(base) <= BinaryOp::Pow.precedence())?;
            f.write_str("^")?;
            let grouped = precedence(exponent) < ATOM
                && !matches!(**exponent, Expr::Binary(BinaryOp::Pow, ..));
            write_operand(f, exponent, variable, grouped)
        }
        Expr::Binary(op, lhs, rhs) => {
            let own = op.precedence();
            write_operand(f, lhs, variable, precedence(lhs) < own)?;
            write!(f, " {} ", op.symbol())?;
            // `a - (b - c)` and `a / (b * c)` need the group, `a + (b + c)` does not.
            let rhs_grouped = match op {
                BinaryOp::Sub | BinaryOp::Div => precedence(rhs) <= own,
                _ => precedence(rhs) < own,
            };
            write_operand(f, rhs, variable, rhs_grouped)
        }
    }
}

fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &Expr,
    variable: &str,
    grouped: bool,
) -> fmt::Result {
    if grouped {
        f.write_str("(")?;
        write_expr(f, expr, variable)?;
        f.write_str(")")
    } else {
        write_expr(f, expr, variable)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{parse, Expression, Function};
    use super::*;

    fn render(expr: Expr) -> String {
        Expression::new(expr, "x").to_string()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(render(Expr::number(3.0)), "3");
        assert_eq!(render(Expr::number(0.5)), "0.5");
        assert_eq!(render(Expr::number(-2.0)), "-2");
    }

    #[test]
    fn test_minimal_parentheses() {
        let expr = Expr::mul(
            Expr::add(Expr::Variable, Expr::number(1.0)),
            Expr::Variable,
        );
        assert_eq!(render(expr), "(x + 1) * x");

        let expr = Expr::sub(
            Expr::Variable,
            Expr::sub(Expr::number(1.0), Expr::Variable),
        );
        assert_eq!(render(expr), "x - (1 - x)");

        let expr = Expr::add(
            Expr::Variable,
            Expr::add(Expr::number(1.0), Expr::Variable),
        );
        assert_eq!(render(expr), "x + 1 + x");
    }

    #[test]
    fn test_division_grouping() {
        let expr = Expr::div(
            Expr::number(1.0),
            Expr::mul(Expr::number(2.0), Expr::Variable),
        );
        assert_eq!(render(expr), "1 / (2 * x)");
    }

    #[test]
    fn test_power_grouping() {
        let expr = Expr::pow(Expr::neg(Expr::Variable), Expr::number(2.0));
        assert_eq!(render(expr), "(-x)^2");

        let expr = Expr::pow(Expr::Variable, Expr::number(-1.0));
        assert_eq!(render(expr), "x^(-1)");

        let expr = Expr::pow(
            Expr::Variable,
            Expr::pow(Expr::Variable, Expr::number(2.0)),
        );
        assert_eq!(render(expr), "x^x^2");

        let expr = Expr::pow(
            Expr::pow(Expr::Variable, Expr::number(2.0)),
            Expr::number(3.0),
        );
        assert_eq!(render(expr), "(x^2)^3");
    }

    #[test]
    fn test_negation() {
        assert_eq!(
            render(Expr::neg(Expr::pow(Expr::Variable, Expr::number(2.0)))),
            "-x^2"
        );
        assert_eq!(
            render(Expr::neg(Expr::mul(Expr::number(2.0), Expr::Variable))),
            "-(2 * x)"
        );
        assert_eq!(render(Expr::neg(Expr::neg(Expr::Variable))), "-(-x)");
    }

    #[test]
    fn test_call_and_variable_name() {
        let expr = Expression::new(Expr::call(Function::Cos, Expr::Variable), "t");
        assert_eq!(expr.to_string(), "cos(t)");
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        for text in [
            "x^3 - 2 * x - 5",
            "-x^2 + 1",
            "(x + 1) * (x - 1)",
            "x / (2 * x) - x / 2 * x",
            "2^x^2",
            "sqrt(abs(x)) - exp(-x)",
            "x - (1 - x)",
        ] {
            let first = parse(text).unwrap();
            let second = parse(&first.to_string()).unwrap();
            assert_eq!(first, second, "round trip of {}", text);
        }
    }
}
