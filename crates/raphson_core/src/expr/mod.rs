//! Expression model for single-variable real functions.
//!
//! A formula such as `x**3 - 2*x - 5` is parsed into an immutable
//! [`Expression`]: a tree of [`Expr`] nodes plus the name of its one free
//! variable. Every other operation works on that tree:
//!
//! - [`parse`]: text to tree
//! - [`evaluate`]: tree at a point to a real number
//! - [`derive`]: tree to the tree of its derivative
//! - [`simplify`]: algebraic clean-up of a (derived) tree
//!
//! ## Example
//!
//! ```
//! use raphson_core::expr::{derive, evaluate, parse, simplify};
//!
//! let f = parse("x^3 - 2*x - 5").unwrap();
//! let df = simplify(&derive(&f));
//!
//! assert_eq!(df.to_string(), "3 * x^2 - 2");
//! assert_eq!(evaluate(&df, 2.0_f64).unwrap(), 10.0);
//! ```

mod derive;
mod display;
mod eval;
mod lexer;
mod parser;
mod simplify;

pub use derive::derive;
pub use eval::evaluate;
pub use parser::{parse, MAX_DEPTH};
pub use simplify::simplify;

use std::fmt;

/// Variable name used when a formula has no variable at all.
pub const DEFAULT_VARIABLE: &str = "x";

/// Binary operators, in the order of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a ^ b` (also written `a ** b`)
    Pow,
}

impl BinaryOp {
    /// Binding power; larger binds tighter.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }

    /// Operator symbol as rendered.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// The closed set of supported named functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Function {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Natural exponential.
    Exp,
    /// Natural logarithm (`ln`, also spelled `log`).
    Ln,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
}

impl Function {
    /// Every supported function.
    pub const ALL: [Function; 13] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Exp,
        Function::Ln,
        Function::Sqrt,
        Function::Abs,
    ];

    /// Look a function up by the name used in formulas.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "log" => Some(Function::Ln),
            _ => Self::ALL.into_iter().find(|func| func.name() == name),
        }
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
        }
    }
}

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    /// Look a constant up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }

    /// Name used in formulas.
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    /// Numeric value.
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// A node of an expression tree.
///
/// Every node is a leaf (`Number`, `Constant`, `Variable`) or an operator
/// owning its operands, so trees are finite and acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// Named constant.
    Constant(Constant),
    /// The single free variable.
    Variable,
    /// Unary minus.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// Named function applied to one argument.
    Call(Function, Box<Expr>),
}

impl Expr {
    /// Numeric literal.
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    /// Named function call.
    pub fn call(func: Function, arg: Expr) -> Self {
        Expr::Call(func, Box::new(arg))
    }

    /// Binary node.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// `lhs + rhs`
    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Add, lhs, rhs)
    }

    /// `lhs - rhs`
    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Sub, lhs, rhs)
    }

    /// `lhs * rhs`
    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Mul, lhs, rhs)
    }

    /// `lhs / rhs`
    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Div, lhs, rhs)
    }

    /// `base ^ exponent`
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::binary(BinaryOp::Pow, base, exponent)
    }

    /// `-operand`
    pub fn neg(operand: Expr) -> Self {
        Expr::Neg(Box::new(operand))
    }

    /// Whether the variable occurs anywhere in this subtree.
    pub fn contains_variable(&self) -> bool {
        match self {
            Expr::Number(_) | Expr::Constant(_) => false,
            Expr::Variable => true,
            Expr::Neg(inner) | Expr::Call(_, inner) => inner.contains_variable(),
            Expr::Binary(_, lhs, rhs) => lhs.contains_variable() || rhs.contains_variable(),
        }
    }

    /// Literal value, if this node is a plain number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of nodes in the subtree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Constant(_) | Expr::Variable => 1,
            Expr::Neg(inner) | Expr::Call(_, inner) => 1 + inner.node_count(),
            Expr::Binary(_, lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
        }
    }
}

/// A parsed single-variable function.
///
/// Immutable once built: differentiation and simplification return new
/// `Expression`s sharing the same variable name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    root: Expr,
    variable: String,
}

impl Expression {
    /// Wrap a tree whose variable is called `variable`.
    pub fn new(root: Expr, variable: impl Into<String>) -> Self {
        Self {
            root,
            variable: variable.into(),
        }
    }

    /// Root node of the tree.
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Name of the free variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// New expression over the same variable.
    pub(crate) fn with_root(&self, root: Expr) -> Self {
        Self {
            root,
            variable: self.variable.clone(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display::write_expr(f, &self.root, &self.variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_lookup() {
        for func in Function::ALL {
            assert_eq!(Function::from_name(func.name()), Some(func));
        }
        assert_eq!(Function::from_name("log"), Some(Function::Ln));
        assert_eq!(Function::from_name("sec"), None);
    }

    #[test]
    fn test_constant_lookup() {
        assert_eq!(Constant::from_name("pi"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("e"), Some(Constant::E));
        assert_eq!(Constant::from_name("tau"), None);
        assert!((Constant::E.value() - std::f64::consts::E).abs() < 1e-15);
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::add(Expr::number(1.0), Expr::call(Function::Sin, Expr::Variable));
        assert!(expr.contains_variable());
        assert!(!Expr::pow(Expr::Constant(Constant::Pi), Expr::number(2.0)).contains_variable());
    }

    #[test]
    fn test_node_count() {
        let expr = Expr::mul(Expr::number(3.0), Expr::neg(Expr::Variable));
        assert_eq!(expr.node_count(), 4);
    }

    #[test]
    fn test_expression_keeps_variable() {
        let expr = Expression::new(Expr::Variable, "t");
        assert_eq!(expr.variable(), "t");
        let other = expr.with_root(Expr::number(1.0));
        assert_eq!(other.variable(), "t");
    }
}
