//! Pratt parser turning tokens into an [`Expression`].

use super::lexer::{tokenize, Token, TokenKind};
use super::{BinaryOp, Constant, Expr, Expression, Function, DEFAULT_VARIABLE};
use crate::types::{ParseError, ParseErrorReason};

/// Binding power of a prefix `-`/`+`: tighter than `*`, looser than `^`,
/// so `-x^2` is `-(x^2)` and `-x*2` is `(-x)*2`.
const PREFIX_BINDING: u8 = 5;

/// Maximum tree height and parser recursion depth of a formula.
///
/// Evaluation, differentiation and simplification recurse over the tree,
/// so no tree taller than this is ever built.
pub const MAX_DEPTH: usize = 256;

/// Parse formula text into an [`Expression`].
///
/// Supports `+ - * /`, power written `^` or `**`, unary minus, the
/// constants `pi` and `e`, the functions listed in
/// [`Function::ALL`](super::Function::ALL) (plus `log` as an alias of
/// `ln`), and exactly one variable: a single letter optionally followed by
/// digits. Formulas nested deeper than [`MAX_DEPTH`] are rejected. Fails
/// without returning a partial tree.
///
/// # Examples
///
/// ```
/// use raphson_core::expr::parse;
///
/// let f = parse("x**3 - 2*x - 5").unwrap();
/// assert_eq!(f.variable(), "x");
/// assert_eq!(f.to_string(), "x^3 - 2 * x - 5");
///
/// assert!(parse("x**").is_err());
/// assert!(parse("1/(x-").is_err());
/// ```
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::new(0, ParseErrorReason::EmptyInput));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: text.len(),
        depth: 0,
        nesting: 0,
        variable: None,
    };

    let (root, _) = parser.parse_expr(0)?;

    if let Some(token) = parser.current() {
        let reason = match token.kind {
            TokenKind::RightParen => ParseErrorReason::UnbalancedParenthesis,
            ref kind => ParseErrorReason::UnexpectedToken(kind.describe()),
        };
        return Err(ParseError::new(token.position, reason));
    }

    let variable = parser
        .variable
        .unwrap_or_else(|| DEFAULT_VARIABLE.to_string());
    Ok(Expression::new(root, variable))
}

/// Subtree and its height, leaves being 1.
type Node = (Expr, usize);

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Byte length of the input, reported for errors at end of input.
    end: usize,
    /// Open parentheses not yet closed.
    depth: usize,
    /// Active `parse_expr` calls.
    nesting: usize,
    variable: Option<String>,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error_here(&self, reason: ParseErrorReason) -> ParseError {
        let position = self.current().map_or(self.end, |token| token.position);
        ParseError::new(position, reason)
    }

    /// Height of a node whose tallest child is `child_height`.
    fn parent_height(&self, child_height: usize, position: usize) -> Result<usize, ParseError> {
        let height = child_height + 1;
        if height > MAX_DEPTH {
            return Err(ParseError::new(position, ParseErrorReason::TooDeep(MAX_DEPTH)));
        }
        Ok(height)
    }

    fn parse_expr(&mut self, min_binding: u8) -> Result<Node, ParseError> {
        if self.nesting >= MAX_DEPTH {
            return Err(self.error_here(ParseErrorReason::TooDeep(MAX_DEPTH)));
        }
        self.nesting += 1;
        let node = self.parse_binary(min_binding);
        self.nesting -= 1;
        node
    }

    fn parse_binary(&mut self, min_binding: u8) -> Result<Node, ParseError> {
        let (mut lhs, mut lhs_height) = self.parse_prefix()?;

        while let Some(token) = self.current() {
            let op = match token.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Caret => BinaryOp::Pow,
                TokenKind::RightParen if self.depth > 0 => break,
                TokenKind::RightParen => {
                    return Err(ParseError::new(
                        token.position,
                        ParseErrorReason::UnbalancedParenthesis,
                    ));
                }
                TokenKind::Number(_) | TokenKind::Identifier(_) | TokenKind::LeftParen => {
                    return Err(ParseError::new(
                        token.position,
                        ParseErrorReason::ImplicitMultiplication,
                    ));
                }
            };

            let (left_binding, right_binding) = infix_binding(op);
            if left_binding < min_binding {
                break;
            }

            self.advance();
            let (rhs, rhs_height) = self.parse_expr(right_binding)?;
            lhs_height = self.parent_height(lhs_height.max(rhs_height), token.position)?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok((lhs, lhs_height))
    }

    fn parse_prefix(&mut self) -> Result<Node, ParseError> {
        let token = self
            .current()
            .ok_or_else(|| self.error_here(ParseErrorReason::UnexpectedEnd))?;

        match &token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok((Expr::number(*value), 1))
            }

            TokenKind::Identifier(name) => {
                self.advance();
                self.parse_identifier(name, token.position)
            }

            TokenKind::Minus => {
                self.advance();
                let (operand, height) = self.parse_expr(PREFIX_BINDING)?;
                Ok((Expr::neg(operand), self.parent_height(height, token.position)?))
            }

            TokenKind::Plus => {
                self.advance();
                self.parse_expr(PREFIX_BINDING)
            }

            TokenKind::LeftParen => {
                self.advance();
                self.parse_group(token.position)
            }

            TokenKind::RightParen if self.depth == 0 => Err(ParseError::new(
                token.position,
                ParseErrorReason::UnbalancedParenthesis,
            )),

            kind => Err(ParseError::new(
                token.position,
                ParseErrorReason::UnexpectedToken(kind.describe()),
            )),
        }
    }

    /// Parse the inside of `( ... )`; the `(` has been consumed.
    fn parse_group(&mut self, open_position: usize) -> Result<Node, ParseError> {
        self.depth += 1;
        let inner = self.parse_expr(0)?;
        self.depth -= 1;

        match self.current() {
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => {
                self.advance();
                Ok(inner)
            }
            Some(token) => Err(ParseError::new(
                token.position,
                ParseErrorReason::UnexpectedToken(token.kind.describe()),
            )),
            None => Err(ParseError::new(
                open_position,
                ParseErrorReason::UnbalancedParenthesis,
            )),
        }
    }

    fn parse_identifier(&mut self, name: &str, position: usize) -> Result<Node, ParseError> {
        if let Some(func) = Function::from_name(name) {
            return match self.current() {
                Some(Token {
                    kind: TokenKind::LeftParen,
                    position: open,
                }) => {
                    self.advance();
                    let (arg, height) = self.parse_group(*open)?;
                    Ok((Expr::call(func, arg), self.parent_height(height, position)?))
                }
                Some(token) => Err(ParseError::new(
                    token.position,
                    ParseErrorReason::UnexpectedToken(token.kind.describe()),
                )),
                None => Err(self.error_here(ParseErrorReason::UnexpectedEnd)),
            };
        }

        if let Some(constant) = Constant::from_name(name) {
            return Ok((Expr::Constant(constant), 1));
        }

        if !is_variable_name(name) {
            return Err(ParseError::new(
                position,
                ParseErrorReason::UnknownIdentifier(name.to_string()),
            ));
        }

        match &self.variable {
            None => self.variable = Some(name.to_string()),
            Some(first) if first == name => {}
            Some(first) => {
                return Err(ParseError::new(
                    position,
                    ParseErrorReason::MultipleVariables {
                        first: first.clone(),
                        second: name.to_string(),
                    },
                ));
            }
        }

        Ok((Expr::Variable, 1))
    }
}

/// `(left, right)` binding powers; `^` is right associative.
fn infix_binding(op: BinaryOp) -> (u8, u8) {
    match op {
        BinaryOp::Add | BinaryOp::Sub => (1, 2),
        BinaryOp::Mul | BinaryOp::Div => (3, 4),
        BinaryOp::Pow => (7, 6),
    }
}

/// A single ASCII letter optionally followed by digits.
fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_digit())
}
