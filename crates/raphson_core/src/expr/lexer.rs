//! Tokenizer for formula text.

use crate::types::{ParseError, ParseErrorReason};

/// Kinds of token produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` or `**`
    Caret,
    LeftParen,
    RightParen,
}

impl TokenKind {
    /// Source-like spelling for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Number(value) => value.to_string(),
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
            TokenKind::Caret => "^".to_string(),
            TokenKind::LeftParen => "(".to_string(),
            TokenKind::RightParen => ")".to_string(),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) position: usize,
}

/// Split formula text into tokens.
///
/// Whitespace is skipped. `**` and `^` both become [`TokenKind::Caret`];
/// `//` is rejected as [`ParseErrorReason::AmbiguousDivision`].
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;

        let kind = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
                continue;
            }
            b'+' => {
                pos += 1;
                TokenKind::Plus
            }
            b'-' => {
                pos += 1;
                TokenKind::Minus
            }
            b'*' if bytes.get(pos + 1) == Some(&b'*') => {
                pos += 2;
                TokenKind::Caret
            }
            b'*' => {
                pos += 1;
                TokenKind::Star
            }
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                return Err(ParseError::new(start, ParseErrorReason::AmbiguousDivision));
            }
            b'/' => {
                pos += 1;
                TokenKind::Slash
            }
            b'^' => {
                pos += 1;
                TokenKind::Caret
            }
            b'(' => {
                pos += 1;
                TokenKind::LeftParen
            }
            b')' => {
                pos += 1;
                TokenKind::RightParen
            }
            b'0'..=b'9' | b'.' => {
                pos = scan_number(bytes, pos);
                let literal = &text[start..pos];
                let value = literal
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| {
                        ParseError::new(start, ParseErrorReason::InvalidNumber(literal.to_string()))
                    })?;
                TokenKind::Number(value)
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                TokenKind::Identifier(text[start..pos].to_string())
            }
            _ => {
                // Report the full (possibly multi-byte) character.
                let ch = text[start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(ParseError::new(
                    start,
                    ParseErrorReason::UnexpectedCharacter(ch),
                ));
            }
        };

        tokens.push(Token {
            kind,
            position: start,
        });
    }

    Ok(tokens)
}

/// Advance over `digits [. digits] [(e|E) [+|-] digits]`.
///
/// The exponent is only consumed when digits follow it, so `2e` lexes as
/// the number `2` followed by the identifier `e`.
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            pos = exp;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds("x**3 - 2*x"),
            vec![
                TokenKind::Identifier("x".to_string()),
                TokenKind::Caret,
                TokenKind::Number(3.0),
                TokenKind::Minus,
                TokenKind::Number(2.0),
                TokenKind::Star,
                TokenKind::Identifier("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize(" sin( x )").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 4, 6, 8]);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds("2.5"), vec![TokenKind::Number(2.5)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("1e-3"), vec![TokenKind::Number(1e-3)]);
        assert_eq!(kinds("2.5E+2"), vec![TokenKind::Number(250.0)]);
    }

    #[test]
    fn test_trailing_e_is_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Identifier("e".to_string())
            ]
        );
    }

    #[test]
    fn test_invalid_number() {
        let err = tokenize("1.2.3").unwrap_err();
        assert_eq!(err.position, 0);
        assert!(matches!(err.reason, ParseErrorReason::InvalidNumber(_)));

        let err = tokenize("x + 1e400").unwrap_err();
        assert_eq!(
            err,
            ParseError::new(4, ParseErrorReason::InvalidNumber("1e400".to_string()))
        );
    }

    #[test]
    fn test_floor_division_rejected() {
        let err = tokenize("x // 2").unwrap_err();
        assert_eq!(err, ParseError::new(2, ParseErrorReason::AmbiguousDivision));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("x $ 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::new(2, ParseErrorReason::UnexpectedCharacter('$'))
        );
        let err = tokenize("x²").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::UnexpectedCharacter('²'));
    }
}
