//! # lexer.rs
//!
//! This module provides the lexical analyzer for formula strings. It splits
//! an input string into a sequence of [`Token`]s, each carrying its span
//! (byte range) in the original input for error reporting.
//!
//! The lexer handles numeric literals (decimal, with optional fractional part
//! and scientific exponent), identifiers, and single-character operators or
//! punctuation. It does not decide whether a `-` is unary or binary; that is
//! the parser's job. It also does not resolve names; that is the resolver's.

use std::ops::Range;

use crate::error::CompileError;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// Numeric literal with its parsed value.
    Number(f64),
    /// Identifier: a variable, constant, or function name.
    Ident(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Human-readable description used in syntax error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Number(value) => format!("number '{value}'"),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Comma => "','".to_string(),
        }
    }
}

/// A single token with its span in the original input string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Byte offset where the token starts.
    pub(crate) fn position(&self) -> usize {
        self.span.start
    }
}

type CharIter<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

/// Scans a numeric literal starting at `start`.
///
/// Accepts digits and at most one decimal point, followed by an optional
/// exponent. An `e`/`E` is only consumed as an exponent when it is followed by
/// digits (with an optional sign); otherwise it is left for the next token so
/// that `2e` lexes as a number and an identifier.
fn lex_number(input: &str, start: usize, chars: &mut CharIter) -> Result<Token, CompileError> {
    let mut end = start + 1;

    while let Some(&(idx, ch)) = chars.peek() {
        if ch.is_ascii_digit() || ch == '.' {
            chars.next();
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }

    if matches!(chars.peek(), Some(&(_, 'e' | 'E'))) {
        // Look ahead past the exponent marker and optional sign; commit only
        // when digits follow.
        let mut ahead = chars.clone();
        ahead.next();
        if matches!(ahead.peek(), Some(&(_, '+' | '-'))) {
            ahead.next();
        }
        if matches!(ahead.peek(), Some(&(_, d)) if d.is_ascii_digit()) {
            if let Some((idx, ch)) = chars.next() {
                end = idx + ch.len_utf8();
            }
            if matches!(chars.peek(), Some(&(_, '+' | '-'))) {
                if let Some((idx, ch)) = chars.next() {
                    end = idx + ch.len_utf8();
                }
            }
            while let Some(&(idx, d)) = chars.peek() {
                if d.is_ascii_digit() {
                    chars.next();
                    end = idx + d.len_utf8();
                } else {
                    break;
                }
            }
        }
    }

    let text = &input[start..end];
    let value: f64 = text.parse().map_err(|_| CompileError::Syntax {
        position: start,
        expected: "a numeric literal".to_string(),
        found: format!("'{text}'"),
    })?;

    // str::parse rounds overflowing literals like 1e999 to infinity; a
    // non-finite number node would leak through evaluation unchecked
    if !value.is_finite() {
        return Err(CompileError::Syntax {
            position: start,
            expected: "a numeric literal".to_string(),
            found: format!("'{text}'"),
        });
    }

    Ok(Token::new(TokenKind::Number(value), start..end))
}

/// Scans an identifier starting at `start`.
///
/// An identifier is an ASCII letter or underscore followed by any number of
/// ASCII letters, digits, or underscores.
fn lex_ident(input: &str, start: usize, chars: &mut CharIter) -> Token {
    let mut end = start + 1;
    while let Some(&(idx, ch)) = chars.peek() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            chars.next();
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }

    Token::new(TokenKind::Ident(input[start..end].to_string()), start..end)
}

/// Splits the input string into a sequence of tokens.
///
/// Whitespace is skipped. The scan is restartable: calling it again on the
/// same input produces the same tokens.
///
/// # Errors
///
/// Returns [`CompileError::Lex`] when an unrecognized character is
/// encountered, and [`CompileError::Syntax`] when a scanned numeric literal
/// does not parse (e.g. `1.2.3`) or overflows to a non-finite value
/// (e.g. `1e999`).
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }

        let token = match ch {
            '0'..='9' | '.' => lex_number(input, start, &mut chars)?,
            'a'..='z' | 'A'..='Z' | '_' => lex_ident(input, start, &mut chars),
            '+' => Token::new(TokenKind::Plus, start..start + 1),
            '-' => Token::new(TokenKind::Minus, start..start + 1),
            '*' => Token::new(TokenKind::Star, start..start + 1),
            '/' => Token::new(TokenKind::Slash, start..start + 1),
            '^' => Token::new(TokenKind::Caret, start..start + 1),
            '(' => Token::new(TokenKind::LParen, start..start + 1),
            ')' => Token::new(TokenKind::RParen, start..start + 1),
            ',' => Token::new(TokenKind::Comma, start..start + 1),
            _ => return Err(CompileError::Lex { ch, position: start }),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t\n  ").unwrap().is_empty());
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(kinds("x"), vec![TokenKind::Ident("x".to_string())]);
        assert_eq!(kinds("var_1"), vec![TokenKind::Ident("var_1".to_string())]);
        assert_eq!(
            kinds("a b_c D1"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Ident("b_c".to_string()),
                TokenKind::Ident("D1".to_string()),
            ]
        );
        assert_eq!(kinds("_tmp"), vec![TokenKind::Ident("_tmp".to_string())]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("123"), vec![TokenKind::Number(123.0)]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Number(3.14)]);
        assert_eq!(kinds("1e10"), vec![TokenKind::Number(1e10)]);
        assert_eq!(kinds("2E-3"), vec![TokenKind::Number(2e-3)]);
        assert_eq!(kinds("5.0e+2"), vec![TokenKind::Number(500.0)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
    }

    #[test]
    fn test_exponent_needs_digits() {
        // "2e" is a number followed by an identifier, not a malformed literal
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Ident("e".to_string())]
        );
        // likewise when a sign follows but no digits
        assert_eq!(
            kinds("2e+"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Ident("e".to_string()),
                TokenKind::Plus,
            ]
        );
    }

    #[test]
    fn test_single_char_tokens() {
        assert_eq!(
            kinds("()+-*/^,"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Caret,
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn test_mixed_expression() {
        assert_eq!(
            kinds("sin(x) + 3.0 - var_1 / 2e-3"),
            vec![
                TokenKind::Ident("sin".to_string()),
                TokenKind::LParen,
                TokenKind::Ident("x".to_string()),
                TokenKind::RParen,
                TokenKind::Plus,
                TokenKind::Number(3.0),
                TokenKind::Minus,
                TokenKind::Ident("var_1".to_string()),
                TokenKind::Slash,
                TokenKind::Number(2e-3),
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("x + 12").unwrap();
        assert_eq!(tokens[0].span, 0..1);
        assert_eq!(tokens[1].span, 2..3);
        assert_eq!(tokens[2].span, 4..6);
        assert_eq!(tokens[2].position(), 4);
    }

    #[test]
    fn test_unary_minus_is_not_merged() {
        // the lexer never folds a sign into a number; the parser decides
        assert_eq!(kinds("-3.5"), vec![TokenKind::Minus, TokenKind::Number(3.5)]);
        assert_eq!(
            kinds("x+-y"),
            vec![
                TokenKind::Ident("x".to_string()),
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Ident("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_unrecognized_character() {
        assert_eq!(
            tokenize("x $ y").unwrap_err(),
            CompileError::Lex { ch: '$', position: 2 }
        );
        assert_eq!(
            tokenize("あ123").unwrap_err(),
            CompileError::Lex { ch: 'あ', position: 0 }
        );
    }

    #[test]
    fn test_malformed_number() {
        let err = tokenize("1.2.3").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { position: 0, .. }));

        let err = tokenize(".").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { position: 0, .. }));
    }

    #[test]
    fn test_overflowing_literal_rejected() {
        // 1e999 rounds to infinity under str::parse
        let err = tokenize("1e999").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { position: 0, .. }));

        let err = tokenize("x + 1e999").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { position: 4, .. }));

        // the largest finite values still lex
        assert_eq!(kinds("1e308"), vec![TokenKind::Number(1e308)]);
    }

    #[test]
    fn test_number_then_identifier_boundary() {
        assert_eq!(
            kinds("123abc"),
            vec![TokenKind::Number(123.0), TokenKind::Ident("abc".to_string())]
        );
        assert_eq!(kinds("var123"), vec![TokenKind::Ident("var123".to_string())]);
    }

    #[test]
    fn test_restartable() {
        let first = tokenize("sin(x) * 2").unwrap();
        let second = tokenize("sin(x) * 2").unwrap();
        assert_eq!(first, second);
    }
}
