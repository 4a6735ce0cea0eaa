//! # parser.rs
//!
//! This module parses a token sequence into an abstract syntax tree.
//!
//! The parser is a precedence-climbing walk over the token slice. Precedence
//! and associativity come from [`BinaryOperatorKind::info`], lowest to
//! highest: addition/subtraction, multiplication/division, unary sign,
//! exponentiation (right-associative), then atoms (numbers, identifiers,
//! parenthesized expressions, and calls `name(a, b, ...)`).
//!
//! A `-` or `+` is unary exactly when it appears where an operand is
//! expected; the tokenizer leaves that decision to this module. Argument
//! lists are comma-separated and order-preserving; the argument *count* is
//! recorded as written and checked against the registry by the resolver,
//! since arity is a registry property, not a grammar property.
//!
//! Parsing is pure tree construction: no registry access, no side effects.

use crate::ast::{AstNode, BinaryOperatorKind, UnaryOperatorKind, UNARY_PRECEDENCE};
use crate::error::CompileError;
use crate::lexer::{Token, TokenKind};

/// Parses the token sequence into an AST.
///
/// `end` is the byte length of the source string, used as the error position
/// when the input stops short.
///
/// # Errors
///
/// Returns [`CompileError::Syntax`] on an empty expression, an unexpected
/// token, an unmatched parenthesis, a missing operand, or trailing tokens
/// after a complete expression.
pub(crate) fn parse(tokens: &[Token], end: usize) -> Result<AstNode, CompileError> {
    let mut parser = Parser { tokens, cursor: 0, end };
    let root = parser.expression(0)?;

    if let Some(token) = parser.peek() {
        return Err(CompileError::Syntax {
            position: token.position(),
            expected: "end of input".to_string(),
            found: token.kind.describe(),
        });
    }

    Ok(root)
}

/// Maps an operator token to its binary operator kind, if it has one.
fn binary_kind(kind: &TokenKind) -> Option<BinaryOperatorKind> {
    match kind {
        TokenKind::Plus => Some(BinaryOperatorKind::Add),
        TokenKind::Minus => Some(BinaryOperatorKind::Sub),
        TokenKind::Star => Some(BinaryOperatorKind::Mul),
        TokenKind::Slash => Some(BinaryOperatorKind::Div),
        TokenKind::Caret => Some(BinaryOperatorKind::Pow),
        _ => None,
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    /// Byte length of the source, reported when input ends unexpectedly.
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn unexpected_end(&self, expected: &str) -> CompileError {
        CompileError::Syntax {
            position: self.end,
            expected: expected.to_string(),
            found: "end of input".to_string(),
        }
    }

    /// Parses an expression whose operators all bind at least as tightly as
    /// `min_binding`.
    ///
    /// Binding powers are derived from operator precedence; the right-hand
    /// binding of a left-associative operator is one step tighter than its
    /// left-hand binding, and one step looser for right-associative `^`.
    fn expression(&mut self, min_binding: u8) -> Result<AstNode, CompileError> {
        let mut lhs = self.operand()?;

        while let Some(token) = self.peek() {
            let kind = match binary_kind(&token.kind) {
                Some(kind) => kind,
                // a right parenthesis or comma belongs to the caller; any
                // other leftover is reported by the caller as well
                None => break,
            };
            let info = kind.info();
            let left_binding = info.precedence * 2 + 1;
            if left_binding < min_binding {
                break;
            }
            self.bump();

            let right_binding = if info.is_left_assoc {
                left_binding + 1
            } else {
                left_binding - 1
            };
            let rhs = self.expression(right_binding)?;
            lhs = AstNode::BinaryOp {
                kind,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    /// Parses one operand: a number, a variable, a call, a parenthesized
    /// expression, or a sign applied to an operand.
    fn operand(&mut self) -> Result<AstNode, CompileError> {
        let token = match self.bump() {
            Some(token) => token,
            None => return Err(self.unexpected_end("an operand")),
        };

        match &token.kind {
            TokenKind::Number(value) => Ok(AstNode::Number(*value)),
            TokenKind::Ident(name) => {
                if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
                    self.bump();
                    self.call(name, token.position())
                } else {
                    Ok(AstNode::Variable {
                        name: name.clone(),
                        position: token.position(),
                    })
                }
            }
            TokenKind::Minus => {
                let expr = self.expression(UNARY_PRECEDENCE * 2 + 1)?;
                Ok(AstNode::UnaryOp {
                    kind: UnaryOperatorKind::Negative,
                    expr: Box::new(expr),
                })
            }
            TokenKind::Plus => {
                let expr = self.expression(UNARY_PRECEDENCE * 2 + 1)?;
                Ok(AstNode::UnaryOp {
                    kind: UnaryOperatorKind::Positive,
                    expr: Box::new(expr),
                })
            }
            TokenKind::LParen => {
                let expr = self.expression(0)?;
                match self.bump() {
                    Some(close) if close.kind == TokenKind::RParen => Ok(expr),
                    Some(close) => Err(CompileError::Syntax {
                        position: close.position(),
                        expected: "')'".to_string(),
                        found: close.kind.describe(),
                    }),
                    None => Err(self.unexpected_end("')'")),
                }
            }
            other => Err(CompileError::Syntax {
                position: token.position(),
                expected: "an operand".to_string(),
                found: other.describe(),
            }),
        }
    }

    /// Parses a call argument list; the opening parenthesis is already
    /// consumed. The argument count is recorded as written.
    fn call(&mut self, name: &str, position: usize) -> Result<AstNode, CompileError> {
        let mut args = Vec::new();

        if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
            self.bump();
        } else {
            loop {
                args.push(self.expression(0)?);
                match self.bump() {
                    Some(token) if token.kind == TokenKind::Comma => continue,
                    Some(token) if token.kind == TokenKind::RParen => break,
                    Some(token) => {
                        return Err(CompileError::Syntax {
                            position: token.position(),
                            expected: "',' or ')'".to_string(),
                            found: token.kind.describe(),
                        })
                    }
                    None => return Err(self.unexpected_end("',' or ')'")),
                }
            }
        }

        Ok(AstNode::Call {
            name: name.to_string(),
            position,
            args,
        })
    }
}
