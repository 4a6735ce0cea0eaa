//! # error.rs
//!
//! Error types for the expression pipeline.
//!
//! Failures fall into three groups with different lifetimes:
//! - [`CompileError`]: raised while turning text into an [`Expression`](crate::Expression).
//!   Aborts compilation entirely; no partial expression is ever returned.
//! - [`DomainError`] / [`EvalError`]: raised while evaluating a compiled
//!   expression at one point. The sampler degrades the offending point to
//!   "undefined" and keeps going.
//! - [`SampleError`]: raised by the sampler before any evaluation starts.
//!
//! Every compile-time error carries a character position into the original
//! formula string so a caller can highlight the offending location inline.

use thiserror::Error;

/// Errors raised while compiling a formula string into an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// The tokenizer met a character it does not recognize.
    #[error("unrecognized character '{ch}' at position {position}")]
    Lex {
        /// The offending character.
        ch: char,
        /// Byte offset of the character in the formula string.
        position: usize,
    },

    /// The token sequence does not form a valid expression.
    #[error("syntax error at position {position}: expected {expected}, found {found}")]
    Syntax {
        /// Byte offset where the problem was detected.
        position: usize,
        /// What the parser was looking for.
        expected: String,
        /// What it found instead.
        found: String,
    },

    /// An identifier resolves to neither a variable, a constant, nor a function.
    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier {
        /// The unresolved name.
        name: String,
        /// Byte offset of the identifier.
        position: usize,
    },

    /// A function was called with the wrong number of arguments.
    #[error("function '{name}' takes {expected} argument(s), but {got} were given (at position {position})")]
    ArityMismatch {
        /// The function name.
        name: String,
        /// The registered arity.
        expected: usize,
        /// The argument count actually written.
        got: usize,
        /// Byte offset of the call.
        position: usize,
    },
}

impl CompileError {
    /// Byte offset of the failure in the original formula string.
    pub fn position(&self) -> usize {
        match self {
            Self::Lex { position, .. }
            | Self::Syntax { position, .. }
            | Self::UnknownIdentifier { position, .. }
            | Self::ArityMismatch { position, .. } => *position,
        }
    }
}

/// Numeric failures at a single evaluation point.
///
/// A domain error never aborts a sampling run; it marks exactly one point as
/// undefined. Every primitive operation is checked, so a non-finite
/// intermediate result surfaces here instead of poisoning later arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Division by exact zero.
    #[error("division by zero")]
    DivByZero,
    /// Negative base raised to a non-integer exponent.
    #[error("negative base raised to a non-integer power")]
    InvalidPow,
    /// Logarithm of a non-positive value.
    #[error("logarithm of a non-positive value")]
    LogDomain,
    /// Square root of a negative value.
    #[error("square root of a negative value")]
    SqrtDomain,
    /// The operation produced ±infinity or NaN.
    #[error("result is not a finite number")]
    NonFinite,
}

/// Errors raised when evaluating a compiled expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A numeric domain failure at this evaluation point.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A name survived to evaluation without a value.
    ///
    /// The resolver guarantees this cannot happen for expressions built
    /// through [`compile`](crate::compile); it is reported rather than
    /// panicking so a contract violation stays recoverable.
    #[error("name '{0}' is not bound to a value")]
    Unbound(String),
}

/// Errors raised by the sampler before any evaluation begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// The range bounds are not finite or not strictly increasing.
    #[error("invalid sampling range: low ({low}) must be finite and less than high ({high})")]
    InvalidRange {
        /// Lower bound as given.
        low: f64,
        /// Upper bound as given.
        high: f64,
    },

    /// Fewer than two sample points were requested.
    #[error("invalid sample count {count}: at least 2 points are required")]
    InvalidCount {
        /// Requested point count.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_position() {
        let err = CompileError::Lex { ch: '$', position: 4 };
        assert_eq!(err.position(), 4);

        let err = CompileError::ArityMismatch {
            name: "sin".to_string(),
            expected: 1,
            got: 2,
            position: 0,
        };
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn test_display_messages() {
        let err = CompileError::UnknownIdentifier { name: "foo".to_string(), position: 2 };
        assert_eq!(err.to_string(), "unknown identifier 'foo' at position 2");

        assert_eq!(DomainError::DivByZero.to_string(), "division by zero");

        let err = SampleError::InvalidCount { count: 1 };
        assert_eq!(err.to_string(), "invalid sample count 1: at least 2 points are required");
    }

    #[test]
    fn test_domain_error_is_transparent_in_eval_error() {
        let err = EvalError::from(DomainError::LogDomain);
        assert_eq!(err.to_string(), DomainError::LogDomain.to_string());
    }
}
