//! # graphac
//!
//! `graphac` is the expression parsing and sampling kernel of a 2-D function
//! grapher: it turns a user-supplied function string (e.g. `sin(x)*exp(-x^2)`)
//! into a safe, re-evaluable numeric function and produces sampled point
//! sequences for plotting.
//!
//! ## Overview
//! - Parse a formula over the variable `x` into an immutable [`Expression`].
//! - Evaluate it repeatedly with different bindings without re-parsing.
//! - Sample it densely across a viewport with [`sample`], degrading points
//!   where the function is undefined instead of aborting the curve.
//!
//! Internally a formula is tokenized, parsed into an abstract syntax tree,
//! resolved against the fixed symbol registry (variables, functions,
//! constants), and constant-folded. Compile-time failures — bad characters,
//! malformed grammar, unknown names, wrong argument counts — carry a byte
//! position into the input so a caller can highlight the offending spot.
//! Runtime failures are numeric domain errors at a single point and never
//! poison neighbouring samples.
//!
//! The recognized symbols are fixed at build time and enumerated by
//! [`registry::function_names`], [`registry::constant_names`], and
//! [`registry::VARIABLES`]. Extending the set means editing the registry
//! tables, not mutating process state: the core holds no mutable globals and
//! every call is deterministic.
//!
//! ## Example
//! ```rust
//! use graphac::{compile, sample, Bindings};
//!
//! let expr = compile("sin(x) * exp(-x^2)").expect("valid formula");
//!
//! // evaluate at one point
//! let y = expr.eval(&Bindings::from(&[("x", 0.5)])).unwrap();
//! assert!(y.is_finite());
//!
//! // or sample the whole viewport
//! let points = sample(&expr, "x", -3.0, 3.0, 501).unwrap();
//! assert_eq!(points.len(), 501);
//! ```
//!
//! ## Error handling
//! ```rust
//! use graphac::{compile, CompileError};
//!
//! match compile("sin(x, 1)") {
//!     Err(CompileError::ArityMismatch { name, expected, got, .. }) => {
//!         assert_eq!((name.as_str(), expected, got), ("sin", 1, 2));
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! ## License
//! Licensed under either **MIT** or **Apache-2.0** at your option.

mod ast;
mod expression;
mod lexer;
mod parser;
mod resolver;

pub mod error;
pub mod registry;
pub mod sampler;
pub mod variable;

pub use error::{CompileError, DomainError, EvalError, SampleError};
pub use expression::Expression;
pub use sampler::{sample, SamplePoint};
pub use variable::Bindings;

use log::debug;

/// Compiles a formula string into an executable [`Expression`].
///
/// Runs the full pipeline: tokenize, parse, resolve names against the fixed
/// registry, and fold constant sub-expressions. The result owns its syntax
/// tree and can be evaluated any number of times.
///
/// # Errors
///
/// Any [`CompileError`] aborts compilation entirely; no partial expression is
/// ever returned. The error carries the byte offset of the failure in
/// `formula` for inline highlighting.
///
/// # Examples
/// ```rust
/// use graphac::{compile, Bindings};
///
/// let expr = compile("x^2 - 2*x + 1").unwrap();
/// let y = expr.eval(&Bindings::from(&[("x", 3.0)])).unwrap();
/// assert_eq!(y, 4.0);
/// ```
pub fn compile(formula: &str) -> Result<Expression, CompileError> {
    let tokens = lexer::tokenize(formula)?;
    let ast = parser::parse(&tokens, formula.len())?;
    let resolved = resolver::resolve(ast)?;

    debug!(
        "compiled formula ({} bytes, variables: {:?})",
        formula.len(),
        resolved.variables
    );

    Ok(Expression::new(resolved.node.simplify(), resolved.variables))
}
