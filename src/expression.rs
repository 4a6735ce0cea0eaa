//! # expression.rs
//!
//! The compiled, re-evaluable expression: the unit the GUI layer holds on to
//! between redraws.

use crate::ast::AstNode;
use crate::error::EvalError;
use crate::variable::Bindings;

/// A compiled mathematical expression.
///
/// Owns its validated syntax tree and the set of variable names it depends
/// on. Immutable once built: editing the input text means compiling a new
/// `Expression` from scratch and discarding this one. Evaluation is pure, so
/// one `Expression` can be evaluated any number of times with different
/// bindings, including concurrently through shared references.
///
/// Created only by [`compile`](crate::compile); there is no way to obtain a
/// partially validated expression.
///
/// # Examples
///
/// ```
/// use graphac::{compile, Bindings};
///
/// let expr = compile("x^2 + 1").expect("valid formula");
/// assert_eq!(expr.variables(), ["x"]);
///
/// let value = expr.eval(&Bindings::from(&[("x", 3.0)])).unwrap();
/// assert_eq!(value, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: AstNode,
    variables: Vec<String>,
}

impl Expression {
    pub(crate) fn new(root: AstNode, variables: Vec<String>) -> Self {
        Self { root, variables }
    }

    /// Evaluates the expression with the given variable bindings.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Domain`] when the arithmetic is undefined at this
    /// point (division by zero, log of a non-positive value, non-finite
    /// result, ...), and [`EvalError::Unbound`] when a name in
    /// [`variables`](Self::variables) has no value in `bindings`.
    pub fn eval(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        self.root.eval(bindings)
    }

    /// The sorted free variable names this expression requires.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}
