//! # ast.rs
//!
//! The abstract syntax tree for parsed formulas, and its evaluation.
//!
//! Nodes form a tagged union so the resolver and evaluator can match
//! exhaustively. Every node is owned exclusively by its parent; the root is
//! owned by the compiled [`Expression`](crate::Expression). Operator kinds
//! carry their symbol, precedence, associativity, and evaluation rule in one
//! place, so the parser and the evaluator cannot disagree about them.
//!
//! Evaluation is a recursive walk returning `f64`. Every primitive result is
//! checked: division by exact zero, invalid real exponentiation, and
//! non-finite intermediates are reported as domain errors instead of
//! propagating poisoned values.

use crate::error::{DomainError, EvalError};
use crate::registry;
use crate::registry::{finite, pow_checked};
use crate::variable::Bindings;

#[doc(hidden)]
/// Internal macro to define all unary operators.
///
/// It centralizes the enum variants, string representation, and apply logic
/// for unary operators.
macro_rules! unary_operator_kind {
    ($($name:ident => { symbol: $symbol:expr, apply: $apply:expr }),* $(,)?) => {
        /// Represents a unary operator in a mathematical expression.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub(crate) enum UnaryOperatorKind {
            $($name),*
        }

        impl UnaryOperatorKind {
            /// Applies the unary operator to a value.
            pub(crate) fn apply(&self, x: f64) -> Result<f64, DomainError> {
                match self {
                    $( Self::$name => ($apply)(x), )*
                }
            }
        }

        impl std::fmt::Display for UnaryOperatorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $( Self::$name => $symbol, )*
                };
                write!(f, "{}", s)
            }
        }
    };
}

unary_operator_kind! {
    Positive => { symbol: "+", apply: |x: f64| Ok(x) },
    Negative => { symbol: "-", apply: |x: f64| finite(-x) },
}

/// Information about a binary operator: its precedence and associativity,
/// used by the parser to determine the order of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BinaryOperatorInfo {
    /// Operator precedence (higher value means higher precedence).
    pub precedence: u8,
    /// Whether the operator is left-associative.
    pub is_left_assoc: bool,
}

#[doc(hidden)]
/// Internal macro to define all binary operators.
///
/// It centralizes the enum variants, string representation, precedence,
/// associativity, and apply logic.
macro_rules! binary_operator_kind {
    ($($name:ident => {
        symbol: $symbol:expr,
        precedence: $prec:expr,
        left_assoc: $assoc:expr,
        apply: $apply:expr
    }),* $(,)?) => {
        /// Represents a binary operator in a mathematical expression.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub(crate) enum BinaryOperatorKind {
            $($name),*
        }

        impl BinaryOperatorKind {
            /// Returns operator precedence and associativity.
            pub(crate) fn info(&self) -> BinaryOperatorInfo {
                match self {
                    $( Self::$name => BinaryOperatorInfo {
                        precedence: $prec,
                        is_left_assoc: $assoc,
                    }, )*
                }
            }

            /// Applies the binary operator to two values.
            pub(crate) fn apply(&self, left: f64, right: f64) -> Result<f64, DomainError> {
                match self {
                    $( Self::$name => ($apply)(left, right), )*
                }
            }
        }

        impl std::fmt::Display for BinaryOperatorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $( Self::$name => $symbol, )*
                };
                write!(f, "{}", s)
            }
        }
    };
}

binary_operator_kind! {
    Add => {
        symbol: "+", precedence: 0, left_assoc: true,
        apply: |l: f64, r: f64| finite(l + r)
    },
    Sub => {
        symbol: "-", precedence: 0, left_assoc: true,
        apply: |l: f64, r: f64| finite(l - r)
    },
    Mul => {
        symbol: "*", precedence: 1, left_assoc: true,
        apply: |l: f64, r: f64| finite(l * r)
    },
    Div => {
        symbol: "/", precedence: 1, left_assoc: true,
        apply: |l: f64, r: f64| if r == 0.0 {
            Err(DomainError::DivByZero)
        } else {
            finite(l / r)
        }
    },
    Pow => {
        symbol: "^", precedence: 3, left_assoc: false,
        apply: |l: f64, r: f64| pow_checked(l, r)
    },
}

/// Precedence of the unary operators: they bind tighter than `*` and `/` but
/// looser than `^`, so `-x^2` is `-(x^2)` and `-x*y` is `(-x)*y`.
pub(crate) const UNARY_PRECEDENCE: u8 = 2;

/// A node of the abstract syntax tree.
///
/// Built by the parser, checked by the resolver, walked by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AstNode {
    /// Numeric literal (or a constant folded to its value).
    Number(f64),

    /// Named variable reference, with the byte offset of the name in the
    /// source for error reporting.
    Variable { name: String, position: usize },

    /// Unary operator applied to an expression.
    UnaryOp {
        kind: UnaryOperatorKind,
        expr: Box<AstNode>,
    },

    /// Binary operator applied to left and right expressions.
    BinaryOp {
        kind: BinaryOperatorKind,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },

    /// Function call with ordered argument expressions, with the byte offset
    /// of the function name in the source.
    Call {
        name: String,
        position: usize,
        args: Vec<AstNode>,
    },
}

impl AstNode {
    /// Evaluates the node with the given variable bindings.
    ///
    /// # Errors
    ///
    /// - [`EvalError::Domain`] for numeric domain failures at this point.
    /// - [`EvalError::Unbound`] when a name has no value; the resolver
    ///   guarantees this cannot happen for compiled expressions.
    pub(crate) fn eval(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Variable { name, .. } => bindings
                .get(name)
                .ok_or_else(|| EvalError::Unbound(name.clone())),
            Self::UnaryOp { kind, expr } => {
                let x = expr.eval(bindings)?;
                Ok(kind.apply(x)?)
            }
            Self::BinaryOp { kind, left, right } => {
                let l = left.eval(bindings)?;
                let r = right.eval(bindings)?;
                Ok(kind.apply(l, r)?)
            }
            Self::Call { name, args, .. } => {
                let func = registry::function(name)
                    .ok_or_else(|| EvalError::Unbound(name.clone()))?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(arg.eval(bindings)?);
                }
                Ok(func.call(&values)?)
            }
        }
    }

    /// Simplifies the tree by evaluating constant sub-expressions.
    ///
    /// A node whose children are all numbers is replaced by its value when
    /// the evaluation succeeds. Nodes whose constant evaluation fails (e.g.
    /// `ln(0)`) are kept intact so the failure surfaces per evaluation point
    /// instead of at compile time.
    pub(crate) fn simplify(self) -> Self {
        match self {
            Self::Number(_) | Self::Variable { .. } => self,
            Self::UnaryOp { kind, expr } => {
                let expr = expr.simplify();
                if let Self::Number(x) = expr {
                    if let Ok(value) = kind.apply(x) {
                        return Self::Number(value);
                    }
                }
                Self::UnaryOp { kind, expr: Box::new(expr) }
            }
            Self::BinaryOp { kind, left, right } => {
                let left = left.simplify();
                let right = right.simplify();
                if let (Self::Number(l), Self::Number(r)) = (&left, &right) {
                    if let Ok(value) = kind.apply(*l, *r) {
                        return Self::Number(value);
                    }
                }
                Self::BinaryOp {
                    kind,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
            Self::Call { name, position, args } => {
                let args: Vec<Self> = args.into_iter().map(Self::simplify).collect();
                let values: Option<Vec<f64>> = args
                    .iter()
                    .map(|arg| match arg {
                        Self::Number(value) => Some(*value),
                        _ => None,
                    })
                    .collect();
                if let (Some(values), Some(func)) = (values, registry::function(&name)) {
                    if values.len() == func.arity() {
                        if let Ok(value) = func.call(&values) {
                            return Self::Number(value);
                        }
                    }
                }
                Self::Call { name, position, args }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn var(name: &str) -> AstNode {
        AstNode::Variable { name: name.to_string(), position: 0 }
    }

    fn call(name: &str, args: Vec<AstNode>) -> AstNode {
        AstNode::Call { name: name.to_string(), position: 0, args }
    }

    fn binary(kind: BinaryOperatorKind, left: AstNode, right: AstNode) -> AstNode {
        AstNode::BinaryOp {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_eval_constant_and_variable() {
        let bindings = Bindings::from(&[("x", 7.5)]);
        assert_eq!(AstNode::Number(42.0).eval(&bindings), Ok(42.0));
        assert_eq!(var("x").eval(&bindings), Ok(7.5));
    }

    #[test]
    fn test_eval_unbound_variable() {
        let bindings = Bindings::new();
        assert_eq!(
            var("x").eval(&bindings),
            Err(EvalError::Unbound("x".to_string()))
        );
    }

    #[test]
    fn test_eval_unary() {
        let bindings = Bindings::from(&[("x", 3.0)]);
        let node = AstNode::UnaryOp {
            kind: UnaryOperatorKind::Negative,
            expr: Box::new(var("x")),
        };
        assert_eq!(node.eval(&bindings), Ok(-3.0));

        let node = AstNode::UnaryOp {
            kind: UnaryOperatorKind::Positive,
            expr: Box::new(var("x")),
        };
        assert_eq!(node.eval(&bindings), Ok(3.0));
    }

    #[test]
    fn test_eval_arithmetic() {
        let bindings = Bindings::new();
        let node = binary(
            BinaryOperatorKind::Add,
            AstNode::Number(2.0),
            binary(BinaryOperatorKind::Mul, AstNode::Number(3.0), AstNode::Number(4.0)),
        );
        assert_eq!(node.eval(&bindings), Ok(14.0));
    }

    #[test]
    fn test_eval_division_by_zero() {
        let bindings = Bindings::new();
        let node = binary(BinaryOperatorKind::Div, AstNode::Number(1.0), AstNode::Number(0.0));
        assert_eq!(node.eval(&bindings), Err(EvalError::Domain(DomainError::DivByZero)));
    }

    #[test]
    fn test_eval_invalid_pow() {
        let bindings = Bindings::new();
        let node = binary(BinaryOperatorKind::Pow, AstNode::Number(-2.0), AstNode::Number(0.5));
        assert_eq!(node.eval(&bindings), Err(EvalError::Domain(DomainError::InvalidPow)));

        // integer exponents on negative bases are fine
        let node = binary(BinaryOperatorKind::Pow, AstNode::Number(-2.0), AstNode::Number(3.0));
        assert_eq!(node.eval(&bindings), Ok(-8.0));
    }

    #[test]
    fn test_eval_pow_right_value() {
        let bindings = Bindings::new();
        let node = binary(BinaryOperatorKind::Pow, AstNode::Number(2.0), AstNode::Number(10.0));
        assert_abs_diff_eq!(node.eval(&bindings).unwrap(), 1024.0, epsilon = 1.0e-9);
    }

    #[test]
    fn test_eval_call_domain_errors() {
        let bindings = Bindings::new();
        assert_eq!(
            call("sqrt", vec![AstNode::Number(-1.0)]).eval(&bindings),
            Err(EvalError::Domain(DomainError::SqrtDomain))
        );
        assert_eq!(
            call("ln", vec![AstNode::Number(0.0)]).eval(&bindings),
            Err(EvalError::Domain(DomainError::LogDomain))
        );
    }

    #[test]
    fn test_eval_overflow_reported_not_propagated() {
        let bindings = Bindings::new();
        // exp(1000) overflows; the error is reported here instead of feeding
        // infinity into the enclosing subtraction
        let node = binary(
            BinaryOperatorKind::Sub,
            call("exp", vec![AstNode::Number(1000.0)]),
            call("exp", vec![AstNode::Number(1000.0)]),
        );
        assert_eq!(node.eval(&bindings), Err(EvalError::Domain(DomainError::NonFinite)));
    }

    #[test]
    fn test_simplify_folds_constants() {
        let node = binary(
            BinaryOperatorKind::Add,
            AstNode::Number(2.0),
            binary(BinaryOperatorKind::Mul, AstNode::Number(3.0), AstNode::Number(4.0)),
        );
        assert_eq!(node.simplify(), AstNode::Number(14.0));

        let node = call("sin", vec![AstNode::Number(0.0)]);
        assert_eq!(node.simplify(), AstNode::Number(0.0));
    }

    #[test]
    fn test_simplify_keeps_variables() {
        let node = binary(BinaryOperatorKind::Add, var("x"), AstNode::Number(1.0));
        let simplified = node.clone().simplify();
        assert_eq!(simplified, node);
    }

    #[test]
    fn test_simplify_keeps_failing_constants() {
        // ln(0) must fail per evaluation point, not disappear at compile time
        let node = call("ln", vec![AstNode::Number(0.0)]);
        assert_eq!(node.clone().simplify(), node);

        let node = binary(BinaryOperatorKind::Div, AstNode::Number(1.0), AstNode::Number(0.0));
        assert_eq!(node.clone().simplify(), node);
    }

    #[test]
    fn test_simplify_partial() {
        // only the constant subtree folds
        let node = binary(
            BinaryOperatorKind::Add,
            var("x"),
            binary(BinaryOperatorKind::Mul, AstNode::Number(2.0), AstNode::Number(3.0)),
        );
        assert_eq!(
            node.simplify(),
            binary(BinaryOperatorKind::Add, var("x"), AstNode::Number(6.0))
        );
    }

    #[test]
    fn test_operator_info() {
        assert!(BinaryOperatorKind::Add.info().precedence < BinaryOperatorKind::Mul.info().precedence);
        assert!(BinaryOperatorKind::Mul.info().precedence < UNARY_PRECEDENCE);
        assert!(UNARY_PRECEDENCE < BinaryOperatorKind::Pow.info().precedence);
        assert!(BinaryOperatorKind::Add.info().is_left_assoc);
        assert!(!BinaryOperatorKind::Pow.info().is_left_assoc);
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(BinaryOperatorKind::Pow.to_string(), "^");
        assert_eq!(UnaryOperatorKind::Negative.to_string(), "-");
    }
}
