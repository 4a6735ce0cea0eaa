//! # registry.rs
//!
//! The fixed symbol registry: the process-wide tables of variable names,
//! function names, and mathematical constants an expression may reference.
//!
//! All three tables are compile-time [`phf`] maps. They are initialized before
//! first use, never mutated afterward, and safe for concurrent readers without
//! locking. Extending the recognized set means editing the tables here; nothing
//! is inferred dynamically at runtime.

use phf::Map;
use phf_macros::phf_map;

use crate::error::DomainError;

/// Function pointer type alias representing a mathematical function.
///
/// Takes the argument values in call order (the slice length equals the
/// function's arity) and either produces a finite result or reports the
/// domain failure for this input.
pub(crate) type Func = fn(&[f64]) -> Result<f64, DomainError>;

/// The registered variable names.
///
/// The grapher evaluates single-variable functions of `x`; this is the only
/// name the resolver accepts as a free variable.
pub const VARIABLES: &[&str] = &["x"];

/// Checks a primitive result for finiteness.
///
/// Every arithmetic step goes through this so ±infinity and NaN are reported
/// as [`DomainError::NonFinite`] instead of contaminating later operations.
pub(crate) fn finite(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite)
    }
}

/// Real exponentiation with the domain rule shared by the `^` operator and
/// the `pow` function.
///
/// A negative base with a non-integer exponent has no real result.
pub(crate) fn pow_checked(base: f64, exponent: f64) -> Result<f64, DomainError> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(DomainError::InvalidPow);
    }
    finite(base.powf(exponent))
}

/// Represents a registered mathematical function: its evaluation rule and
/// the number of arguments it accepts.
#[derive(Debug, Clone)]
pub struct Function {
    /// Function pointer implementing the mathematical function.
    function: Func,
    /// Number of arguments the function accepts.
    arity: usize,
    /// Function name for comparison and display.
    name: &'static str,
}

impl Function {
    /// Executes the function with the given arguments.
    ///
    /// The caller must supply exactly `arity` values; the resolver enforces
    /// this for every expression built through the public pipeline.
    pub(crate) fn call(&self, args: &[f64]) -> Result<f64, DomainError> {
        (self.function)(args)
    }

    /// Returns the number of arguments this function expects.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the function name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        // function pointer comparisons do not produce meaningful results since
        // their addresses are not guaranteed to be unique, so don't compare
        // function pointers
        self.arity == other.arity && self.name == other.name
    }
}

/// Macro to define unary functions easily from method names on `f64`.
///
/// For example, `define_unary_func!(sin)` expands to a function that applies
/// `f64::sin` to its single argument and checks the result for finiteness.
macro_rules! define_unary_func {
    ($name:ident) => {
        fn $name(args: &[f64]) -> Result<f64, DomainError> {
            finite(args[0].$name())
        }
    };
}

define_unary_func!(sin);
define_unary_func!(cos);
define_unary_func!(tan);
define_unary_func!(asin);
define_unary_func!(acos);
define_unary_func!(atan);
define_unary_func!(sinh);
define_unary_func!(cosh);
define_unary_func!(tanh);
define_unary_func!(asinh);
define_unary_func!(acosh);
define_unary_func!(atanh);
define_unary_func!(exp);
define_unary_func!(abs);

/// Natural logarithm; defined only for positive arguments.
fn ln(args: &[f64]) -> Result<f64, DomainError> {
    if args[0] <= 0.0 {
        return Err(DomainError::LogDomain);
    }
    finite(args[0].ln())
}

/// Base-10 logarithm; defined only for positive arguments.
fn log10(args: &[f64]) -> Result<f64, DomainError> {
    if args[0] <= 0.0 {
        return Err(DomainError::LogDomain);
    }
    finite(args[0].log10())
}

/// Square root; defined only for non-negative arguments.
fn sqrt(args: &[f64]) -> Result<f64, DomainError> {
    if args[0] < 0.0 {
        return Err(DomainError::SqrtDomain);
    }
    finite(args[0].sqrt())
}

/// Raises the first argument to the power of the second.
fn pow(args: &[f64]) -> Result<f64, DomainError> {
    pow_checked(args[0], args[1])
}

/// Map of functions by their string representation.
static FUNCTIONS: Map<&'static str, Function> = phf_map! {
    "sin"   => Function { function: sin,    arity: 1, name: "sin" },
    "cos"   => Function { function: cos,    arity: 1, name: "cos" },
    "tan"   => Function { function: tan,    arity: 1, name: "tan" },
    "asin"  => Function { function: asin,   arity: 1, name: "asin" },
    "acos"  => Function { function: acos,   arity: 1, name: "acos" },
    "atan"  => Function { function: atan,   arity: 1, name: "atan" },
    "sinh"  => Function { function: sinh,   arity: 1, name: "sinh" },
    "cosh"  => Function { function: cosh,   arity: 1, name: "cosh" },
    "tanh"  => Function { function: tanh,   arity: 1, name: "tanh" },
    "asinh" => Function { function: asinh,  arity: 1, name: "asinh" },
    "acosh" => Function { function: acosh,  arity: 1, name: "acosh" },
    "atanh" => Function { function: atanh,  arity: 1, name: "atanh" },
    "exp"   => Function { function: exp,    arity: 1, name: "exp" },
    "ln"    => Function { function: ln,     arity: 1, name: "ln" },
    "log10" => Function { function: log10,  arity: 1, name: "log10" },
    "sqrt"  => Function { function: sqrt,   arity: 1, name: "sqrt" },
    "abs"   => Function { function: abs,    arity: 1, name: "abs" },

    "pow"   => Function { function: pow,    arity: 2, name: "pow" },
};

/// Map of mathematical constants by their string representation.
static CONSTANTS: Map<&'static str, f64> = phf_map! {
    "E" => std::f64::consts::E,
    "FRAC_1_PI" => std::f64::consts::FRAC_1_PI,
    "FRAC_1_SQRT_2" => std::f64::consts::FRAC_1_SQRT_2,
    "FRAC_2_PI" => std::f64::consts::FRAC_2_PI,
    "FRAC_2_SQRT_PI" => std::f64::consts::FRAC_2_SQRT_PI,
    "FRAC_PI_2" => std::f64::consts::FRAC_PI_2,
    "FRAC_PI_3" => std::f64::consts::FRAC_PI_3,
    "FRAC_PI_4" => std::f64::consts::FRAC_PI_4,
    "FRAC_PI_6" => std::f64::consts::FRAC_PI_6,
    "FRAC_PI_8" => std::f64::consts::FRAC_PI_8,
    "LN_2" => std::f64::consts::LN_2,
    "LN_10" => std::f64::consts::LN_10,
    "LOG10_E" => std::f64::consts::LOG10_E,
    "LOG2_E" => std::f64::consts::LOG2_E,
    "PI" => std::f64::consts::PI,
    "SQRT_2" => std::f64::consts::SQRT_2,
    "TAU" => std::f64::consts::TAU,
};

/// Looks up a registered function by name.
pub(crate) fn function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.get(name)
}

/// Looks up a registered constant by name.
pub(crate) fn constant(name: &str) -> Option<f64> {
    CONSTANTS.get(name).copied()
}

/// Returns whether the name is a registered variable.
pub(crate) fn is_variable(name: &str) -> bool {
    VARIABLES.contains(&name)
}

/// Returns a list of supported function names.
pub fn function_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = FUNCTIONS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Returns a list of supported mathematical constant names.
pub fn constant_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = CONSTANTS.keys().copied().collect();
    names.sort_unstable();
    names
}
