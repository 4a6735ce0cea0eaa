//! # sampler.rs
//!
//! Dense sampling of a compiled expression over a closed range, producing the
//! ordered point sequence the GUI layer plots.
//!
//! A domain failure at one x never discards the rest of the curve: the
//! offending point is recorded as undefined and sampling continues. Range and
//! count are validated before the first evaluation, so invalid arguments cost
//! nothing.

use log::{debug, trace};

use crate::error::SampleError;
use crate::expression::Expression;
use crate::variable::Bindings;

/// One sampled point: an x value and the expression's value there, or `None`
/// where the expression is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// The x value the expression was evaluated at.
    pub x: f64,
    /// The evaluated value, or `None` for a domain failure at this x.
    pub y: Option<f64>,
}

impl SamplePoint {
    /// Returns whether the expression has a value at this point.
    pub fn is_defined(&self) -> bool {
        self.y.is_some()
    }
}

/// Samples `expression` at `count` evenly spaced points over
/// `[low, high]`, inclusive of both ends.
///
/// The step is `(high - low) / (count - 1)`; the final point is exactly
/// `high`. For each x the sampler binds `variable → x` and evaluates; a
/// domain failure records `{x, None}` and the run continues. The output is
/// deterministic: identical arguments always produce identical sequences.
///
/// # Errors
///
/// Fails before any evaluation with [`SampleError::InvalidCount`] when
/// `count < 2`, or [`SampleError::InvalidRange`] when the bounds are not
/// finite or `low >= high`.
///
/// # Examples
///
/// ```
/// use graphac::{compile, sample};
///
/// let expr = compile("x^2").unwrap();
/// let points = sample(&expr, "x", -1.0, 1.0, 3).unwrap();
///
/// assert_eq!(points.len(), 3);
/// assert_eq!((points[0].x, points[0].y), (-1.0, Some(1.0)));
/// assert_eq!((points[1].x, points[1].y), (0.0, Some(0.0)));
/// assert_eq!((points[2].x, points[2].y), (1.0, Some(1.0)));
/// ```
pub fn sample(
    expression: &Expression,
    variable: &str,
    low: f64,
    high: f64,
    count: usize,
) -> Result<Vec<SamplePoint>, SampleError> {
    if count < 2 {
        return Err(SampleError::InvalidCount { count });
    }
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(SampleError::InvalidRange { low, high });
    }

    trace!("sampling {count} points over [{low}, {high}]");

    let step = (high - low) / (count - 1) as f64;
    let mut bindings = Bindings::new();
    let mut points = Vec::with_capacity(count);
    let mut undefined = 0usize;

    for i in 0..count {
        // keep the last point exactly on the upper bound
        let x = if i == count - 1 {
            high
        } else {
            low + step * i as f64
        };
        bindings.insert(variable, x);
        let y = match expression.eval(&bindings) {
            Ok(value) => Some(value),
            Err(_) => {
                undefined += 1;
                None
            }
        };
        points.push(SamplePoint { x, y });
    }

    if undefined > 0 {
        debug!("{undefined} of {count} sample points are undefined");
    }

    Ok(points)
}
