//! # variable.rs
//!
//! This module provides the [`Bindings`] table, which maps variable names to
//! values for one evaluation of a compiled expression.
//!
//! A compiled [`Expression`](crate::Expression) does not own any values; the
//! caller supplies a `Bindings` per evaluation (the sampler rebinds `x` for
//! every sample point). The table is plain owned data, so the core never
//! retains references to caller strings.

use std::collections::HashMap;

/// A collection of named variable values for expression evaluation.
///
/// # Examples
///
/// ```
/// use graphac::Bindings;
///
/// let mut bindings = Bindings::new();
/// bindings.insert("x", 2.5);
///
/// assert!(bindings.contains("x"));
/// assert_eq!(bindings.get("x"), Some(2.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    table: HashMap<String, f64>,
}

impl Bindings {
    /// Creates a new empty `Bindings` table.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Constructs a `Bindings` table from a slice of name-value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphac::Bindings;
    ///
    /// let bindings = Bindings::from(&[("x", 1.0)]);
    /// assert!(bindings.contains("x"));
    /// ```
    pub fn from(items: &[(&str, f64)]) -> Self {
        let mut bindings = Self::new();
        for (name, value) in items {
            bindings.insert(name, *value);
        }
        bindings
    }

    /// Inserts a variable value, replacing any previous value for the name.
    pub fn insert(&mut self, name: &str, value: f64) {
        self.table.insert(name.to_string(), value);
    }

    /// Checks if a variable with the given name exists in the table.
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Retrieves the value of a variable by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.table.get(name).copied()
    }

    /// Clears all variables from the table.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}
