//! Decision variable types.

use crate::domain::Domain;
use std::fmt;

/// Index of a variable inside its [`Model`](super::Model).
///
/// Identifiers are dense: the `n`-th declared variable has index `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarId(usize);

impl VarId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the variable in declaration order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Largest number of values a variable may declare.
///
/// Domains are materialized value by value during search, so
/// [`Model::validate`](super::Model::validate) rejects wider variables.
pub const MAX_DOMAIN_SIZE: u64 = 1 << 20;

/// An integer variable with a finite domain.
///
/// The domain is either the contiguous range `[min, max]` or an explicit
/// list of admissible values, with at most [`MAX_DOMAIN_SIZE`] values.
#[derive(Debug, Clone)]
pub struct IntVar {
    /// Variable name (unique identifier within a model).
    pub name: String,
    /// Minimum value.
    pub min: i64,
    /// Maximum value.
    pub max: i64,
    /// Explicit values for sparse domains.
    values: Option<Vec<i64>>,
}

impl IntVar {
    /// Creates a new integer variable with the given bounds.
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            values: None,
        }
    }

    /// Creates a variable whose domain is exactly `values`.
    ///
    /// Duplicates are ignored. An empty list yields a variable that
    /// fails model validation.
    pub fn from_values(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        let mut values: Vec<i64> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        let (min, max) = match (values.first(), values.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0, 0),
        };
        Self {
            name: name.into(),
            min,
            max,
            values: Some(values),
        }
    }

    /// Creates a fixed integer variable.
    pub fn fixed(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, value, value)
    }

    /// Creates a 0/1 variable.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, 0, 1)
    }

    /// Whether this variable is fixed to a single value.
    pub fn is_fixed(&self) -> bool {
        self.domain_size() == 1
    }

    /// Number of admissible values.
    pub fn domain_size(&self) -> u64 {
        match &self.values {
            Some(values) => values.len() as u64,
            None if self.min > self.max => 0,
            None => self.max.abs_diff(self.min).saturating_add(1),
        }
    }

    /// Whether the declared domain is sparse.
    pub fn is_sparse(&self) -> bool {
        self.values.is_some()
    }

    /// Builds the initial search domain.
    pub fn initial_domain(&self) -> Domain {
        match &self.values {
            Some(values) => Domain::from_values(values.iter().copied()),
            None => Domain::range(self.min, self.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_var() {
        let v = IntVar::new("x", 0, 100);
        assert_eq!(v.name, "x");
        assert_eq!(v.domain_size(), 101);
        assert!(!v.is_fixed());
        assert!(!v.is_sparse());
    }

    #[test]
    fn test_fixed_int_var() {
        let v = IntVar::fixed("x", 42);
        assert!(v.is_fixed());
        assert_eq!(v.min, 42);
        assert_eq!(v.max, 42);
    }

    #[test]
    fn test_sparse_var() {
        let v = IntVar::from_values("x", [7, 1, 3, 3]);
        assert!(v.is_sparse());
        assert_eq!(v.min, 1);
        assert_eq!(v.max, 7);
        assert_eq!(v.domain_size(), 3);
        assert_eq!(v.initial_domain().values(), &[1, 3, 7]);
    }

    #[test]
    fn test_inverted_bounds_have_no_values() {
        let v = IntVar::new("x", 3, 1);
        assert_eq!(v.domain_size(), 0);
        assert!(v.initial_domain().is_empty());
    }

    #[test]
    fn test_full_range_size_does_not_overflow() {
        let v = IntVar::new("x", i64::MIN, i64::MAX);
        assert_eq!(v.domain_size(), u64::MAX);
        assert!(v.domain_size() > MAX_DOMAIN_SIZE);
    }

    #[test]
    fn test_boolean_var() {
        let v = IntVar::boolean("b");
        assert_eq!(v.initial_domain().values(), &[0, 1]);
    }

    #[test]
    fn test_var_id_display() {
        assert_eq!(VarId::new(3).to_string(), "#3");
        assert_eq!(VarId::new(3).index(), 3);
    }
}
