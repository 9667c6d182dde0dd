//! Linear expressions and optimization direction.

use super::variables::VarId;
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

/// Optimization direction of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Minimize,
    Maximize,
}

impl Direction {
    /// Whether `candidate` strictly improves on `incumbent`.
    #[inline]
    pub fn is_better(self, candidate: i64, incumbent: i64) -> bool {
        match self {
            Direction::Minimize => candidate < incumbent,
            Direction::Maximize => candidate > incumbent,
        }
    }
}

/// A linear combination `sum(coefficient * var) + offset`.
///
/// Coefficients and the offset are kept in `i128`, so building and
/// evaluating an expression never overflows for `i64` inputs. Conversion
/// back to `i64` happens when the expression is posted or used as an
/// objective, and is checked there.
///
/// # Examples
///
/// ```
/// use u_csp::model::{LinearExpr, Model};
///
/// let mut model = Model::new("example");
/// let x = model.new_int_var("x", 0, 2);
/// let y = model.new_int_var("y", 0, 2);
///
/// let expr = LinearExpr::new().term(1, x).term(2, y) + 3;
/// assert_eq!(expr.evaluate(&[1, 2]), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(i128, VarId)>,
    offset: i128,
}

impl LinearExpr {
    /// Creates the zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a constant expression.
    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            offset: i128::from(value),
        }
    }

    /// Sum of the given variables, each with coefficient one.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (1, v)).collect(),
            offset: 0,
        }
    }

    /// Weighted sum from `(coefficient, var)` pairs.
    pub fn weighted_sum(terms: impl IntoIterator<Item = (i64, VarId)>) -> Self {
        Self {
            terms: terms
                .into_iter()
                .map(|(c, v)| (i128::from(c), v))
                .collect(),
            offset: 0,
        }
    }

    /// Builder: appends `coefficient * var`.
    pub fn term(mut self, coefficient: i64, var: VarId) -> Self {
        self.add_term(coefficient, var);
        self
    }

    /// Appends `coefficient * var` in place.
    pub fn add_term(&mut self, coefficient: i64, var: VarId) {
        self.terms.push((i128::from(coefficient), var));
    }

    /// The raw terms, in insertion order and possibly repeating variables.
    pub fn terms(&self) -> &[(i128, VarId)] {
        &self.terms
    }

    pub fn offset(&self) -> i128 {
        self.offset
    }

    /// Evaluates the expression on a full assignment indexed by [`VarId`].
    pub fn evaluate(&self, values: &[i64]) -> i128 {
        self.terms.iter().fold(self.offset, |acc, &(c, v)| {
            acc.saturating_add(c.saturating_mul(i128::from(values[v.index()])))
        })
    }

    /// Smallest and largest value of the variable terms, offset excluded,
    /// when each variable ranges over `bounds(var)`.
    pub fn term_range(&self, bounds: impl Fn(VarId) -> (i64, i64)) -> (i128, i128) {
        self.terms.iter().fold((0i128, 0i128), |(lo, hi), &(c, v)| {
            let (min, max) = bounds(v);
            let a = c.saturating_mul(i128::from(min));
            let b = c.saturating_mul(i128::from(max));
            (lo.saturating_add(a.min(b)), hi.saturating_add(a.max(b)))
        })
    }

    /// Merges repeated variables and drops zero coefficients.
    ///
    /// Returns parallel coefficient and variable lists ordered by variable
    /// index, which is the layout linear constraints are posted with, or
    /// `None` if a merged coefficient does not fit in `i64`.
    pub fn normalized(&self) -> Option<(Vec<i64>, Vec<VarId>)> {
        let mut merged: BTreeMap<VarId, i128> = BTreeMap::new();
        for &(c, v) in &self.terms {
            let entry = merged.entry(v).or_insert(0);
            *entry = entry.saturating_add(c);
        }
        merged
            .into_iter()
            .filter(|&(_, c)| c != 0)
            .map(|(v, c)| i64::try_from(c).ok().map(|c| (c, v)))
            .collect::<Option<Vec<_>>>()
            .map(|pairs| pairs.into_iter().unzip())
    }

    /// `rhs - offset` as an `i64` right-hand side, if it fits.
    pub(crate) fn shifted_rhs(&self, rhs: i64) -> Option<i64> {
        i64::try_from(i128::from(rhs).saturating_sub(self.offset)).ok()
    }

    /// Multiplies every coefficient and the offset by `factor`.
    pub fn scaled(mut self, factor: i64) -> Self {
        let factor = i128::from(factor);
        for (c, _) in &mut self.terms {
            *c = c.saturating_mul(factor);
        }
        self.offset = self.offset.saturating_mul(factor);
        self
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        Self::new().term(1, var)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self.terms.extend(rhs.terms);
        self.offset = self.offset.saturating_add(rhs.offset);
        self
    }
}

impl Add<i64> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: i64) -> LinearExpr {
        self.offset = self.offset.saturating_add(i128::from(rhs));
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + (-rhs)
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self.scaled(-1)
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, rhs: i64) -> LinearExpr {
        self.scaled(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate() {
        let (x, y, z) = (VarId::new(0), VarId::new(1), VarId::new(2));
        let expr = LinearExpr::new().term(1, x).term(2, y).term(3, z);
        assert_eq!(expr.evaluate(&[1, 2, 2]), 11);
    }

    #[test]
    fn test_normalized_merges_and_drops_zero() {
        let (u, n, e) = (VarId::new(0), VarId::new(1), VarId::new(2));
        // 10u + n - 10u - e
        let expr = LinearExpr::new().term(10, u).term(1, n) - LinearExpr::new().term(10, u).term(1, e);
        let (coefficients, vars) = expr.normalized().unwrap();
        assert_eq!(coefficients, vec![1, -1]);
        assert_eq!(vars, vec![n, e]);
    }

    #[test]
    fn test_operators() {
        let x = VarId::new(0);
        let expr = (LinearExpr::from(x) * 3 + 4) - LinearExpr::constant(1);
        assert_eq!(expr.offset(), 3);
        assert_eq!(expr.evaluate(&[2]), 9);
        assert_eq!((-expr).evaluate(&[2]), -9);
    }

    #[test]
    fn test_large_coefficients_are_exact() {
        let x = VarId::new(0);
        let expr = LinearExpr::new().term(1_000_000_000_000_000_000, x);
        assert_eq!(expr.evaluate(&[10]), 10_000_000_000_000_000_000);
        assert_eq!(expr.term_range(|_| (0, 10)), (0, 10_000_000_000_000_000_000));
        assert_eq!(expr.term_range(|_| (-2, 3)).0, -2_000_000_000_000_000_000);
    }

    #[test]
    fn test_normalized_rejects_wide_merge() {
        let x = VarId::new(0);
        let expr = LinearExpr::new().term(i64::MAX, x).term(i64::MAX, x);
        assert_eq!(expr.normalized(), None);

        let cancels = LinearExpr::new().term(i64::MAX, x).term(i64::MAX, x) - LinearExpr::from(x) * i64::MAX;
        assert_eq!(cancels.normalized(), Some((vec![i64::MAX], vec![x])));
    }

    #[test]
    fn test_negating_min_coefficient() {
        let x = VarId::new(0);
        let expr = -LinearExpr::new().term(i64::MIN, x);
        assert_eq!(expr.terms(), &[(-i128::from(i64::MIN), x)]);
        assert_eq!(expr.normalized(), None);
        assert_eq!(LinearExpr::constant(i64::MIN).shifted_rhs(0), None);
        assert_eq!(LinearExpr::constant(5).shifted_rhs(i64::MIN + 5), Some(i64::MIN));
    }

    #[test]
    fn test_direction_is_better() {
        assert!(Direction::Maximize.is_better(5, 4));
        assert!(!Direction::Maximize.is_better(4, 4));
        assert!(Direction::Minimize.is_better(3, 4));
        assert!(!Direction::Minimize.is_better(5, 4));
    }
}
