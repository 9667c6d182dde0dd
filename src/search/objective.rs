//! Incumbent tracking for branch-and-bound.

use crate::model::{Direction, LinearExpr, VarId};

/// Best objective value found so far and the bound it implies.
///
/// The bound is expressed in the form the propagation engine understands,
/// `sum(coefficients * vars) <= constant`. For maximization the objective
/// is negated, so "strictly better than `best`" becomes
/// `-objective <= -(best + 1)`.
#[derive(Debug, Clone)]
pub struct ObjectiveTracker {
    direction: Direction,
    offset: i128,
    /// Oriented so that lower is better.
    coefficients: Vec<i64>,
    vars: Vec<VarId>,
    best: Option<i64>,
    improvements: u64,
}

impl ObjectiveTracker {
    /// Returns `None` when an oriented coefficient does not fit in `i64`.
    pub fn new(objective: &LinearExpr, direction: Direction) -> Option<Self> {
        let (coefficients, vars) = objective.normalized()?;
        let coefficients = match direction {
            Direction::Minimize => coefficients,
            Direction::Maximize => coefficients
                .iter()
                .map(|c| c.checked_neg())
                .collect::<Option<Vec<_>>>()?,
        };
        Some(Self {
            direction,
            offset: objective.offset(),
            coefficients,
            vars,
            best: None,
            improvements: 0,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Best objective value recorded so far.
    pub fn best(&self) -> Option<i64> {
        self.best
    }

    /// Number of times the incumbent improved.
    pub fn improvements(&self) -> u64 {
        self.improvements
    }

    /// Bound constraint terms, oriented so that lower is better.
    pub fn bound_terms(&self) -> (Vec<i64>, Vec<VarId>) {
        (self.coefficients.clone(), self.vars.clone())
    }

    /// Records a solution's objective value.
    ///
    /// Returns the new bound-constraint constant when `value` improves on
    /// the incumbent, `None` otherwise.
    pub fn record(&mut self, value: i64) -> Option<i64> {
        if let Some(best) = self.best {
            if !self.direction.is_better(value, best) {
                return None;
            }
        }
        self.best = Some(value);
        self.improvements += 1;
        Some(self.bound_for(value))
    }

    fn bound_for(&self, best: i64) -> i64 {
        // strictly better: objective <= best - 1, or objective >= best + 1
        let best = i128::from(best);
        let bound = match self.direction {
            Direction::Minimize => best - 1 - self.offset,
            Direction::Maximize => self.offset - best - 1,
        };
        i64::try_from(bound).unwrap_or(if bound < 0 { i64::MIN } else { i64::MAX })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr() -> LinearExpr {
        LinearExpr::new()
            .term(1, VarId::new(0))
            .term(2, VarId::new(1))
            + 5
    }

    #[test]
    fn test_maximize_bound() {
        let mut tracker = ObjectiveTracker::new(&expr(), Direction::Maximize).unwrap();
        assert_eq!(tracker.bound_terms().0, vec![-1, -2]);

        // best = 9 => x + 2y + 5 >= 10 => -x - 2y <= -5
        assert_eq!(tracker.record(9), Some(-5));
        assert_eq!(tracker.record(8), None);
        assert_eq!(tracker.record(9), None);
        assert_eq!(tracker.best(), Some(9));
        assert_eq!(tracker.improvements(), 1);
    }

    #[test]
    fn test_minimize_bound() {
        let mut tracker = ObjectiveTracker::new(&expr(), Direction::Minimize).unwrap();
        assert_eq!(tracker.bound_terms().0, vec![1, 2]);

        // best = 9 => x + 2y + 5 <= 8 => x + 2y <= 3
        assert_eq!(tracker.record(9), Some(3));
        assert_eq!(tracker.record(7), Some(1));
        assert_eq!(tracker.best(), Some(7));
        assert_eq!(tracker.improvements(), 2);
    }

    #[test]
    fn test_min_coefficient_cannot_be_maximized() {
        let objective = LinearExpr::new().term(i64::MIN, VarId::new(0));
        assert!(ObjectiveTracker::new(&objective, Direction::Maximize).is_none());

        let tracker = ObjectiveTracker::new(&objective, Direction::Minimize).unwrap();
        assert_eq!(tracker.bound_terms().0, vec![i64::MIN]);
    }

    #[test]
    fn test_bound_with_wide_offset() {
        // offset beyond i64 is cancelled by the objective value
        let objective = LinearExpr::from(VarId::new(0)) + i64::MAX + 10;
        let mut tracker = ObjectiveTracker::new(&objective, Direction::Minimize).unwrap();
        assert_eq!(tracker.record(i64::MAX), Some(-11));
    }
}
