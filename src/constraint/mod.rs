//! Constraints and their propagation rules.
//!
//! Every constraint is a relation over a fixed scope of variables. It never
//! changes which variables it refers to; it only proposes prunings of their
//! domains in the [`DomainStore`].
//!
//! # Filtering strength
//!
//! - [`Constraint::NotEqual`]: value removal once one side is fixed.
//! - [`Constraint::AllDifferent`]: fixed-value removal plus a pigeonhole
//!   check on the union of domains. This is sound but weaker than Régin's
//!   matching-based filtering: it can leave values that belong to no
//!   complete matching.
//! - [`Constraint::LinearEquality`] / [`Constraint::LinearLessEqual`]:
//!   bounds reasoning on the achievable sum. Holes inside a domain are never
//!   created by these rules.

mod all_different;
mod linear;
mod not_equal;

use crate::domain::{DomainStore, EmptyDomain};
use crate::model::VarId;

/// Result of running one constraint against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationStatus {
    /// No domain changed.
    NoChange,
    /// At least one domain shrank.
    Pruned,
    /// The constraint cannot be satisfied under the current domains.
    Failed,
}

/// A relation over model variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `a != b`.
    NotEqual { a: VarId, b: VarId },

    /// All variables take pairwise distinct values.
    AllDifferent { vars: Vec<VarId> },

    /// `sum(coefficients[i] * vars[i]) == constant`.
    LinearEquality {
        coefficients: Vec<i64>,
        vars: Vec<VarId>,
        constant: i64,
    },

    /// `sum(coefficients[i] * vars[i]) <= constant`.
    LinearLessEqual {
        coefficients: Vec<i64>,
        vars: Vec<VarId>,
        constant: i64,
    },
}

/// Internal failure marker for the pruning rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Conflict;

impl From<EmptyDomain> for Conflict {
    fn from(_: EmptyDomain) -> Self {
        Conflict
    }
}

/// `Ok(true)` when something was pruned.
pub(crate) type PruneResult = Result<bool, Conflict>;

impl Constraint {
    /// Variables this constraint touches. May contain repeats.
    pub fn scope(&self) -> Vec<VarId> {
        match self {
            Constraint::NotEqual { a, b } => vec![*a, *b],
            Constraint::AllDifferent { vars }
            | Constraint::LinearEquality { vars, .. }
            | Constraint::LinearLessEqual { vars, .. } => vars.clone(),
        }
    }

    /// Short name used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::NotEqual { .. } => "not-equal",
            Constraint::AllDifferent { .. } => "all-different",
            Constraint::LinearEquality { .. } => "linear equality",
            Constraint::LinearLessEqual { .. } => "linear inequality",
        }
    }

    /// Applies the pruning rule once.
    pub fn propagate(&self, store: &mut DomainStore) -> PropagationStatus {
        let result = match self {
            Constraint::NotEqual { a, b } => not_equal::propagate(*a, *b, store),
            Constraint::AllDifferent { vars } => all_different::propagate(vars, store),
            Constraint::LinearEquality {
                coefficients,
                vars,
                constant,
            } => linear::propagate_equality(coefficients, vars, *constant, store),
            Constraint::LinearLessEqual {
                coefficients,
                vars,
                constant,
            } => linear::propagate_less_equal(coefficients, vars, *constant, store),
        };
        match result {
            Ok(true) => PropagationStatus::Pruned,
            Ok(false) => PropagationStatus::NoChange,
            Err(Conflict) => PropagationStatus::Failed,
        }
    }

    /// Checks the relation on a total assignment indexed by [`VarId`].
    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        match self {
            Constraint::NotEqual { a, b } => values[a.index()] != values[b.index()],
            Constraint::AllDifferent { vars } => {
                let mut seen: Vec<i64> = vars.iter().map(|v| values[v.index()]).collect();
                seen.sort_unstable();
                seen.windows(2).all(|w| w[0] != w[1])
            }
            Constraint::LinearEquality {
                coefficients,
                vars,
                constant,
            } => linear::weighted_sum(coefficients, vars, values) == i128::from(*constant),
            Constraint::LinearLessEqual {
                coefficients,
                vars,
                constant,
            } => linear::weighted_sum(coefficients, vars, values) <= i128::from(*constant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    fn store(domains: &[(i64, i64)]) -> DomainStore {
        DomainStore::new(domains.iter().map(|&(lo, hi)| Domain::range(lo, hi)).collect())
    }

    #[test]
    fn test_scope() {
        let (x, y) = (VarId::new(0), VarId::new(1));
        assert_eq!(Constraint::NotEqual { a: x, b: y }.scope(), vec![x, y]);
        let lin = Constraint::LinearEquality {
            coefficients: vec![1, 1],
            vars: vec![y, x],
            constant: 3,
        };
        assert_eq!(lin.scope(), vec![y, x]);
    }

    #[test]
    fn test_propagate_status_mapping() {
        let (x, y) = (VarId::new(0), VarId::new(1));
        let mut s = store(&[(1, 1), (0, 2)]);
        let c = Constraint::NotEqual { a: x, b: y };
        assert_eq!(c.propagate(&mut s), PropagationStatus::Pruned);
        assert_eq!(c.propagate(&mut s), PropagationStatus::NoChange);

        let mut s = store(&[(1, 1), (1, 1)]);
        assert_eq!(c.propagate(&mut s), PropagationStatus::Failed);
    }

    #[test]
    fn test_is_satisfied() {
        let vars = vec![VarId::new(0), VarId::new(1), VarId::new(2)];
        let all_diff = Constraint::AllDifferent { vars: vars.clone() };
        assert!(all_diff.is_satisfied(&[1, 2, 3]));
        assert!(!all_diff.is_satisfied(&[1, 2, 1]));

        let le = Constraint::LinearLessEqual {
            coefficients: vec![1, 2, 3],
            vars,
            constant: 10,
        };
        assert!(le.is_satisfied(&[1, 2, 1]));
        assert!(!le.is_satisfied(&[1, 2, 3]));
    }
}
