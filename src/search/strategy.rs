//! Variable and value ordering.

use crate::domain::{Domain, DomainStore};
use crate::model::VarId;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

/// Which unfixed variable to branch on next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableSelection {
    /// First unfixed variable in declaration order.
    #[default]
    FirstUnbound,
    /// Unfixed variable with the smallest domain ("first fail"); ties go
    /// to declaration order.
    MinDomain,
    /// Uniformly random unfixed variable.
    Random,
}

impl VariableSelection {
    /// Picks a variable, or `None` when every variable is fixed.
    pub fn select<R: Rng + ?Sized>(self, store: &DomainStore, rng: &mut R) -> Option<VarId> {
        let mut unbound = store.vars().filter(|&v| !store.is_fixed(v));
        match self {
            VariableSelection::FirstUnbound => unbound.next(),
            VariableSelection::MinDomain => unbound.min_by_key(|&v| store.size(v)),
            VariableSelection::Random => {
                let candidates: Vec<VarId> = unbound.collect();
                candidates.choose(rng).copied()
            }
        }
    }
}

/// In which order to try the values of the branching variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueSelection {
    /// Smallest value first.
    #[default]
    Ascending,
    /// Largest value first.
    Descending,
    /// Random permutation of the domain.
    Random,
}

impl ValueSelection {
    /// Returns the domain's values in branching order.
    pub fn order<R: Rng + ?Sized>(self, domain: &Domain, rng: &mut R) -> Vec<i64> {
        match self {
            ValueSelection::Ascending => domain.values().to_vec(),
            ValueSelection::Descending => domain.iter().rev().collect(),
            ValueSelection::Random => {
                let mut values = domain.values().to_vec();
                values.shuffle(rng);
                values
            }
        }
    }
}

/// Branching strategy: variable ordering plus value ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStrategy {
    pub variable: VariableSelection,
    pub value: ValueSelection,
}

impl SearchStrategy {
    pub fn new(variable: VariableSelection, value: ValueSelection) -> Self {
        Self { variable, value }
    }

    /// Whether the strategy draws from the random number generator.
    pub fn is_randomized(&self) -> bool {
        self.variable == VariableSelection::Random || self.value == ValueSelection::Random
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> DomainStore {
        DomainStore::new(vec![
            Domain::singleton(0),
            Domain::range(0, 4),
            Domain::range(0, 1),
            Domain::range(0, 1),
        ])
    }

    #[test]
    fn test_first_unbound() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = store();
        assert_eq!(
            VariableSelection::FirstUnbound.select(&s, &mut rng),
            Some(VarId::new(1))
        );
    }

    #[test]
    fn test_min_domain_ties_by_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = store();
        assert_eq!(
            VariableSelection::MinDomain.select(&s, &mut rng),
            Some(VarId::new(2))
        );
    }

    #[test]
    fn test_random_picks_unbound() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = store();
        for _ in 0..20 {
            let v = VariableSelection::Random.select(&s, &mut rng).unwrap();
            assert!(!s.is_fixed(v));
        }
    }

    #[test]
    fn test_all_fixed_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = DomainStore::new(vec![Domain::singleton(3); 2]);
        for sel in [
            VariableSelection::FirstUnbound,
            VariableSelection::MinDomain,
            VariableSelection::Random,
        ] {
            assert_eq!(sel.select(&s, &mut rng), None);
        }
    }

    #[test]
    fn test_value_orders() {
        let mut rng = StdRng::seed_from_u64(3);
        let d = Domain::from_values([4, 1, 9]);
        assert_eq!(ValueSelection::Ascending.order(&d, &mut rng), vec![1, 4, 9]);
        assert_eq!(ValueSelection::Descending.order(&d, &mut rng), vec![9, 4, 1]);

        let mut shuffled = ValueSelection::Random.order(&d, &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec![1, 4, 9]);
    }

    #[test]
    fn test_random_order_is_seeded() {
        let d = Domain::range(0, 20);
        let a = ValueSelection::Random.order(&d, &mut StdRng::seed_from_u64(11));
        let b = ValueSelection::Random.order(&d, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
