//! Trailed domain store.

use super::finite::Domain;
use crate::model::VarId;
use std::fmt;

/// Signal that a narrowing would have emptied a domain.
///
/// This is the primary failure status of the engine. It is expected and
/// frequent, and is recovered from by backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDomain {
    /// The variable whose domain would have become empty.
    pub var: VarId,
}

impl fmt::Display for EmptyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "domain of {} would become empty", self.var)
    }
}

/// A position on the trail returned by [`DomainStore::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// One undoable narrowing: the domain a variable had before it.
#[derive(Debug, Clone)]
struct TrailEntry {
    var: VarId,
    previous: Domain,
}

/// Current domains of all variables plus the undo trail.
///
/// Every narrowing is recorded on the trail with the exact domain it
/// replaced. [`restore`](Self::restore) pops entries in reverse order, so
/// rolling back to a checkpoint reproduces the domains as they were when
/// the checkpoint was taken.
///
/// Outside of a failed narrowing, every domain in the store is non-empty.
#[derive(Debug, Clone)]
pub struct DomainStore {
    domains: Vec<Domain>,
    trail: Vec<TrailEntry>,
    changed: Vec<VarId>,
    dirty: Vec<bool>,
}

impl DomainStore {
    /// Creates a store from initial domains indexed by [`VarId`].
    pub fn new(domains: Vec<Domain>) -> Self {
        let n = domains.len();
        Self {
            domains,
            trail: Vec::new(),
            changed: Vec::new(),
            dirty: vec![false; n],
        }
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.domains.len()
    }

    /// All variable ids in declaration order.
    pub fn vars(&self) -> impl Iterator<Item = VarId> {
        (0..self.domains.len()).map(VarId::new)
    }

    #[inline]
    pub fn domain(&self, var: VarId) -> &Domain {
        &self.domains[var.index()]
    }

    #[inline]
    pub fn size(&self, var: VarId) -> usize {
        self.domains[var.index()].len()
    }

    #[inline]
    pub fn is_fixed(&self, var: VarId) -> bool {
        self.domains[var.index()].is_fixed()
    }

    /// The value of `var` if its domain is a singleton.
    #[inline]
    pub fn value(&self, var: VarId) -> Option<i64> {
        self.domains[var.index()].value()
    }

    /// Smallest remaining value of `var`.
    #[inline]
    pub fn min(&self, var: VarId) -> i64 {
        self.domains[var.index()].values()[0]
    }

    /// Largest remaining value of `var`.
    #[inline]
    pub fn max(&self, var: VarId) -> i64 {
        let values = self.domains[var.index()].values();
        values[values.len() - 1]
    }

    #[inline]
    pub fn contains(&self, var: VarId, value: i64) -> bool {
        self.domains[var.index()].contains(value)
    }

    /// Whether every domain is a singleton.
    pub fn is_assigned(&self) -> bool {
        self.domains.iter().all(Domain::is_fixed)
    }

    /// The full assignment, if every domain is a singleton.
    pub fn assignment(&self) -> Option<Vec<i64>> {
        self.domains.iter().map(Domain::value).collect()
    }

    /// Number of narrowings currently on the trail.
    #[inline]
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Captures the current state for a later [`restore`](Self::restore).
    #[inline]
    pub fn mark(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Undoes every narrowing made since `checkpoint`, newest first.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        while self.trail.len() > checkpoint.0 {
            if let Some(entry) = self.trail.pop() {
                self.domains[entry.var.index()] = entry.previous;
            }
        }
        self.clear_changes();
    }

    /// Replaces the domain of `var` with `domain`, which must be a subset of
    /// the current one.
    ///
    /// Returns `Ok(true)` if the domain shrank, `Ok(false)` if it is
    /// unchanged. An empty `domain` leaves the store untouched and reports
    /// [`EmptyDomain`].
    pub fn narrow(&mut self, var: VarId, domain: Domain) -> Result<bool, EmptyDomain> {
        if domain.is_empty() {
            return Err(EmptyDomain { var });
        }
        let slot = &mut self.domains[var.index()];
        debug_assert!(domain.is_subset_of(slot), "narrowing must not widen {var}");
        if domain.len() == slot.len() {
            return Ok(false);
        }
        let previous = std::mem::replace(slot, domain);
        self.trail.push(TrailEntry { var, previous });
        if !self.dirty[var.index()] {
            self.dirty[var.index()] = true;
            self.changed.push(var);
        }
        Ok(true)
    }

    /// Removes a single value from the domain of `var`.
    pub fn remove_value(&mut self, var: VarId, value: i64) -> Result<bool, EmptyDomain> {
        if !self.contains(var, value) {
            return Ok(false);
        }
        let domain = self.domain(var).without(value);
        self.narrow(var, domain)
    }

    /// Narrows `var` to the single value `value`.
    pub fn fix(&mut self, var: VarId, value: i64) -> Result<bool, EmptyDomain> {
        if !self.contains(var, value) {
            return Err(EmptyDomain { var });
        }
        self.narrow(var, Domain::singleton(value))
    }

    /// Removes every value below `lo`.
    pub fn set_min(&mut self, var: VarId, lo: i64) -> Result<bool, EmptyDomain> {
        self.restrict_bounds(var, lo, i64::MAX)
    }

    /// Removes every value above `hi`.
    pub fn set_max(&mut self, var: VarId, hi: i64) -> Result<bool, EmptyDomain> {
        self.restrict_bounds(var, i64::MIN, hi)
    }

    /// Removes every value outside `[lo, hi]`.
    pub fn restrict_bounds(&mut self, var: VarId, lo: i64, hi: i64) -> Result<bool, EmptyDomain> {
        if lo <= self.min(var) && hi >= self.max(var) {
            return Ok(false);
        }
        let domain = self.domain(var).clamped(lo, hi);
        self.narrow(var, domain)
    }

    /// Moves the variables changed since the last call into `out`.
    pub fn drain_changes(&mut self, out: &mut Vec<VarId>) {
        for &var in &self.changed {
            self.dirty[var.index()] = false;
        }
        out.append(&mut self.changed);
    }

    /// Forgets pending change notifications.
    pub fn clear_changes(&mut self) {
        for &var in &self.changed {
            self.dirty[var.index()] = false;
        }
        self.changed.clear();
    }
}

impl fmt::Display for DomainStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.domains.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "#{i}={d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(i: usize) -> VarId {
        VarId::new(i)
    }

    fn store3() -> DomainStore {
        DomainStore::new(vec![Domain::range(0, 2); 3])
    }

    #[test]
    fn test_narrow_records_trail() {
        let mut s = store3();
        assert_eq!(s.narrow(v(0), Domain::from_values([0, 2])), Ok(true));
        assert_eq!(s.trail_len(), 1);
        assert_eq!(s.narrow(v(0), Domain::from_values([0, 2])), Ok(false));
        assert_eq!(s.trail_len(), 1);
    }

    #[test]
    fn test_empty_narrowing_leaves_store_untouched() {
        let mut s = store3();
        let before = s.domain(v(1)).clone();
        assert_eq!(s.narrow(v(1), Domain::default()), Err(EmptyDomain { var: v(1) }));
        assert_eq!(s.domain(v(1)), &before);
        assert_eq!(s.trail_len(), 0);
    }

    #[test]
    fn test_restore_is_exact() {
        let mut s = store3();
        s.remove_value(v(0), 1).unwrap();
        let cp = s.mark();
        let snapshot: Vec<Domain> = s.vars().map(|x| s.domain(x).clone()).collect();

        s.fix(v(0), 2).unwrap();
        s.set_min(v(1), 1).unwrap();
        s.set_max(v(1), 1).unwrap();
        s.remove_value(v(2), 0).unwrap();
        s.restore(cp);

        let after: Vec<Domain> = s.vars().map(|x| s.domain(x).clone()).collect();
        assert_eq!(snapshot, after);
        // the hole punched before the mark survives the restore
        assert_eq!(s.domain(v(0)).values(), &[0, 2]);
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut s = store3();
        let outer = s.mark();
        s.fix(v(0), 0).unwrap();
        let inner = s.mark();
        s.fix(v(1), 1).unwrap();
        s.restore(inner);
        assert_eq!(s.value(v(0)), Some(0));
        assert_eq!(s.size(v(1)), 3);
        s.restore(outer);
        assert_eq!(s.size(v(0)), 3);
    }

    #[test]
    fn test_fix_missing_value_fails() {
        let mut s = store3();
        s.remove_value(v(0), 1).unwrap();
        assert!(s.fix(v(0), 1).is_err());
    }

    #[test]
    fn test_bounds() {
        let mut s = DomainStore::new(vec![Domain::from_values([1, 4, 6, 9])]);
        assert_eq!(s.restrict_bounds(v(0), 2, 8), Ok(true));
        assert_eq!(s.min(v(0)), 4);
        assert_eq!(s.max(v(0)), 6);
        assert_eq!(s.restrict_bounds(v(0), 0, 10), Ok(false));
        assert!(s.restrict_bounds(v(0), 7, 8).is_err());
    }

    #[test]
    fn test_change_tracking_dedups() {
        let mut s = store3();
        s.remove_value(v(2), 0).unwrap();
        s.remove_value(v(2), 1).unwrap();
        s.remove_value(v(0), 0).unwrap();
        let mut out = Vec::new();
        s.drain_changes(&mut out);
        assert_eq!(out, vec![v(2), v(0)]);
        out.clear();
        s.drain_changes(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_assignment() {
        let mut s = store3();
        assert!(s.assignment().is_none());
        for (i, val) in [2, 0, 1].into_iter().enumerate() {
            s.fix(v(i), val).unwrap();
        }
        assert!(s.is_assigned());
        assert_eq!(s.assignment(), Some(vec![2, 0, 1]));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Remove(usize, i64),
        Fix(usize, i64),
        Bounds(usize, i64, i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..4usize, -3..8i64).prop_map(|(x, val)| Op::Remove(x, val)),
            (0..4usize, -3..8i64).prop_map(|(x, val)| Op::Fix(x, val)),
            (0..4usize, -3..8i64, -3..8i64).prop_map(|(x, lo, hi)| Op::Bounds(x, lo, hi)),
        ]
    }

    proptest! {
        #[test]
        fn prop_restore_round_trip(
            prefix in proptest::collection::vec(op(), 0..6),
            ops in proptest::collection::vec(op(), 0..20),
        ) {
            let mut s = DomainStore::new(vec![Domain::range(0, 5); 4]);
            for o in &prefix {
                let _ = apply(&mut s, o);
            }
            let cp = s.mark();
            let snapshot: Vec<Domain> = s.vars().map(|x| s.domain(x).clone()).collect();
            for o in &ops {
                let _ = apply(&mut s, o);
                for x in s.vars() {
                    prop_assert!(!s.domain(x).is_empty());
                }
            }
            s.restore(cp);
            let after: Vec<Domain> = s.vars().map(|x| s.domain(x).clone()).collect();
            prop_assert_eq!(snapshot, after);
        }
    }

    fn apply(s: &mut DomainStore, op: &Op) -> Result<bool, EmptyDomain> {
        match *op {
            Op::Remove(x, val) => s.remove_value(v(x), val),
            Op::Fix(x, val) => s.fix(v(x), val),
            Op::Bounds(x, lo, hi) => s.restrict_bounds(v(x), lo, hi),
        }
    }
}
