//! Worklist propagation to a fixpoint.

use crate::constraint::{Constraint, PropagationStatus};
use crate::domain::DomainStore;
use crate::model::{Model, VarId};
use std::collections::VecDeque;
use tracing::trace;

/// Result of running the engine to a fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixpointStatus {
    /// No constraint can prune further and no domain is empty.
    Consistent,
    /// Some constraint failed; the current node is infeasible.
    Failed,
}

/// Runs constraints against a [`DomainStore`] until nothing changes.
///
/// The engine keeps a copy of the model's constraints, a watch list per
/// variable, and optionally one extra constraint for the objective bound
/// used by branch-and-bound. When a constraint prunes, every constraint
/// watching a changed variable is put back on the queue.
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    constraints: Vec<Constraint>,
    watchers: Vec<Vec<usize>>,
    objective_slot: Option<usize>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
    changes: Vec<VarId>,
    propagations: u64,
}

impl PropagationEngine {
    /// Builds an engine for the constraints of a validated model.
    pub fn new(model: &Model) -> Self {
        let mut engine = Self {
            constraints: Vec::with_capacity(model.constraint_count() + 1),
            watchers: vec![Vec::new(); model.var_count()],
            objective_slot: None,
            queue: VecDeque::new(),
            queued: Vec::new(),
            changes: Vec::new(),
            propagations: 0,
        };
        for constraint in model.constraints() {
            engine.push(constraint.clone());
        }
        engine
    }

    fn push(&mut self, constraint: Constraint) -> usize {
        let slot = self.constraints.len();
        let mut scope = constraint.scope();
        scope.sort_unstable();
        scope.dedup();
        for var in scope {
            self.watchers[var.index()].push(slot);
        }
        self.constraints.push(constraint);
        self.queued.push(false);
        slot
    }

    /// Installs the objective bound `sum(coefficients * vars) <= constant`.
    ///
    /// Branch-and-bound keeps this constraint for the whole search and only
    /// ever lowers `constant` through
    /// [`tighten_objective_bound`](Self::tighten_objective_bound).
    pub fn install_objective_bound(&mut self, coefficients: Vec<i64>, vars: Vec<VarId>, constant: i64) {
        let slot = self.push(Constraint::LinearLessEqual {
            coefficients,
            vars,
            constant,
        });
        self.objective_slot = Some(slot);
    }

    /// Lowers the right-hand side of the objective bound.
    pub fn tighten_objective_bound(&mut self, bound: i64) {
        let Some(slot) = self.objective_slot else {
            return;
        };
        if let Constraint::LinearLessEqual { constant, .. } = &mut self.constraints[slot] {
            *constant = (*constant).min(bound);
        }
    }

    /// Current right-hand side of the objective bound, if one is installed.
    pub fn objective_bound(&self) -> Option<i64> {
        match self.objective_slot.map(|slot| &self.constraints[slot]) {
            Some(Constraint::LinearLessEqual { constant, .. }) => Some(*constant),
            _ => None,
        }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Total number of single-constraint propagation calls so far.
    pub fn propagations(&self) -> u64 {
        self.propagations
    }

    /// Runs every constraint to a fixpoint.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn propagate(&mut self, store: &mut DomainStore) -> FixpointStatus {
        for slot in 0..self.constraints.len() {
            self.enqueue(slot);
        }
        self.run(store)
    }

    /// Runs to a fixpoint after `var` alone was narrowed.
    ///
    /// Only the constraints watching `var`, plus the objective bound, are
    /// seeded. The node being extended must already have been at a fixpoint.
    #[tracing::instrument(level = "trace", skip(self, store))]
    pub fn propagate_from(&mut self, store: &mut DomainStore, var: VarId) -> FixpointStatus {
        for i in 0..self.watchers[var.index()].len() {
            let slot = self.watchers[var.index()][i];
            self.enqueue(slot);
        }
        if let Some(slot) = self.objective_slot {
            self.enqueue(slot);
        }
        self.run(store)
    }

    fn enqueue(&mut self, slot: usize) {
        if !self.queued[slot] {
            self.queued[slot] = true;
            self.queue.push_back(slot);
        }
    }

    fn run(&mut self, store: &mut DomainStore) -> FixpointStatus {
        store.clear_changes();
        while let Some(slot) = self.queue.pop_front() {
            self.queued[slot] = false;
            self.propagations += 1;
            match self.constraints[slot].propagate(store) {
                PropagationStatus::NoChange => {}
                PropagationStatus::Pruned => {
                    store.drain_changes(&mut self.changes);
                    for var in self.changes.drain(..) {
                        for &watcher in &self.watchers[var.index()] {
                            if !self.queued[watcher] {
                                self.queued[watcher] = true;
                                self.queue.push_back(watcher);
                            }
                        }
                    }
                }
                PropagationStatus::Failed => {
                    trace!(
                        constraint = self.constraints[slot].kind(),
                        slot,
                        "propagation failed"
                    );
                    for pending in self.queue.drain(..) {
                        self.queued[pending] = false;
                    }
                    store.clear_changes();
                    return FixpointStatus::Failed;
                }
            }
        }
        FixpointStatus::Consistent
    }
}
