//! Pairwise distinctness over a set of variables.

use super::{Conflict, PruneResult};
use crate::domain::DomainStore;
use crate::model::VarId;

/// Forward-checking filter with a pigeonhole test.
///
/// Each fixed variable's value is removed from every other variable of the
/// scope. Afterwards the scope fails if fewer distinct values remain in
/// the union of its domains than there are variables.
///
/// Positions are compared by index, not by id, so a variable listed twice
/// is correctly infeasible once it is fixed.
pub(crate) fn propagate(vars: &[VarId], store: &mut DomainStore) -> PruneResult {
    let mut pruned = false;
    for (i, &fixed) in vars.iter().enumerate() {
        let Some(value) = store.value(fixed) else {
            continue;
        };
        for (j, &other) in vars.iter().enumerate() {
            if i != j {
                pruned |= store.remove_value(other, value)?;
            }
        }
    }

    let mut union: Vec<i64> = vars
        .iter()
        .flat_map(|&v| store.domain(v).iter())
        .collect();
    union.sort_unstable();
    union.dedup();
    if union.len() < vars.len() {
        return Err(Conflict);
    }
    Ok(pruned)
}
