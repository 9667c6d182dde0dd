//! Binary disequality.

use super::PruneResult;
use crate::domain::DomainStore;
use crate::model::VarId;

/// Once either side is fixed, its value is removed from the other side.
pub(crate) fn propagate(a: VarId, b: VarId, store: &mut DomainStore) -> PruneResult {
    let mut pruned = false;
    if let Some(value) = store.value(a) {
        pruned |= store.remove_value(b, value)?;
    }
    if let Some(value) = store.value(b) {
        pruned |= store.remove_value(a, value)?;
    }
    Ok(pruned)
}
