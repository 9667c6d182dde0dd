//! Bounds propagation for linear (in)equalities.
//!
//! For `sum(a_i * x_i) op c` every term `a_i * x_i` ranges over an interval
//! derived from the bounds of `x_i`. Summing those intervals gives the
//! achievable range of the left-hand side. Each term is then restricted to
//! what the other terms leave over, and the restriction is mapped back to
//! bounds on `x_i` by rounding inwards.
//!
//! Sums are computed in `i128` so that products of two `i64` values and
//! their totals cannot overflow.

use super::{Conflict, PruneResult};
use crate::domain::DomainStore;
use crate::model::VarId;

/// Achievable `[lo, hi]` of `coefficient * var`.
fn term_bounds(coefficient: i64, var: VarId, store: &DomainStore) -> (i128, i128) {
    let a = i128::from(coefficient);
    let lo = i128::from(store.min(var));
    let hi = i128::from(store.max(var));
    if a >= 0 {
        (a * lo, a * hi)
    } else {
        (a * hi, a * lo)
    }
}

fn div_floor(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 && ((n < 0) != (d < 0)) {
        q - 1
    } else {
        q
    }
}

fn div_ceil(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d != 0 && ((n < 0) == (d < 0)) {
        q + 1
    } else {
        q
    }
}

fn saturate(v: i128) -> i64 {
    v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Restricts `var` so that `coefficient * var` lies in `[lo, hi]`; an
/// absent side is unbounded.
fn restrict_term(
    coefficient: i64,
    var: VarId,
    lo: Option<i128>,
    hi: Option<i128>,
    store: &mut DomainStore,
) -> PruneResult {
    if coefficient == 0 {
        return Ok(false);
    }
    let a = i128::from(coefficient);
    let (var_lo, var_hi) = if a > 0 {
        (lo.map(|l| div_ceil(l, a)), hi.map(|h| div_floor(h, a)))
    } else {
        (hi.map(|h| div_ceil(h, a)), lo.map(|l| div_floor(l, a)))
    };
    let var_lo = var_lo.map_or(i64::MIN, saturate);
    let var_hi = var_hi.map_or(i64::MAX, saturate);
    Ok(store.restrict_bounds(var, var_lo, var_hi)?)
}

pub(crate) fn weighted_sum(coefficients: &[i64], vars: &[VarId], values: &[i64]) -> i128 {
    coefficients
        .iter()
        .zip(vars)
        .map(|(&a, v)| i128::from(a) * i128::from(values[v.index()]))
        .sum()
}

/// `sum(coefficients[i] * vars[i]) == constant`.
pub(crate) fn propagate_equality(
    coefficients: &[i64],
    vars: &[VarId],
    constant: i64,
    store: &mut DomainStore,
) -> PruneResult {
    let bounds: Vec<(i128, i128)> = coefficients
        .iter()
        .zip(vars)
        .map(|(&a, &v)| term_bounds(a, v, store))
        .collect();
    let sum_lo: i128 = bounds.iter().map(|b| b.0).sum();
    let sum_hi: i128 = bounds.iter().map(|b| b.1).sum();
    let target = i128::from(constant);
    if target < sum_lo || target > sum_hi {
        return Err(Conflict);
    }

    let mut pruned = false;
    for ((&a, &v), &(lo, hi)) in coefficients.iter().zip(vars).zip(&bounds) {
        let term_lo = target - (sum_hi - hi);
        let term_hi = target - (sum_lo - lo);
        pruned |= restrict_term(a, v, Some(term_lo), Some(term_hi), store)?;
    }
    Ok(pruned)
}

/// `sum(coefficients[i] * vars[i]) <= constant`.
pub(crate) fn propagate_less_equal(
    coefficients: &[i64],
    vars: &[VarId],
    constant: i64,
    store: &mut DomainStore,
) -> PruneResult {
    let lows: Vec<i128> = coefficients
        .iter()
        .zip(vars)
        .map(|(&a, &v)| term_bounds(a, v, store).0)
        .collect();
    let sum_lo: i128 = lows.iter().sum();
    let target = i128::from(constant);
    if sum_lo > target {
        return Err(Conflict);
    }

    let mut pruned = false;
    for ((&a, &v), &lo) in coefficients.iter().zip(vars).zip(&lows) {
        let term_hi = target - (sum_lo - lo);
        pruned |= restrict_term(a, v, None, Some(term_hi), store)?;
    }
    Ok(pruned)
}
