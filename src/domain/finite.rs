//! Finite integer domains.

use std::fmt;

/// A finite set of integers, stored sorted and without duplicates.
///
/// Domains are plain values: every narrowing builds a new, smaller domain
/// and leaves the original untouched, which is what lets the
/// [`DomainStore`](super::DomainStore) keep exact snapshots on its trail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Domain {
    values: Vec<i64>,
}

impl Domain {
    /// The contiguous range `[min, max]`. Empty when `min > max`.
    pub fn range(min: i64, max: i64) -> Self {
        if min > max {
            return Self::default();
        }
        Self {
            values: (min..=max).collect(),
        }
    }

    /// Domain holding exactly the given values.
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut values: Vec<i64> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        Self { values }
    }

    /// Domain holding a single value.
    pub fn singleton(value: i64) -> Self {
        Self {
            values: vec![value],
        }
    }

    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether exactly one value remains.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.values.len() == 1
    }

    /// The remaining value, if the domain is a singleton.
    #[inline]
    pub fn value(&self) -> Option<i64> {
        match self.values.as_slice() {
            [v] => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn min(&self) -> Option<i64> {
        self.values.first().copied()
    }

    #[inline]
    pub fn max(&self) -> Option<i64> {
        self.values.last().copied()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Whether every value of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &Domain) -> bool {
        self.values.iter().all(|&v| other.contains(v))
    }

    /// This domain minus `value`.
    pub fn without(&self, value: i64) -> Domain {
        let mut values = self.values.clone();
        if let Ok(pos) = values.binary_search(&value) {
            values.remove(pos);
        }
        Domain { values }
    }

    /// Values of this domain inside `[lo, hi]`.
    pub fn clamped(&self, lo: i64, hi: i64) -> Domain {
        let start = self.values.partition_point(|&v| v < lo);
        let end = self.values.partition_point(|&v| v <= hi);
        Domain {
            values: self.values.get(start..end).unwrap_or_default().to_vec(),
        }
    }

    /// Values of this domain satisfying `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(i64) -> bool) -> Domain {
        Domain {
            values: self.values.iter().copied().filter(|&v| keep(v)).collect(),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min(), self.max()) {
            (Some(lo), Some(hi)) if hi.abs_diff(lo) + 1 == self.len() as u64 => {
                write!(f, "[{lo}..{hi}]")
            }
            _ => {
                write!(f, "{{")?;
                for (i, v) in self.values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
