//! Recorded solutions.

use crate::model::{Model, VarId};
use std::fmt;

/// A total assignment satisfying every constraint of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    values: Vec<i64>,
    objective: Option<i64>,
    index: usize,
}

impl Solution {
    pub(crate) fn new(values: Vec<i64>, objective: Option<i64>, index: usize) -> Self {
        Self {
            values,
            objective,
            index,
        }
    }

    /// Value assigned to `var`.
    #[inline]
    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.index()]
    }

    /// All values, indexed by [`VarId`].
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Objective value, if the model has an objective.
    pub fn objective(&self) -> Option<i64> {
        self.objective
    }

    /// Zero-based position of this solution in emission order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Formats the assignment with variable names.
    pub fn display<'a>(&'a self, model: &'a Model) -> impl fmt::Display + 'a {
        NamedSolution {
            solution: self,
            model,
        }
    }
}

struct NamedSolution<'a> {
    solution: &'a Solution,
    model: &'a Model,
}

impl fmt::Display for NamedSolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (var, value)) in self.model.vars().iter().zip(&self.solution.values).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", var.name, value)?;
        }
        Ok(())
    }
}
