//! Model definition.

use super::expr::LinearExpr;
use super::variables::{IntVar, VarId, MAX_DOMAIN_SIZE};
use crate::constraint::Constraint;
use crate::error::ModelError;
use std::collections::HashSet;

/// A finite-domain constraint model.
///
/// Contains integer variables, constraints, and an optional linear objective.
/// The optimization direction is chosen when solving, through
/// [`SearchMode::Optimize`](crate::search::SearchMode::Optimize).
///
/// # Examples
///
/// ```
/// use u_csp::model::{LinearExpr, Model};
///
/// let mut model = Model::new("example");
/// let x = model.new_int_var("x", 0, 2);
/// let y = model.new_int_var("y", 0, 2);
/// let z = model.new_int_var("z", 0, 2);
/// model.add_not_equal(x, y);
/// model.set_objective(LinearExpr::new().term(1, x).term(2, y).term(3, z));
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Model name.
    pub name: String,
    vars: Vec<IntVar>,
    constraints: Vec<Constraint>,
    objective: Option<LinearExpr>,
    /// First linear helper whose terms did not fit in `i64`.
    overflow: Option<String>,
}

impl Model {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a variable and returns its id.
    pub fn add_var(&mut self, var: IntVar) -> VarId {
        let id = VarId::new(self.vars.len());
        self.vars.push(var);
        id
    }

    /// Adds an integer variable with domain `[min, max]`.
    pub fn new_int_var(&mut self, name: impl Into<String>, min: i64, max: i64) -> VarId {
        self.add_var(IntVar::new(name, min, max))
    }

    /// Adds an integer variable with an explicit set of values.
    pub fn new_int_var_from_values(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = i64>,
    ) -> VarId {
        self.add_var(IntVar::from_values(name, values))
    }

    /// Adds a 0/1 variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VarId {
        self.add_var(IntVar::boolean(name))
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: `a != b`.
    pub fn add_not_equal(&mut self, a: VarId, b: VarId) {
        self.constraints.push(Constraint::NotEqual { a, b });
    }

    /// Convenience: pairwise distinct values.
    pub fn add_all_different(&mut self, vars: impl IntoIterator<Item = VarId>) {
        self.constraints.push(Constraint::AllDifferent {
            vars: vars.into_iter().collect(),
        });
    }

    /// Convenience: `expr == rhs`.
    ///
    /// A merged coefficient or right-hand side outside `i64` is reported by
    /// [`validate`](Self::validate) as [`ModelError::Overflow`].
    pub fn add_linear_eq(&mut self, expr: &LinearExpr, rhs: i64) {
        match (expr.normalized(), expr.shifted_rhs(rhs)) {
            (Some((coefficients, vars)), Some(constant)) => {
                self.constraints.push(Constraint::LinearEquality {
                    coefficients,
                    vars,
                    constant,
                });
            }
            _ => self.record_overflow("linear equality"),
        }
    }

    /// Convenience: `lhs == rhs` for two expressions.
    pub fn add_linear_eq_exprs(&mut self, lhs: LinearExpr, rhs: LinearExpr) {
        self.add_linear_eq(&(lhs - rhs), 0);
    }

    /// Convenience: `expr <= rhs`.
    pub fn add_linear_le(&mut self, expr: &LinearExpr, rhs: i64) {
        match (expr.normalized(), expr.shifted_rhs(rhs)) {
            (Some((coefficients, vars)), Some(constant)) => {
                self.constraints.push(Constraint::LinearLessEqual {
                    coefficients,
                    vars,
                    constant,
                });
            }
            _ => self.record_overflow("linear inequality"),
        }
    }

    /// Convenience: `expr >= rhs`, posted as `rhs - expr <= 0`.
    pub fn add_linear_ge(&mut self, expr: &LinearExpr, rhs: i64) {
        self.add_linear_le(&(-expr.clone() + rhs), 0);
    }

    fn record_overflow(&mut self, kind: &str) {
        if self.overflow.is_none() {
            self.overflow = Some(format!("{kind} #{}", self.constraints.len()));
        }
    }

    /// Sets the objective expression.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = Some(objective);
    }

    pub fn objective(&self) -> Option<&LinearExpr> {
        self.objective.as_ref()
    }

    pub fn var(&self, id: VarId) -> &IntVar {
        &self.vars[id.index()]
    }

    pub fn vars(&self) -> &[IntVar] {
        &self.vars
    }

    /// Looks up a variable by name.
    pub fn var_by_name(&self, name: &str) -> Option<VarId> {
        self.vars
            .iter()
            .position(|v| v.name == name)
            .map(VarId::new)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Validates the model for consistency.
    ///
    /// Checks variable bounds and names, and that every constraint and the
    /// objective only reference variables of this model.
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(context) = &self.overflow {
            return Err(ModelError::Overflow {
                context: context.clone(),
            });
        }

        let mut names = HashSet::new();
        for var in &self.vars {
            if var.is_sparse() {
                if var.domain_size() == 0 {
                    return Err(ModelError::EmptyVariableDomain {
                        name: var.name.clone(),
                    });
                }
            } else if var.min > var.max {
                return Err(ModelError::InvalidBounds {
                    name: var.name.clone(),
                    min: var.min,
                    max: var.max,
                });
            }
            if var.domain_size() > MAX_DOMAIN_SIZE {
                return Err(ModelError::DomainTooLarge {
                    name: var.name.clone(),
                    size: var.domain_size(),
                    max: MAX_DOMAIN_SIZE,
                });
            }
            if !var.name.is_empty() && !names.insert(var.name.as_str()) {
                return Err(ModelError::DuplicateVariable {
                    name: var.name.clone(),
                });
            }
        }

        for (i, constraint) in self.constraints.iter().enumerate() {
            let context = || format!("{} #{i}", constraint.kind());
            if let Constraint::LinearEquality {
                coefficients, vars, ..
            }
            | Constraint::LinearLessEqual {
                coefficients, vars, ..
            } = constraint
            {
                if coefficients.len() != vars.len() {
                    return Err(ModelError::LengthMismatch {
                        context: context(),
                        coefficients: coefficients.len(),
                        vars: vars.len(),
                    });
                }
            }
            self.check_vars(constraint.scope(), context)?;
        }

        if let Some(objective) = &self.objective {
            self.check_vars(objective.terms().iter().map(|&(_, v)| v), || {
                "objective".to_string()
            })?;
            self.check_objective_range(objective)?;
        }
        Ok(())
    }

    /// The objective, its offset, and its variable part negated (as posted
    /// for maximization) must all stay within `i64` over the declared
    /// domains.
    fn check_objective_range(&self, objective: &LinearExpr) -> Result<(), ModelError> {
        let overflow = || ModelError::Overflow {
            context: "objective".to_string(),
        };
        let (coefficients, _) = objective.normalized().ok_or_else(overflow)?;
        if coefficients.contains(&i64::MIN) {
            return Err(overflow());
        }

        let (lo, hi) = objective.term_range(|v| {
            let var = self.var(v);
            (var.min, var.max)
        });
        let offset = objective.offset();
        let fits = |value: i128| i64::try_from(value).is_ok();
        let symmetric = |value: i128| value.unsigned_abs() <= i64::MAX as u128;
        if !(fits(offset)
            && symmetric(lo)
            && symmetric(hi)
            && fits(lo.saturating_add(offset))
            && fits(hi.saturating_add(offset)))
        {
            return Err(overflow());
        }
        Ok(())
    }

    fn check_vars(
        &self,
        vars: impl IntoIterator<Item = VarId>,
        context: impl Fn() -> String,
    ) -> Result<(), ModelError> {
        for v in vars {
            if v.index() >= self.vars.len() {
                return Err(ModelError::UnknownVariable {
                    context: context(),
                    index: v.index(),
                });
            }
        }
        Ok(())
    }
}
