//! Error types.
//!
//! Only malformed input is an error. Local infeasibility during search
//! (an emptied domain, a failed constraint) is an ordinary status handled
//! by backtracking and never reaches the caller.

use thiserror::Error;

/// A model or configuration that cannot be solved as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A variable was declared with `min > max`.
    #[error("variable `{name}` has invalid bounds [{min}, {max}]")]
    InvalidBounds { name: String, min: i64, max: i64 },

    /// A variable was declared from an empty value list.
    #[error("variable `{name}` has an empty domain")]
    EmptyVariableDomain { name: String },

    /// A variable declares more values than the solver materializes.
    #[error("variable `{name}` has {size} values, more than the maximum of {max}")]
    DomainTooLarge { name: String, size: u64, max: u64 },

    /// Two variables share a name.
    #[error("duplicate variable name `{name}`")]
    DuplicateVariable { name: String },

    /// A constraint or objective references a variable the model does not own.
    #[error("{context} references undeclared variable #{index}")]
    UnknownVariable { context: String, index: usize },

    /// Coefficient and variable lists of a linear term differ in length.
    #[error("{context}: {coefficients} coefficients for {vars} variables")]
    LengthMismatch {
        context: String,
        coefficients: usize,
        vars: usize,
    },

    /// A linear term, right-hand side or objective range does not fit in `i64`.
    #[error("{context} does not fit in 64-bit integers")]
    Overflow { context: String },

    /// Optimization was requested for a model without an objective.
    #[error("optimization requested but the model `{model}` has no objective")]
    MissingObjective { model: String },

    /// The solver configuration is inconsistent.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ModelError::InvalidBounds {
            name: "x".into(),
            min: 5,
            max: 1,
        };
        assert_eq!(err.to_string(), "variable `x` has invalid bounds [5, 1]");

        let err = ModelError::LengthMismatch {
            context: "linear equality #2".into(),
            coefficients: 3,
            vars: 2,
        };
        assert_eq!(
            err.to_string(),
            "linear equality #2: 3 coefficients for 2 variables"
        );

        let err = ModelError::Overflow {
            context: "objective".into(),
        };
        assert_eq!(err.to_string(), "objective does not fit in 64-bit integers");
    }
}
