//! Solver configuration.

use super::strategy::{SearchStrategy, ValueSelection, VariableSelection};
use crate::model::Direction;

/// What the search is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    /// Stop at the first solution.
    #[default]
    FirstSolution,
    /// Enumerate every solution.
    AllSolutions,
    /// Branch-and-bound on the model objective.
    Optimize(Direction),
}

/// Solver configuration.
///
/// # Examples
///
/// ```
/// use u_csp::model::Direction;
/// use u_csp::search::{SearchMode, SolverConfig, VariableSelection};
///
/// let config = SolverConfig::default()
///     .with_mode(SearchMode::Optimize(Direction::Maximize))
///     .with_variable_selection(VariableSelection::MinDomain)
///     .with_time_limit_ms(5_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Search mode.
    pub mode: SearchMode,

    /// Variable and value ordering.
    pub strategy: SearchStrategy,

    /// Wall-clock budget in milliseconds, checked once per node. 0 = no limit.
    pub time_limit_ms: u64,

    /// Maximum number of search nodes. 0 = no limit.
    pub node_limit: u64,

    /// Stop after this many solutions. 0 = no limit.
    pub solution_limit: u64,

    /// Random seed for randomized strategies.
    pub seed: Option<u64>,
}

impl SolverConfig {
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_variable_selection(mut self, selection: VariableSelection) -> Self {
        self.strategy.variable = selection;
        self
    }

    pub fn with_value_selection(mut self, selection: ValueSelection) -> Self {
        self.strategy.value = selection;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_node_limit(mut self, n: u64) -> Self {
        self.node_limit = n;
        self
    }

    pub fn with_solution_limit(mut self, n: u64) -> Self {
        self.solution_limit = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.mode == SearchMode::FirstSolution && self.solution_limit > 1 {
            return Err(format!(
                "solution_limit {} conflicts with first-solution mode",
                self.solution_limit
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.mode, SearchMode::FirstSolution);
        assert_eq!(config.strategy.variable, VariableSelection::FirstUnbound);
        assert_eq!(config.strategy.value, ValueSelection::Ascending);
        assert_eq!(config.time_limit_ms, 0);
        assert_eq!(config.node_limit, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SolverConfig::default().validate().is_ok());
        let config = SolverConfig::default()
            .with_mode(SearchMode::AllSolutions)
            .with_solution_limit(5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_first_solution_limit() {
        let config = SolverConfig::default().with_solution_limit(3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = SolverConfig::default()
            .with_value_selection(ValueSelection::Descending)
            .with_node_limit(100)
            .with_seed(7);
        assert_eq!(config.strategy.value, ValueSelection::Descending);
        assert_eq!(config.node_limit, 100);
        assert_eq!(config.seed, Some(7));
    }
}
