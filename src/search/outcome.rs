//! Solve status and results.

use super::config::SearchMode;
use super::solution::Solution;
use super::stats::SearchStats;
use std::fmt;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible solution(s) found; optimality not proven or not asked for.
    Feasible,
    /// The search space was exhausted without a solution.
    Infeasible,
    /// A node/time limit or cancellation cut the search short.
    Unknown,
}

impl SolveStatus {
    pub(crate) fn from_search(mode: SearchMode, reason: StopReason, solutions: u64) -> Self {
        match reason {
            StopReason::NodeLimit | StopReason::TimeLimit | StopReason::Cancelled => {
                SolveStatus::Unknown
            }
            StopReason::Exhausted if solutions == 0 => SolveStatus::Infeasible,
            StopReason::Exhausted if matches!(mode, SearchMode::Optimize(_)) => {
                SolveStatus::Optimal
            }
            StopReason::Exhausted
            | StopReason::FirstSolution
            | StopReason::SinkStopped
            | StopReason::SolutionLimit => SolveStatus::Feasible,
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Why the search loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Every branch was explored (or the root failed).
    Exhausted,
    /// First-solution mode found its solution.
    FirstSolution,
    /// The solution sink asked to stop.
    SinkStopped,
    /// The configured solution limit was reached.
    SolutionLimit,
    /// The configured node limit was reached.
    NodeLimit,
    /// The configured time limit was reached.
    TimeLimit,
    /// The external cancellation flag was raised.
    Cancelled,
}

/// Summary returned by sink-driven solves.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub status: SolveStatus,
    pub stop_reason: StopReason,
    /// Best objective value in optimization mode.
    pub objective_value: Option<i64>,
    pub stats: SearchStats,
}

/// Result of [`CpSolver::solve`](super::CpSolver::solve).
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: SolveStatus,
    /// First solution, all solutions, or the best solution, depending on
    /// the search mode.
    pub solutions: Vec<Solution>,
    /// Best objective value in optimization mode.
    pub objective_value: Option<i64>,
    pub stats: SearchStats,
}

impl Outcome {
    pub(crate) fn from_report(report: SearchReport, solutions: Vec<Solution>) -> Self {
        Self {
            status: report.status,
            solutions,
            objective_value: report.objective_value,
            stats: report.stats,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// The last retained solution: the optimum in optimization mode.
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    #[test]
    fn test_status_mapping() {
        let opt = SearchMode::Optimize(Direction::Maximize);
        assert_eq!(
            SolveStatus::from_search(opt, StopReason::Exhausted, 3),
            SolveStatus::Optimal
        );
        assert_eq!(
            SolveStatus::from_search(SearchMode::AllSolutions, StopReason::Exhausted, 3),
            SolveStatus::Feasible
        );
        assert_eq!(
            SolveStatus::from_search(SearchMode::FirstSolution, StopReason::Exhausted, 0),
            SolveStatus::Infeasible
        );
        assert_eq!(
            SolveStatus::from_search(opt, StopReason::TimeLimit, 2),
            SolveStatus::Unknown
        );
        assert_eq!(
            SolveStatus::from_search(opt, StopReason::SinkStopped, 1),
            SolveStatus::Feasible
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Optimal.to_string(), "OPTIMAL");
        assert_eq!(SolveStatus::Infeasible.to_string(), "INFEASIBLE");
    }
}
