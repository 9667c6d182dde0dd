//! Collecting sinks.

use super::{SinkCommand, SolutionSink};
use crate::model::Direction;
use crate::search::Solution;

/// Keeps every solution in emission order.
#[derive(Debug, Clone, Default)]
pub struct CollectAll {
    solutions: Vec<Solution>,
}

impl CollectAll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}

impl SolutionSink for CollectAll {
    fn on_solution(&mut self, solution: &Solution) -> SinkCommand {
        self.solutions.push(solution.clone());
        SinkCommand::Continue
    }

    fn name(&self) -> &str {
        "CollectAll"
    }
}

/// Keeps the first solution and stops the search.
#[derive(Debug, Clone, Default)]
pub struct FirstOnly {
    solution: Option<Solution>,
}

impl FirstOnly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    pub fn into_solution(self) -> Option<Solution> {
        self.solution
    }
}

impl SolutionSink for FirstOnly {
    fn on_solution(&mut self, solution: &Solution) -> SinkCommand {
        if self.solution.is_none() {
            self.solution = Some(solution.clone());
        }
        SinkCommand::Stop
    }

    fn name(&self) -> &str {
        "FirstOnly"
    }
}

/// Keeps only the best solution under `direction`.
///
/// Solutions without an objective value are ignored. Ties keep the
/// earlier solution.
#[derive(Debug, Clone)]
pub struct BestOnly {
    direction: Direction,
    best: Option<Solution>,
}

impl BestOnly {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            best: None,
        }
    }

    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<Solution> {
        self.best
    }
}

impl SolutionSink for BestOnly {
    fn on_solution(&mut self, solution: &Solution) -> SinkCommand {
        let Some(value) = solution.objective() else {
            return SinkCommand::Continue;
        };
        let improves = match self.best.as_ref().and_then(Solution::objective) {
            Some(best) => self.direction.is_better(value, best),
            None => true,
        };
        if improves {
            self.best = Some(solution.clone());
        }
        SinkCommand::Continue
    }

    fn name(&self) -> &str {
        "BestOnly"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sol(values: Vec<i64>, objective: Option<i64>, index: usize) -> Solution {
        Solution::new(values, objective, index)
    }

    #[test]
    fn test_collect_all() {
        let mut sink = CollectAll::new();
        assert_eq!(sink.on_solution(&sol(vec![0], None, 0)), SinkCommand::Continue);
        assert_eq!(sink.on_solution(&sol(vec![1], None, 1)), SinkCommand::Continue);
        let all = sink.into_solutions();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].values(), &[1]);
    }

    #[test]
    fn test_first_only_stops() {
        let mut sink = FirstOnly::new();
        assert_eq!(sink.on_solution(&sol(vec![4], None, 0)), SinkCommand::Stop);
        assert_eq!(sink.on_solution(&sol(vec![5], None, 1)), SinkCommand::Stop);
        assert_eq!(sink.into_solution().map(|s| s.values().to_vec()), Some(vec![4]));
    }

    #[test]
    fn test_best_only_maximize() {
        let mut sink = BestOnly::new(Direction::Maximize);
        sink.on_solution(&sol(vec![1], Some(3), 0));
        sink.on_solution(&sol(vec![2], Some(7), 1));
        sink.on_solution(&sol(vec![3], Some(5), 2));
        sink.on_solution(&sol(vec![4], Some(7), 3));
        sink.on_solution(&sol(vec![5], None, 4));
        let best = sink.into_best().unwrap();
        assert_eq!(best.objective(), Some(7));
        assert_eq!(best.index(), 1);
    }

    #[test]
    fn test_best_only_minimize() {
        let mut sink = BestOnly::new(Direction::Minimize);
        sink.on_solution(&sol(vec![1], Some(3), 0));
        sink.on_solution(&sol(vec![2], Some(-1), 1));
        assert_eq!(sink.best().and_then(Solution::objective), Some(-1));
    }
}
