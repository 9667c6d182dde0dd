//! Backtracking search loop.

use super::config::{SearchMode, SolverConfig};
use super::objective::ObjectiveTracker;
use super::outcome::{Outcome, SearchReport, SolveStatus, StopReason};
use super::solution::Solution;
use super::stats::SearchStats;
use super::strategy::SearchStrategy;
use crate::domain::{Checkpoint, DomainStore};
use crate::error::ModelError;
use crate::model::{IntVar, LinearExpr, Model, VarId};
use crate::propagation::{FixpointStatus, PropagationEngine};
use crate::sink::{BestOnly, CollectAll, FirstOnly, SinkCommand, SolutionSink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Trait for CP solver implementations.
pub trait CpSolver {
    /// Solves the model and returns the solutions retained for the mode.
    fn solve(&self, model: &Model, config: &SolverConfig) -> Result<Outcome, ModelError>;
}

/// Depth-first backtracking solver with propagation at every node.
///
/// # Examples
///
/// ```
/// use u_csp::model::Model;
/// use u_csp::search::{BacktrackingSolver, CpSolver, SearchMode, SolveStatus, SolverConfig};
///
/// let mut model = Model::new("example");
/// let x = model.new_int_var("x", 0, 2);
/// let y = model.new_int_var("y", 0, 2);
/// let _z = model.new_int_var("z", 0, 2);
/// model.add_not_equal(x, y);
///
/// let config = SolverConfig::default().with_mode(SearchMode::AllSolutions);
/// let outcome = BacktrackingSolver::new().solve(&model, &config).unwrap();
/// assert_eq!(outcome.status, SolveStatus::Feasible);
/// assert_eq!(outcome.solutions.len(), 18);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solves while streaming every solution into `sink`.
    pub fn solve_with_sink(
        &self,
        model: &Model,
        config: &SolverConfig,
        sink: &mut dyn SolutionSink,
    ) -> Result<SearchReport, ModelError> {
        self.solve_with_cancel(model, config, sink, None)
    }

    /// Solves with an optional cancellation flag, checked once per node.
    pub fn solve_with_cancel(
        &self,
        model: &Model,
        config: &SolverConfig,
        sink: &mut dyn SolutionSink,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchReport, ModelError> {
        model.validate()?;
        config.validate().map_err(ModelError::InvalidConfig)?;

        let tracker = match config.mode {
            SearchMode::Optimize(direction) => {
                let objective = model.objective().ok_or_else(|| ModelError::MissingObjective {
                    model: model.name.clone(),
                })?;
                let tracker = ObjectiveTracker::new(objective, direction).ok_or_else(|| {
                    ModelError::Overflow {
                        context: "objective".to_string(),
                    }
                })?;
                Some(tracker)
            }
            SearchMode::FirstSolution | SearchMode::AllSolutions => None,
        };

        let mut search = Search::new(model, config, tracker, cancel);
        Ok(search.run(sink))
    }
}

impl CpSolver for BacktrackingSolver {
    fn solve(&self, model: &Model, config: &SolverConfig) -> Result<Outcome, ModelError> {
        match config.mode {
            SearchMode::FirstSolution => {
                let mut sink = FirstOnly::new();
                let report = self.solve_with_sink(model, config, &mut sink)?;
                Ok(Outcome::from_report(report, sink.into_solution().into_iter().collect()))
            }
            SearchMode::AllSolutions => {
                let mut sink = CollectAll::new();
                let report = self.solve_with_sink(model, config, &mut sink)?;
                Ok(Outcome::from_report(report, sink.into_solutions()))
            }
            SearchMode::Optimize(direction) => {
                let mut sink = BestOnly::new(direction);
                let report = self.solve_with_sink(model, config, &mut sink)?;
                Ok(Outcome::from_report(report, sink.into_best().into_iter().collect()))
            }
        }
    }
}

/// Solves `model` in `mode` with the given branching strategy.
pub fn solve(
    model: &Model,
    mode: SearchMode,
    strategy: SearchStrategy,
) -> Result<Outcome, ModelError> {
    let config = SolverConfig::default()
        .with_mode(mode)
        .with_strategy(strategy);
    BacktrackingSolver::new().solve(model, &config)
}

/// States of the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    /// The store is at a fixpoint: branch, or report a solution.
    Exploring,
    /// Restore the deepest open decision and try its next value, popping
    /// decisions whose values are used up.
    Backtrack,
    /// Every variable is fixed and every constraint holds.
    SolutionFound,
    /// No open decision remains.
    Exhausted,
    /// Propagation failed before the first decision.
    Infeasible,
    /// A limit, the sink or the mode ended the search early.
    Stopped(StopReason),
}

/// One decision level.
#[derive(Debug)]
struct Frame {
    checkpoint: Checkpoint,
    var: VarId,
    values: Vec<i64>,
    next: usize,
}

struct Search<'a> {
    model: &'a Model,
    config: &'a SolverConfig,
    store: DomainStore,
    engine: PropagationEngine,
    tracker: Option<ObjectiveTracker>,
    objective: Option<&'a LinearExpr>,
    frames: Vec<Frame>,
    rng: StdRng,
    cancel: Option<Arc<AtomicBool>>,
    time_limit: Option<Duration>,
    start: Instant,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(
        model: &'a Model,
        config: &'a SolverConfig,
        tracker: Option<ObjectiveTracker>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Self {
        let store = DomainStore::new(model.vars().iter().map(IntVar::initial_domain).collect());
        let mut engine = PropagationEngine::new(model);
        if let Some(tracker) = &tracker {
            let (coefficients, vars) = tracker.bound_terms();
            engine.install_objective_bound(coefficients, vars, i64::MAX);
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            model,
            config,
            store,
            engine,
            tracker,
            objective: model.objective(),
            frames: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            cancel,
            time_limit: (config.time_limit_ms > 0)
                .then(|| Duration::from_millis(config.time_limit_ms)),
            start: Instant::now(),
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self, sink: &mut dyn SolutionSink) -> SearchReport {
        debug!(
            model = %self.model.name,
            vars = self.model.var_count(),
            constraints = self.model.constraint_count(),
            mode = ?self.config.mode,
            sink = sink.name(),
            "search started"
        );

        let root = self.store.mark();
        let mut state = match self.engine.propagate(&mut self.store) {
            FixpointStatus::Consistent => SearchState::Exploring,
            FixpointStatus::Failed => {
                self.stats.conflicts += 1;
                SearchState::Infeasible
            }
        };

        let reason = loop {
            state = match state {
                SearchState::Exploring => self.explore(),
                SearchState::Backtrack => self.backtrack(),
                SearchState::SolutionFound => self.report_solution(sink),
                SearchState::Infeasible => {
                    debug!("root propagation failed");
                    break StopReason::Exhausted;
                }
                SearchState::Exhausted => break StopReason::Exhausted,
                SearchState::Stopped(reason) => break reason,
            };
        };

        // unwind every open decision level
        self.frames.clear();
        self.store.restore(root);

        self.stats.propagations = self.engine.propagations();
        self.stats.wall_time = self.start.elapsed();
        let status = SolveStatus::from_search(self.config.mode, reason, self.stats.solutions);
        let objective_value = self.tracker.as_ref().and_then(ObjectiveTracker::best);

        debug!(
            %status,
            ?reason,
            solutions = self.stats.solutions,
            nodes = self.stats.nodes,
            branches = self.stats.branches,
            conflicts = self.stats.conflicts,
            objective = ?objective_value,
            "search finished"
        );

        SearchReport {
            status,
            stop_reason: reason,
            objective_value,
            stats: self.stats.clone(),
        }
    }

    fn explore(&mut self) -> SearchState {
        if let Some(reason) = self.check_limits() {
            return SearchState::Stopped(reason);
        }
        self.stats.nodes += 1;

        let strategy = self.config.strategy;
        match strategy.variable.select(&self.store, &mut self.rng) {
            None => SearchState::SolutionFound,
            Some(var) => {
                let values = strategy.value.order(self.store.domain(var), &mut self.rng);
                self.frames.push(Frame {
                    checkpoint: self.store.mark(),
                    var,
                    values,
                    next: 0,
                });
                self.stats.max_depth = self.stats.max_depth.max(self.frames.len());
                SearchState::Backtrack
            }
        }
    }

    fn backtrack(&mut self) -> SearchState {
        while let Some(frame) = self.frames.last_mut() {
            self.store.restore(frame.checkpoint);
            let Some(&value) = frame.values.get(frame.next) else {
                self.frames.pop();
                self.stats.backtracks += 1;
                continue;
            };
            frame.next += 1;
            let var = frame.var;

            self.stats.branches += 1;
            let consistent = self.store.fix(var, value).is_ok()
                && self.engine.propagate_from(&mut self.store, var) == FixpointStatus::Consistent;
            if consistent {
                return SearchState::Exploring;
            }
            self.stats.conflicts += 1;
        }
        SearchState::Exhausted
    }

    fn report_solution(&mut self, sink: &mut dyn SolutionSink) -> SearchState {
        let Some(values) = self.store.assignment() else {
            return SearchState::Backtrack;
        };
        debug_assert!(
            self.model.constraints().iter().all(|c| c.is_satisfied(&values)),
            "propagation accepted an assignment violating a constraint"
        );

        // validation keeps the objective range within i64
        let objective = self
            .objective
            .and_then(|expr| i64::try_from(expr.evaluate(&values)).ok());
        if let (Some(tracker), Some(value)) = (self.tracker.as_mut(), objective) {
            if let Some(bound) = tracker.record(value) {
                self.engine.tighten_objective_bound(bound);
            }
        }

        let index = self.stats.solutions as usize;
        self.stats.solutions += 1;
        trace!(index, objective = ?objective, depth = self.frames.len(), "solution found");

        let solution = Solution::new(values, objective, index);
        let command = sink.on_solution(&solution);

        if self.config.mode == SearchMode::FirstSolution {
            SearchState::Stopped(StopReason::FirstSolution)
        } else if command == SinkCommand::Stop {
            SearchState::Stopped(StopReason::SinkStopped)
        } else if self.config.solution_limit > 0
            && self.stats.solutions >= self.config.solution_limit
        {
            SearchState::Stopped(StopReason::SolutionLimit)
        } else {
            SearchState::Backtrack
        }
    }

    fn check_limits(&self) -> Option<StopReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if self.config.node_limit > 0 && self.stats.nodes >= self.config.node_limit {
            return Some(StopReason::NodeLimit);
        }
        if let Some(limit) = self.time_limit {
            if self.start.elapsed() >= limit {
                return Some(StopReason::TimeLimit);
            }
        }
        None
    }
}
