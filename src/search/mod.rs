//! Depth-first backtracking search.
//!
//! The search alternates decisions and propagation. At each node it picks an
//! unfixed variable, records a checkpoint on the domain store, and tries the
//! variable's values in order; every value is followed by propagation to a
//! fixpoint. A failed value is undone by restoring the checkpoint.
//!
//! # Key Components
//!
//! - **Solver**: [`BacktrackingSolver`] implementing [`CpSolver`]
//! - **Configuration**: [`SolverConfig`], [`SearchMode`], [`SearchStrategy`]
//! - **Results**: [`Outcome`], [`SearchReport`], [`SolveStatus`], [`SearchStats`]
//! - **Branch-and-bound**: [`ObjectiveTracker`]
//!
//! # Modes
//!
//! - [`SearchMode::FirstSolution`]: stop at the first solution
//! - [`SearchMode::AllSolutions`]: enumerate every solution exactly once
//! - [`SearchMode::Optimize`]: after each solution, require the objective to
//!   be strictly better; the last solution found is optimal once the search
//!   space is exhausted
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming", ch. 4

mod config;
mod objective;
mod outcome;
mod runner;
mod solution;
mod stats;
mod strategy;

pub use config::{SearchMode, SolverConfig};
pub use objective::ObjectiveTracker;
pub use outcome::{Outcome, SearchReport, SolveStatus, StopReason};
pub use runner::{solve, BacktrackingSolver, CpSolver};
pub use solution::Solution;
pub use stats::SearchStats;
pub use strategy::{SearchStrategy, ValueSelection, VariableSelection};
