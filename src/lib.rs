//! Backtracking finite-domain constraint solver.
//!
//! Provides a small, complete constraint programming stack over integer
//! variables with finite domains:
//!
//! - **Model**: [`model::Model`] holds variables, constraints and an
//!   optional linear objective, built with [`model::LinearExpr`].
//! - **Domains**: [`domain::DomainStore`] keeps the current domain of every
//!   variable with an undo trail, so backtracking restores exactly the
//!   domains recorded at a checkpoint.
//! - **Constraints**: [`constraint::Constraint`] covers not-equal,
//!   all-different, linear equality and linear inequality, each with its
//!   own filtering rule.
//! - **Propagation**: [`propagation::PropagationEngine`] runs the filtering
//!   rules to a fixpoint with a worklist of constraints.
//! - **Search**: [`search::BacktrackingSolver`] performs depth-first search
//!   for one solution, all solutions, or an optimal solution by
//!   branch-and-bound.
//! - **Sinks**: [`sink::SolutionSink`] receives solutions as they are found
//!   and can stop the search.
//!
//! # Example
//!
//! ```
//! use u_csp::model::{Direction, LinearExpr, Model};
//! use u_csp::search::{solve, SearchMode, SearchStrategy, SolveStatus};
//!
//! let mut model = Model::new("xyz");
//! let x = model.new_int_var("x", 0, 2);
//! let y = model.new_int_var("y", 0, 2);
//! let z = model.new_int_var("z", 0, 2);
//! model.add_not_equal(x, y);
//! model.set_objective(LinearExpr::new().term(1, x).term(2, y).term(3, z));
//!
//! let outcome = solve(
//!     &model,
//!     SearchMode::Optimize(Direction::Maximize),
//!     SearchStrategy::default(),
//! )
//! .unwrap();
//! assert_eq!(outcome.status, SolveStatus::Optimal);
//! assert_eq!(outcome.objective_value, Some(11));
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: `debug` at the start and end of each
//! search, `trace` per solution and per failed propagation. Install any
//! subscriber to see them.

pub mod constraint;
pub mod domain;
pub mod error;
pub mod model;
pub mod propagation;
pub mod search;
pub mod sink;
