//! Modeling layer.
//!
//! # Key Components
//!
//! - **Variables**: [`IntVar`] declarations, addressed by dense [`VarId`]s
//! - **Expressions**: [`LinearExpr`] for linear constraints and objectives
//! - **Model**: [`Model`] container for variables, constraints, objective
//!
//! A model is plain data. It is validated once at the start of every solve
//! and never mutated by the solver.

mod definition;
mod expr;
mod variables;

pub use definition::Model;
pub use expr::{Direction, LinearExpr};
pub use variables::{IntVar, VarId, MAX_DOMAIN_SIZE};
