//! Constraint propagation.
//!
//! The [`PropagationEngine`] applies constraint pruning rules until a
//! fixpoint: either no domain changes any more, or some constraint fails.

mod engine;

pub use engine::{FixpointStatus, PropagationEngine};
