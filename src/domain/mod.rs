//! Finite domains and the trailed store that holds them during search.
//!
//! # Key Components
//!
//! - [`Domain`]: sorted set of candidate values for one variable
//! - [`DomainStore`]: current domains of all variables, with an undo trail
//! - [`Checkpoint`]: trail position for O(depth) backtracking
//! - [`EmptyDomain`]: failure status raised when a narrowing removes
//!   every remaining value

mod finite;
mod store;

pub use finite::Domain;
pub use store::{Checkpoint, DomainStore, EmptyDomain};
