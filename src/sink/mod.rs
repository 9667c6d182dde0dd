//! Solution sinks.
//!
//! A sink is invoked synchronously by the search each time a solution is
//! found. Its return value doubles as a cooperative stop signal: returning
//! [`SinkCommand::Stop`] makes the search unwind and finish cleanly.
//!
//! # Built-in sinks
//!
//! - [`CollectAll`]: keeps every solution, in emission order
//! - [`FirstOnly`]: keeps the first solution and stops the search
//! - [`BestOnly`]: keeps only the best solution under an objective direction
//! - [`CallbackSink`]: forwards each solution to a closure
//! - [`SolutionPrinter`]: writes one line per solution to any writer

mod callback;
mod collect;
mod printer;

pub use callback::CallbackSink;
pub use collect::{BestOnly, CollectAll, FirstOnly};
pub use printer::SolutionPrinter;

use crate::search::Solution;
use std::fmt;

/// Command returned by a sink to control the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCommand {
    /// Keep searching.
    Continue,
    /// Stop the search.
    Stop,
}

impl fmt::Display for SinkCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkCommand::Continue => write!(f, "Continue"),
            SinkCommand::Stop => write!(f, "Stop"),
        }
    }
}

/// Receives solutions as the search finds them.
pub trait SolutionSink {
    /// Called once per solution, in emission order.
    fn on_solution(&mut self, solution: &Solution) -> SinkCommand;

    /// Returns the name of the sink.
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn SolutionSink + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolutionSink({})", self.name())
    }
}
