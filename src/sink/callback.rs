//! Closure-backed sink.

use super::{SinkCommand, SolutionSink};
use crate::search::Solution;

/// Forwards each solution to a closure.
///
/// # Examples
///
/// ```
/// use u_csp::sink::{CallbackSink, SinkCommand};
///
/// let mut seen = 0;
/// let mut sink = CallbackSink::new(|_solution| {
///     seen += 1;
///     SinkCommand::Continue
/// });
/// ```
pub struct CallbackSink<F> {
    callback: F,
    calls: u64,
}

impl<F> CallbackSink<F>
where
    F: FnMut(&Solution) -> SinkCommand,
{
    pub fn new(callback: F) -> Self {
        Self { callback, calls: 0 }
    }

    /// Number of solutions forwarded so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl<F> SolutionSink for CallbackSink<F>
where
    F: FnMut(&Solution) -> SinkCommand,
{
    fn on_solution(&mut self, solution: &Solution) -> SinkCommand {
        self.calls += 1;
        (self.callback)(solution)
    }

    fn name(&self) -> &str {
        "CallbackSink"
    }
}
