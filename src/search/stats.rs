//! Search statistics.

use std::fmt;
use std::time::Duration;

/// Counters collected during one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Search nodes entered after a successful propagation.
    pub nodes: u64,
    /// Branching decisions tried.
    pub branches: u64,
    /// Decisions (or the root) whose propagation failed.
    pub conflicts: u64,
    /// Decision levels abandoned after all their values were tried.
    pub backtracks: u64,
    /// Single-constraint propagation calls.
    pub propagations: u64,
    /// Solutions reported to the sink.
    pub solutions: u64,
    /// Deepest decision level reached.
    pub max_depth: usize,
    /// Wall-clock time spent in the solve call.
    pub wall_time: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics")?;
        writeln!(f, "  conflicts   : {}", self.conflicts)?;
        writeln!(f, "  branches    : {}", self.branches)?;
        writeln!(f, "  backtracks  : {}", self.backtracks)?;
        writeln!(f, "  nodes       : {}", self.nodes)?;
        writeln!(f, "  propagations: {}", self.propagations)?;
        writeln!(f, "  max depth   : {}", self.max_depth)?;
        writeln!(f, "  solutions   : {}", self.solutions)?;
        write!(f, "  wall time   : {:.6} s", self.wall_time.as_secs_f64())
    }
}
