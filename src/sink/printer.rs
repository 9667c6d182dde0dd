//! Solution printing.

use super::{SinkCommand, SolutionSink};
use crate::model::{Model, VarId};
use crate::search::Solution;
use std::io::{self, Write};
use std::time::Instant;
use tracing::warn;

/// Writes every solution to `out` as it is found.
///
/// Each solution produces a header line with its index, the time since the
/// printer was created and the objective value (if any), followed by an
/// indented `name = value` line for the printed variables.
///
/// A write error stops the search; the error is kept and can be inspected
/// with [`take_error`](Self::take_error).
pub struct SolutionPrinter<W> {
    out: W,
    columns: Vec<(String, VarId)>,
    start: Instant,
    count: u64,
    error: Option<io::Error>,
}

impl<W: Write> SolutionPrinter<W> {
    /// Prints every variable of `model`.
    pub fn new(model: &Model, out: W) -> Self {
        let vars = (0..model.var_count()).map(VarId::new);
        Self::with_vars(model, vars, out)
    }

    /// Prints only `vars`, in the given order.
    pub fn with_vars(model: &Model, vars: impl IntoIterator<Item = VarId>, out: W) -> Self {
        let columns = vars
            .into_iter()
            .filter(|v| v.index() < model.var_count())
            .map(|v| (model.var(v).name.clone(), v))
            .collect();
        Self {
            out,
            columns,
            start: Instant::now(),
            count: 0,
            error: None,
        }
    }

    /// Number of solutions printed.
    pub fn solution_count(&self) -> u64 {
        self.count
    }

    /// Returns the write error that stopped the search, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_solution(&mut self, solution: &Solution) -> io::Result<()> {
        write!(
            self.out,
            "Solution {}, time = {:.2} s",
            self.count,
            self.start.elapsed().as_secs_f64()
        )?;
        if let Some(objective) = solution.objective() {
            write!(self.out, ", objective = {objective}")?;
        }
        writeln!(self.out)?;
        for (name, var) in &self.columns {
            write!(self.out, "  {} = {}", name, solution.value(*var))?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> SolutionSink for SolutionPrinter<W> {
    fn on_solution(&mut self, solution: &Solution) -> SinkCommand {
        match self.write_solution(solution) {
            Ok(()) => {
                self.count += 1;
                SinkCommand::Continue
            }
            Err(err) => {
                warn!(error = %err, "failed to print solution, stopping search");
                self.error = Some(err);
                SinkCommand::Stop
            }
        }
    }

    fn name(&self) -> &str {
        "SolutionPrinter"
    }
}
