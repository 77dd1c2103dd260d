//! Human-readable summary of an assignment.

use std::fmt;

use crate::allocation::Allocation;
use crate::matrix::CostMatrix;

/// Snapshot of an assignment for display or export.
///
/// Rendered by `Display` as one line per task in ascending task order, the
/// makespan, the bottleneck worker(s), and the cost matrix. Task and worker
/// numbers are 1-based in the text form and 0-based in the fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AssignmentReport {
    /// Allocations in ascending task order.
    pub allocations: Vec<Allocation>,
    /// Maximum total cost of any worker (the reciprocal of the fitness).
    pub makespan: f64,
    /// Workers whose load equals the makespan.
    pub bottleneck_workers: Vec<usize>,
    /// The cost matrix the assignment was built over.
    pub matrix: CostMatrix,
}

impl fmt::Display for AssignmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for alloc in &self.allocations {
            writeln!(f, "{alloc}")?;
        }
        writeln!(f, "max cost to a worker: {}", self.makespan)?;
        let workers: Vec<String> = self
            .bottleneck_workers
            .iter()
            .map(|w| (w + 1).to_string())
            .collect();
        writeln!(f, "bottleneck worker(s): {}", workers.join(", "))?;
        writeln!(f, "cost matrix:")?;
        write!(f, "{}", self.matrix)
    }
}
