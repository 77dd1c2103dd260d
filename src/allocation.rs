//! A single task-to-worker assignment.

use std::fmt;

use crate::error::{AssignError, AssignResult};
use crate::matrix::CostMatrix;

/// One task assigned to one worker, with the cost read from the matrix.
///
/// The cost is a cache of `matrix.cost(worker, task)`. There is no setter:
/// moving a task to another worker means building a new `Allocation`, which
/// re-reads the cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Allocation {
    task: usize,
    worker: usize,
    cost: f64,
}

impl Allocation {
    /// Assigns `task` to `worker`, reading the cost from `matrix`.
    ///
    /// # Errors
    /// [`AssignError::IndexOutOfRange`] if either index is outside `matrix`.
    pub fn new(task: usize, worker: usize, matrix: &CostMatrix) -> AssignResult<Self> {
        let cost = matrix
            .get(worker, task)
            .ok_or(AssignError::IndexOutOfRange {
                worker,
                task,
                workers: matrix.worker_count(),
                tasks: matrix.task_count(),
            })?;
        Ok(Self { task, worker, cost })
    }

    /// Task index.
    pub fn task(&self) -> usize {
        self.task
    }

    /// Worker index.
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Cached cost of this task on this worker.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task {}: worker {} at cost {}",
            self.task + 1,
            self.worker + 1,
            self.cost
        )
    }
}
