//! Worker × task cost table.
//!
//! [`CostMatrix`] is the single read-only input of a solve. Rows are
//! workers, columns are tasks, and each cell is the cost of that worker
//! performing that task. It is built once, validated, and then shared by
//! `Arc` across every candidate of every restart.

use std::fmt;

use crate::error::{AssignError, AssignResult};

/// Immutable table of nonnegative, finite costs.
///
/// Stored row-major in a flat buffer. Equality compares dimensions and
/// values, which is what candidate recombination requires.
///
/// # Examples
///
/// ```
/// use u_assign::CostMatrix;
///
/// let m = CostMatrix::new(vec![
///     vec![2.0, 3.0, 6.0],
///     vec![5.0, 4.0, 2.0],
/// ]).unwrap();
/// assert_eq!(m.worker_count(), 2);
/// assert_eq!(m.task_count(), 3);
/// assert_eq!(m.cost(1, 2), 2.0);
/// assert_eq!(m.cheapest_worker_for(2), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct CostMatrix {
    workers: usize,
    tasks: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Builds a matrix from one row of task costs per worker.
    ///
    /// # Errors
    ///
    /// - [`AssignError::Shape`] if there are no rows, the first row is
    ///   empty, or rows differ in length.
    /// - [`AssignError::Value`] if any cost is negative, NaN, or infinite.
    pub fn new(rows: Vec<Vec<f64>>) -> AssignResult<Self> {
        let workers = rows.len();
        if workers == 0 {
            return Err(AssignError::Shape("cost table has no workers".into()));
        }
        let tasks = rows[0].len();
        if tasks == 0 {
            return Err(AssignError::Shape("cost table has no tasks".into()));
        }

        let mut costs = Vec::with_capacity(workers * tasks);
        for (worker, row) in rows.into_iter().enumerate() {
            if row.len() != tasks {
                return Err(AssignError::Shape(format!(
                    "row {worker} has {} entries, expected {tasks}",
                    row.len()
                )));
            }
            for (task, &cost) in row.iter().enumerate() {
                if !cost.is_finite() {
                    return Err(AssignError::Value(format!(
                        "cost at worker {worker}, task {task} is not finite"
                    )));
                }
                if cost < 0.0 {
                    return Err(AssignError::Value(format!(
                        "cost at worker {worker}, task {task} is negative ({cost})"
                    )));
                }
            }
            costs.extend(row);
        }

        Ok(Self {
            workers,
            tasks,
            costs,
        })
    }

    /// Number of workers (rows).
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Number of tasks (columns).
    pub fn task_count(&self) -> usize {
        self.tasks
    }

    /// Cost of `worker` performing `task`.
    ///
    /// # Panics
    /// Panics if either index is out of range. Use [`get`](Self::get) for a
    /// checked lookup.
    pub fn cost(&self, worker: usize, task: usize) -> f64 {
        assert!(
            worker < self.workers && task < self.tasks,
            "cost index ({worker}, {task}) out of range for {}x{} matrix",
            self.workers,
            self.tasks
        );
        self.costs[worker * self.tasks + task]
    }

    /// Checked cost lookup.
    pub fn get(&self, worker: usize, task: usize) -> Option<f64> {
        if worker < self.workers && task < self.tasks {
            Some(self.costs[worker * self.tasks + task])
        } else {
            None
        }
    }

    /// Costs of every task for one worker.
    ///
    /// # Panics
    /// Panics if `worker` is out of range.
    pub fn row(&self, worker: usize) -> &[f64] {
        let start = worker * self.tasks;
        &self.costs[start..start + self.tasks]
    }

    /// Costs of one task across workers, in worker order.
    ///
    /// # Panics
    /// Panics if `task` is out of range.
    pub fn column(&self, task: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(task < self.tasks, "task {task} out of range");
        self.costs.iter().skip(task).step_by(self.tasks).copied()
    }

    /// Worker with the minimum cost for `task`, lowest index on ties.
    ///
    /// # Panics
    /// Panics if `task` is out of range.
    pub fn cheapest_worker_for(&self, task: usize) -> usize {
        assert!(task < self.tasks, "task {task} out of range");
        let mut best = 0;
        let mut best_cost = self.cost(0, task);
        for worker in 1..self.workers {
            let cost = self.cost(worker, task);
            if cost < best_cost {
                best = worker;
                best_cost = cost;
            }
        }
        best
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = AssignError;

    fn try_from(rows: Vec<Vec<f64>>) -> AssignResult<Self> {
        Self::new(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix
            .costs
            .chunks(matrix.tasks)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl fmt::Display for CostMatrix {
    /// One bracketed row per worker, e.g. `[2, 3, 6]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for worker in 0..self.workers {
            if worker > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (task, cost) in self.row(worker).iter().enumerate() {
                if task > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{cost}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
