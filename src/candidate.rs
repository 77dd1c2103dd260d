//! Complete task-to-worker assignment (the chromosome).
//!
//! An [`AssignmentCandidate`] holds exactly one [`Allocation`] per task,
//! stored in task-index order. Every constructor and operator re-checks
//! that invariant before handing a candidate back, so the engine never
//! sees a partial or duplicated assignment.
//!
//! # Operators
//!
//! - [`fitness`](AssignmentCandidate::fitness): `1 / makespan`, infinite
//!   when every assigned cost is zero
//! - [`recombine`](AssignmentCandidate::recombine): uniform crossover, one
//!   independent coin flip per task
//! - [`mutate`](AssignmentCandidate::mutate): swap the workers of two
//!   distinct tasks

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::allocation::Allocation;
use crate::error::{AssignError, AssignResult};
use crate::ga::Chromosome;
use crate::matrix::CostMatrix;
use crate::report::AssignmentReport;

/// One complete assignment of every task to a worker.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_assign::{AssignmentCandidate, CostMatrix};
///
/// let matrix = Arc::new(CostMatrix::new(vec![
///     vec![2.0, 3.0, 6.0],
///     vec![5.0, 4.0, 2.0],
///     vec![4.0, 5.0, 7.0],
/// ]).unwrap());
/// let c = AssignmentCandidate::from_workers(matrix, &[0, 0, 1]).unwrap();
/// assert_eq!(c.makespan(), 5.0);
/// assert!((c.fitness() - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentCandidate {
    matrix: Arc<CostMatrix>,
    allocations: Vec<Allocation>,
}

impl AssignmentCandidate {
    /// Builds a candidate from one worker index per task.
    ///
    /// # Errors
    /// - [`AssignError::InvariantViolation`] if `workers.len()` differs from
    ///   the task count.
    /// - [`AssignError::IndexOutOfRange`] if a worker index is outside the
    ///   matrix.
    pub fn from_workers(matrix: Arc<CostMatrix>, workers: &[usize]) -> AssignResult<Self> {
        if workers.len() != matrix.task_count() {
            return Err(AssignError::InvariantViolation(format!(
                "expected {} task assignments, got {}",
                matrix.task_count(),
                workers.len()
            )));
        }
        let allocations = workers
            .iter()
            .enumerate()
            .map(|(task, &worker)| Allocation::new(task, worker, &matrix))
            .collect::<AssignResult<Vec<_>>>()?;
        Ok(Self {
            matrix,
            allocations,
        })
    }

    /// Builds a candidate from allocations in any order.
    ///
    /// Allocations are sorted by task index, then every invariant is
    /// checked.
    ///
    /// # Errors
    /// [`AssignError::InvariantViolation`] if a task is missing or
    /// duplicated, or an allocation's cost disagrees with `matrix`.
    pub fn from_allocations(
        matrix: Arc<CostMatrix>,
        mut allocations: Vec<Allocation>,
    ) -> AssignResult<Self> {
        allocations.sort_by_key(Allocation::task);
        let candidate = Self {
            matrix,
            allocations,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    /// Checks completeness, uniqueness, task-index order, and cached costs.
    ///
    /// # Errors
    /// [`AssignError::InvariantViolation`] describing the first problem
    /// found.
    pub fn validate(&self) -> AssignResult<()> {
        let tasks = self.matrix.task_count();
        let mut seen = vec![false; tasks];

        for (position, alloc) in self.allocations.iter().enumerate() {
            let task = alloc.task();
            if task >= tasks {
                return Err(AssignError::InvariantViolation(format!(
                    "task {task} does not exist ({tasks} tasks)"
                )));
            }
            if seen[task] {
                return Err(AssignError::InvariantViolation(format!(
                    "task {task} assigned more than once"
                )));
            }
            seen[task] = true;

            if task != position {
                return Err(AssignError::InvariantViolation(format!(
                    "task {task} stored at position {position}"
                )));
            }
            match self.matrix.get(alloc.worker(), task) {
                Some(cost) if cost == alloc.cost() => {}
                Some(cost) => {
                    return Err(AssignError::InvariantViolation(format!(
                        "task {task} caches cost {} but matrix has {cost}",
                        alloc.cost()
                    )))
                }
                None => {
                    return Err(AssignError::InvariantViolation(format!(
                        "task {task} assigned to missing worker {}",
                        alloc.worker()
                    )))
                }
            }
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(AssignError::InvariantViolation(format!(
                "task {missing} is not assigned"
            )));
        }
        Ok(())
    }

    /// The shared cost matrix.
    pub fn matrix(&self) -> &Arc<CostMatrix> {
        &self.matrix
    }

    /// Allocations in ascending task order.
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Assigned worker of each task, in task order.
    pub fn workers(&self) -> Vec<usize> {
        self.allocations.iter().map(Allocation::worker).collect()
    }

    /// Total assigned cost per worker.
    pub fn worker_loads(&self) -> Vec<f64> {
        let mut loads = vec![0.0; self.matrix.worker_count()];
        for alloc in &self.allocations {
            loads[alloc.worker()] += alloc.cost();
        }
        loads
    }

    /// Total cost assigned to `worker` (zero for an idle or unknown worker).
    pub fn total_cost_to_worker(&self, worker: usize) -> f64 {
        self.allocations
            .iter()
            .filter(|a| a.worker() == worker)
            .map(Allocation::cost)
            .sum()
    }

    /// The largest per-worker load.
    pub fn makespan(&self) -> f64 {
        self.worker_loads().into_iter().fold(0.0, f64::max)
    }

    /// Workers whose load equals the makespan.
    pub fn bottleneck_workers(&self) -> Vec<usize> {
        let loads = self.worker_loads();
        let makespan = loads.iter().copied().fold(0.0, f64::max);
        loads
            .iter()
            .enumerate()
            .filter(|&(_, &load)| load == makespan)
            .map(|(worker, _)| worker)
            .collect()
    }

    /// `1 / makespan`; higher is better.
    ///
    /// Returns `f64::INFINITY` when the makespan is zero, i.e. every
    /// assigned cost is zero and no assignment can do better.
    pub fn fitness(&self) -> f64 {
        let makespan = self.makespan();
        if makespan == 0.0 {
            f64::INFINITY
        } else {
            1.0 / makespan
        }
    }

    /// Uniform crossover with `other`.
    ///
    /// Each task independently takes its worker from `self` or `other` with
    /// equal probability; costs are re-read from the matrix. Both parents
    /// are left untouched.
    ///
    /// # Errors
    /// [`AssignError::IncompatibleMatrix`] if `other` was built over a
    /// matrix with different dimensions or values.
    pub fn recombine<R: Rng>(&self, other: &Self, rng: &mut R) -> AssignResult<Self> {
        self.check_compatible(other)?;

        let workers: Vec<usize> = self
            .allocations
            .iter()
            .zip(&other.allocations)
            .map(|(mine, theirs)| {
                if rng.random_bool(0.5) {
                    mine.worker()
                } else {
                    theirs.worker()
                }
            })
            .collect();

        let child = Self::from_workers(Arc::clone(&self.matrix), &workers)?;
        child.validate()?;
        Ok(child)
    }

    /// Swaps the workers of two distinct, uniformly chosen tasks.
    ///
    /// Both allocations are rebuilt, so their costs come from the matrix.
    /// Allocations stay in task order. A single-task candidate has no pair
    /// to swap and is left unchanged.
    ///
    /// # Errors
    /// [`AssignError::InvariantViolation`] if the result fails
    /// [`validate`](Self::validate).
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) -> AssignResult<()> {
        let n = self.allocations.len();
        if n < 2 {
            return Ok(());
        }

        let first = rng.random_range(0..n);
        let mut second = rng.random_range(0..n - 1);
        if second >= first {
            second += 1;
        }

        let (a, b) = (self.allocations[first], self.allocations[second]);
        self.allocations[first] = Allocation::new(a.task(), b.worker(), &self.matrix)?;
        self.allocations[second] = Allocation::new(b.task(), a.worker(), &self.matrix)?;

        self.validate()
    }

    /// Builds the human-readable summary of this assignment.
    pub fn to_report(&self) -> AssignmentReport {
        AssignmentReport {
            allocations: self.allocations.clone(),
            makespan: self.makespan(),
            bottleneck_workers: self.bottleneck_workers(),
            matrix: (*self.matrix).clone(),
        }
    }

    fn check_compatible(&self, other: &Self) -> AssignResult<()> {
        if !Arc::ptr_eq(&self.matrix, &other.matrix) && *self.matrix != *other.matrix {
            return Err(AssignError::IncompatibleMatrix(format!(
                "{}x{} matrix vs {}x{} matrix with different costs",
                self.matrix.worker_count(),
                self.matrix.task_count(),
                other.matrix.worker_count(),
                other.matrix.task_count()
            )));
        }
        if self.allocations.len() != other.allocations.len() {
            return Err(AssignError::InvariantViolation(format!(
                "parents hold {} and {} allocations",
                self.allocations.len(),
                other.allocations.len()
            )));
        }
        Ok(())
    }
}

impl Chromosome for AssignmentCandidate {
    type Error = AssignError;

    fn fitness(&self) -> f64 {
        AssignmentCandidate::fitness(self)
    }

    fn recombine<R: Rng>(&self, other: &Self, rng: &mut R) -> AssignResult<Self> {
        AssignmentCandidate::recombine(self, other, rng)
    }

    fn mutate<R: Rng>(&mut self, rng: &mut R) -> AssignResult<()> {
        AssignmentCandidate::mutate(self, rng)
    }
}

impl fmt::Display for AssignmentCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_report(), f)
    }
}
