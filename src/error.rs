//! Error types for task assignment.

use thiserror::Error;

/// Errors raised while building or operating on assignments.
///
/// None of these are retried internally. Construction errors (`Shape`,
/// `Value`, `IndexOutOfRange`) describe bad input; `IncompatibleMatrix` and
/// `InvariantViolation` indicate an integration or operator bug.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignError {
    /// Cost table rows of unequal length, or an empty table.
    #[error("shape error: {0}")]
    Shape(String),

    /// Negative or non-finite cost, or an invalid count/parameter.
    #[error("value error: {0}")]
    Value(String),

    /// Two candidates built over different cost matrices were recombined.
    #[error("incompatible cost matrices: {0}")]
    IncompatibleMatrix(String),

    /// A candidate is missing a task, duplicates one, or caches a stale cost.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A worker or task index lies outside the cost matrix.
    #[error("index out of range: worker {worker}, task {task} (matrix is {workers}x{tasks})")]
    IndexOutOfRange {
        /// Requested worker index.
        worker: usize,
        /// Requested task index.
        task: usize,
        /// Number of workers in the matrix.
        workers: usize,
        /// Number of tasks in the matrix.
        tasks: usize,
    },
}

/// Result type for assignment operations.
pub type AssignResult<T> = Result<T, AssignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = AssignError::Shape("row 1 has 2 entries, expected 3".into());
        assert_eq!(err.to_string(), "shape error: row 1 has 2 entries, expected 3");

        let err = AssignError::Value("negative cost".into());
        assert_eq!(err.to_string(), "value error: negative cost");

        let err = AssignError::IndexOutOfRange {
            worker: 4,
            task: 0,
            workers: 3,
            tasks: 3,
        };
        assert_eq!(
            err.to_string(),
            "index out of range: worker 4, task 0 (matrix is 3x3)"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<AssignError>();
    }
}
