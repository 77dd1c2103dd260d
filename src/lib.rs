//! Min-max task assignment over unrelated workers.
//!
//! Given a cost for every (worker, task) pair, find an assignment of every
//! task to one worker that minimizes the largest total cost any worker
//! carries (the makespan). The problem is NP-hard, so the crate searches
//! with a Genetic Algorithm and keeps the best of several independent
//! restarts.
//!
//! - **Cost model**: [`CostMatrix`], [`Allocation`]
//! - **Chromosome**: [`AssignmentCandidate`] with fitness `1 / makespan`,
//!   uniform crossover, and swap mutation
//! - **Seeding**: [`PopulationSeeder`] with OLB and UDA heuristics plus
//!   uniform random candidates
//! - **Engine**: the [`ga`] contract ([`ga::Chromosome`],
//!   [`ga::EvolutionEngine`]) and the default [`ga::GaEngine`]
//! - **Driver**: [`Solver`], best of `num_restarts` runs
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use u_assign::{CostMatrix, Solver, SolverConfig};
//!
//! let matrix = Arc::new(CostMatrix::new(vec![
//!     vec![2.0, 3.0, 6.0, 7.0, 8.0],
//!     vec![5.0, 4.0, 2.0, 6.0, 6.0],
//!     vec![4.0, 5.0, 7.0, 4.0, 7.0],
//!     vec![5.0, 2.0, 5.0, 3.0, 3.0],
//! ]).unwrap());
//!
//! let result = Solver::solve(matrix, &SolverConfig::fast().with_seed(7)).unwrap();
//! println!("{}", result.best.to_report());
//! ```
//!
//! # Features
//!
//! - `parallel` (default): run restarts and score offspring on rayon
//! - `serde`: serialization for matrices, configs, and reports

pub mod allocation;
pub mod candidate;
pub mod error;
pub mod ga;
pub mod matrix;
pub mod random;
pub mod report;
pub mod seeder;
pub mod solver;

pub use allocation::Allocation;
pub use candidate::AssignmentCandidate;
pub use error::{AssignError, AssignResult};
pub use matrix::CostMatrix;
pub use report::AssignmentReport;
pub use seeder::PopulationSeeder;
pub use solver::{RestartSummary, SolveResult, Solver, SolverConfig};
