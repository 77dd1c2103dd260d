//! Best-of-restarts driver.
//!
//! A single evolutionary run can converge early on a poor local optimum
//! when its initial population is unlucky. [`Solver`] runs the engine
//! `num_restarts` times from freshly seeded populations and returns the
//! fittest candidate over all of them.
//!
//! # Key Types
//!
//! - [`SolverConfig`]: Population, generation, and restart counts
//! - [`Solver`]: Executes restarts with the default or a custom engine
//! - [`SolveResult`]: Winning candidate and per-restart summaries

mod config;
mod runner;

pub use config::SolverConfig;
pub use runner::{RestartSummary, SolveResult, Solver};
