//! Best-of-restarts execution.
//!
//! [`Solver`] seeds a fresh population for every restart, lets an engine
//! evolve it, and keeps the fittest candidate seen across all restarts.
//! Restarts are independent: each gets its own RNG seed, drawn from the
//! master seed before any restart runs, so results do not depend on
//! whether restarts execute in sequence or in parallel.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::SolverConfig;
use crate::candidate::AssignmentCandidate;
use crate::error::{AssignError, AssignResult};
use crate::ga::{EvolutionEngine, GaEngine};
use crate::matrix::CostMatrix;
use crate::random::{create_rng, rng_from_option, split_seeds};
use crate::seeder::PopulationSeeder;

/// Outcome of one restart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RestartSummary {
    /// Restart index, starting at 0.
    pub restart: usize,

    /// Seed of this restart's RNG.
    pub seed: u64,

    /// Fitness of the fittest candidate the engine returned.
    pub best_fitness: f64,

    /// Generations evolved.
    pub generations: usize,
}

/// Result of a best-of-restarts solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The fittest candidate across all restarts.
    pub best: AssignmentCandidate,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Makespan of `best` (the reciprocal of `best_fitness`).
    pub makespan: f64,

    /// Index of the restart that produced `best`.
    pub best_restart: usize,

    /// One summary per restart, in restart order.
    pub restarts: Vec<RestartSummary>,
}

/// Runs an evolution engine over several independently seeded populations.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_assign::{CostMatrix, Solver, SolverConfig};
///
/// let matrix = Arc::new(CostMatrix::new(vec![
///     vec![2.0, 3.0, 6.0],
///     vec![5.0, 4.0, 2.0],
///     vec![4.0, 5.0, 7.0],
/// ]).unwrap());
/// let config = SolverConfig::fast().with_seed(42);
/// let result = Solver::solve(matrix, &config).unwrap();
/// assert!(result.makespan <= 5.0);
/// ```
pub struct Solver;

impl Solver {
    /// Solves with the default [`GaEngine`] configured by `config.ga`.
    ///
    /// # Errors
    /// [`AssignError::Value`] for an invalid configuration; any operator
    /// error raised during evolution.
    pub fn solve(matrix: Arc<CostMatrix>, config: &SolverConfig) -> AssignResult<SolveResult> {
        let ga = config.ga.clone();
        Self::solve_with(matrix, config, move |population| {
            GaEngine::new(population, ga.clone())
        })
    }

    /// Solves with engines built by `make_engine`, one per restart.
    ///
    /// `make_engine` receives the freshly seeded population. The driver
    /// then calls `evolve` `generations_per_run` times and reads the
    /// engine's fittest member.
    ///
    /// # Errors
    /// [`AssignError::Value`] for an invalid configuration; any error from
    /// `make_engine` or from evolution.
    pub fn solve_with<E, F>(
        matrix: Arc<CostMatrix>,
        config: &SolverConfig,
        make_engine: F,
    ) -> AssignResult<SolveResult>
    where
        E: EvolutionEngine<AssignmentCandidate>,
        F: Fn(Vec<AssignmentCandidate>) -> AssignResult<E> + Sync,
    {
        config.validate()?;

        let seeder = PopulationSeeder::new(matrix);
        let mut master = rng_from_option(config.seed);
        let seeds = split_seeds(&mut master, config.num_restarts);

        let outcomes = run_all(&seeder, config, &make_engine, &seeds);

        let mut best = BestOfRestarts::default();
        let mut restarts = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            let (summary, candidate) = outcome?;
            best = best.offer(summary.restart, summary.best_fitness, candidate);
            restarts.push(summary);
        }

        let (best_restart, best_fitness, best) = best
            .into_inner()
            .ok_or_else(|| AssignError::Value("no restarts were run".into()))?;
        let makespan = best.makespan();
        info!(
            restarts = restarts.len(),
            best_restart, best_fitness, makespan, "solve finished"
        );

        Ok(SolveResult {
            best,
            best_fitness,
            makespan,
            best_restart,
            restarts,
        })
    }
}

/// Best-so-far accumulator threaded through the restart reduction.
///
/// A later restart replaces the current best only when strictly fitter,
/// so ties keep the earliest restart.
#[derive(Debug, Default)]
struct BestOfRestarts {
    best: Option<(usize, f64, AssignmentCandidate)>,
}

impl BestOfRestarts {
    fn offer(self, restart: usize, fitness: f64, candidate: AssignmentCandidate) -> Self {
        if let Some((_, current, _)) = &self.best {
            if fitness <= *current {
                return self;
            }
        }
        Self {
            best: Some((restart, fitness, candidate)),
        }
    }

    fn into_inner(self) -> Option<(usize, f64, AssignmentCandidate)> {
        self.best
    }
}

type RestartOutcome = AssignResult<(RestartSummary, AssignmentCandidate)>;

#[cfg(feature = "parallel")]
fn run_all<E, F>(
    seeder: &PopulationSeeder,
    config: &SolverConfig,
    make_engine: &F,
    seeds: &[u64],
) -> Vec<RestartOutcome>
where
    E: EvolutionEngine<AssignmentCandidate>,
    F: Fn(Vec<AssignmentCandidate>) -> AssignResult<E> + Sync,
{
    if config.parallel {
        seeds
            .par_iter()
            .enumerate()
            .map(|(restart, &seed)| run_restart(seeder, config, make_engine, restart, seed))
            .collect()
    } else {
        seeds
            .iter()
            .enumerate()
            .map(|(restart, &seed)| run_restart(seeder, config, make_engine, restart, seed))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all<E, F>(
    seeder: &PopulationSeeder,
    config: &SolverConfig,
    make_engine: &F,
    seeds: &[u64],
) -> Vec<RestartOutcome>
where
    E: EvolutionEngine<AssignmentCandidate>,
    F: Fn(Vec<AssignmentCandidate>) -> AssignResult<E> + Sync,
{
    seeds
        .iter()
        .enumerate()
        .map(|(restart, &seed)| run_restart(seeder, config, make_engine, restart, seed))
        .collect()
}

fn run_restart<E, F>(
    seeder: &PopulationSeeder,
    config: &SolverConfig,
    make_engine: &F,
    restart: usize,
    seed: u64,
) -> RestartOutcome
where
    E: EvolutionEngine<AssignmentCandidate>,
    F: Fn(Vec<AssignmentCandidate>) -> AssignResult<E>,
{
    let mut rng = create_rng(seed);
    let population =
        seeder.seed_population(config.population_size, config.include_heuristics, &mut rng)?;
    let mut engine = make_engine(population)?;

    for _ in 0..config.generations_per_run {
        engine.evolve(&mut rng)?;
    }

    let best = engine.fittest().cloned().ok_or_else(|| {
        AssignError::InvariantViolation(format!("restart {restart}: engine has no members"))
    })?;
    best.validate()?;

    let best_fitness = best.fitness();
    debug!(restart, seed, best_fitness, "restart finished");

    Ok((
        RestartSummary {
            restart,
            seed,
            best_fitness,
            generations: config.generations_per_run,
        },
        best,
    ))
}

// ============================================================================
// Tests
// ============================================================================
