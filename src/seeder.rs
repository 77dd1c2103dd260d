//! Initial population construction.
//!
//! Two deterministic heuristics give the search a reasonable starting
//! point, and uniform random sampling supplies diversity:
//!
//! - **OLB** (Opportunistic Load Balancing): task `i` → worker
//!   `i mod worker_count`, ignoring cost.
//! - **UDA** (User Directed Assignment): each task → its cheapest worker,
//!   ignoring the resulting load balance.
//! - **Random**: each task → a uniformly random worker.
//!
//! # Reference
//! Braun et al. (2001), "A Comparison of Eleven Static Heuristics for
//! Mapping a Class of Independent Tasks onto Heterogeneous Distributed
//! Computing Systems"

use std::sync::Arc;

use rand::Rng;

use crate::candidate::AssignmentCandidate;
use crate::error::{AssignError, AssignResult};
use crate::matrix::CostMatrix;

/// Number of heuristic candidates placed at the front of a seeded
/// population.
pub const HEURISTIC_SEEDS: usize = 2;

/// Builds candidates over one shared cost matrix.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_assign::{CostMatrix, PopulationSeeder};
///
/// let matrix = Arc::new(CostMatrix::new(vec![
///     vec![2.0, 3.0, 6.0],
///     vec![5.0, 4.0, 2.0],
///     vec![4.0, 5.0, 7.0],
/// ]).unwrap());
/// let seeder = PopulationSeeder::new(matrix);
/// assert_eq!(seeder.user_directed_assignment().unwrap().workers(), vec![0, 0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct PopulationSeeder {
    matrix: Arc<CostMatrix>,
}

impl PopulationSeeder {
    /// Creates a seeder over `matrix`.
    pub fn new(matrix: Arc<CostMatrix>) -> Self {
        Self { matrix }
    }

    /// The shared cost matrix.
    pub fn matrix(&self) -> &Arc<CostMatrix> {
        &self.matrix
    }

    /// Round-robin assignment: task `i` goes to worker `i mod worker_count`.
    pub fn opportunistic_load_balancing(&self) -> AssignResult<AssignmentCandidate> {
        let workers = self.matrix.worker_count();
        let assignment: Vec<usize> = (0..self.matrix.task_count())
            .map(|task| task % workers)
            .collect();
        self.build(&assignment)
    }

    /// Greedy assignment: every task goes to its cheapest worker.
    pub fn user_directed_assignment(&self) -> AssignResult<AssignmentCandidate> {
        let assignment: Vec<usize> = (0..self.matrix.task_count())
            .map(|task| self.matrix.cheapest_worker_for(task))
            .collect();
        self.build(&assignment)
    }

    /// Uniformly random worker for every task.
    pub fn random_candidate<R: Rng>(&self, rng: &mut R) -> AssignResult<AssignmentCandidate> {
        let workers = self.matrix.worker_count();
        let assignment: Vec<usize> = (0..self.matrix.task_count())
            .map(|_| rng.random_range(0..workers))
            .collect();
        self.build(&assignment)
    }

    /// Builds `size` candidates.
    ///
    /// With `include_heuristics`, the population starts with the OLB and
    /// UDA candidates (in that order) and the remaining `size - 2` are
    /// random. Otherwise all `size` are random.
    ///
    /// # Errors
    /// [`AssignError::Value`] if `include_heuristics` is set and `size < 2`.
    pub fn seed_population<R: Rng>(
        &self,
        size: usize,
        include_heuristics: bool,
        rng: &mut R,
    ) -> AssignResult<Vec<AssignmentCandidate>> {
        let mut population = Vec::with_capacity(size);

        if include_heuristics {
            if size < HEURISTIC_SEEDS {
                return Err(AssignError::Value(format!(
                    "population size {size} cannot hold the {HEURISTIC_SEEDS} heuristic seeds"
                )));
            }
            population.push(self.opportunistic_load_balancing()?);
            population.push(self.user_directed_assignment()?);
        }

        while population.len() < size {
            population.push(self.random_candidate(rng)?);
        }
        Ok(population)
    }

    fn build(&self, workers: &[usize]) -> AssignResult<AssignmentCandidate> {
        let candidate = AssignmentCandidate::from_workers(Arc::clone(&self.matrix), workers)?;
        candidate.validate()?;
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn sample_seeder() -> PopulationSeeder {
        PopulationSeeder::new(Arc::new(
            CostMatrix::new(vec![
                vec![2.0, 3.0, 6.0],
                vec![5.0, 4.0, 2.0],
                vec![4.0, 5.0, 7.0],
            ])
            .unwrap(),
        ))
    }

    #[test]
    fn test_olb_round_robin() {
        let olb = sample_seeder().opportunistic_load_balancing().unwrap();
        assert_eq!(olb.workers(), vec![0, 1, 2]);
    }

    #[test]
    fn test_olb_wraps_around_workers() {
        let seeder = PopulationSeeder::new(Arc::new(
            CostMatrix::new(vec![vec![1.0; 5], vec![9.0; 5]]).unwrap(),
        ));
        let olb = seeder.opportunistic_load_balancing().unwrap();
        assert_eq!(olb.workers(), vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_uda_cheapest_worker() {
        let uda = sample_seeder().user_directed_assignment().unwrap();
        assert_eq!(uda.workers(), vec![0, 0, 1]);
        let costs: Vec<f64> = uda.allocations().iter().map(|a| a.cost()).collect();
        assert_eq!(costs, vec![2.0, 3.0, 2.0]);
        assert_eq!(uda.worker_loads(), vec![5.0, 2.0, 0.0]);
        assert!((uda.fitness() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_random_candidate_is_valid() {
        let seeder = sample_seeder();
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let c = seeder.random_candidate(&mut rng).unwrap();
            c.validate().unwrap();
            assert!(c.workers().iter().all(|&w| w < 3));
        }
    }

    #[test]
    fn test_random_candidate_covers_workers() {
        let seeder = sample_seeder();
        let mut rng = create_rng(7);
        let mut used = [false; 3];
        for _ in 0..50 {
            for w in seeder.random_candidate(&mut rng).unwrap().workers() {
                used[w] = true;
            }
        }
        assert_eq!(used, [true; 3]);
    }

    #[test]
    fn test_seed_population_with_heuristics() {
        let seeder = sample_seeder();
        let mut rng = create_rng(42);
        let pop = seeder.seed_population(5, true, &mut rng).unwrap();

        assert_eq!(pop.len(), 5);
        assert_eq!(pop[0], seeder.opportunistic_load_balancing().unwrap());
        assert_eq!(pop[1], seeder.user_directed_assignment().unwrap());
        for c in &pop {
            c.validate().unwrap();
        }
    }

    #[test]
    fn test_seed_population_random_only() {
        let seeder = sample_seeder();
        let mut rng = create_rng(42);
        let pop = seeder.seed_population(4, false, &mut rng).unwrap();
        assert_eq!(pop.len(), 4);
        assert!(seeder.seed_population(0, false, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_seed_population_exactly_heuristics() {
        let seeder = sample_seeder();
        let mut rng = create_rng(1);
        let pop = seeder.seed_population(2, true, &mut rng).unwrap();
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_seed_population_too_small_for_heuristics() {
        let seeder = sample_seeder();
        let mut rng = create_rng(42);
        for size in [0, 1] {
            let err = seeder.seed_population(size, true, &mut rng).unwrap_err();
            assert!(matches!(err, AssignError::Value(_)));
        }
    }

    #[test]
    fn test_candidates_share_matrix() {
        let seeder = sample_seeder();
        let mut rng = create_rng(42);
        let pop = seeder.seed_population(3, true, &mut rng).unwrap();
        for c in &pop {
            assert!(Arc::ptr_eq(c.matrix(), seeder.matrix()));
        }
    }
}
