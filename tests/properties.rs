//! Property tests for the candidate operators and seeding heuristics.

use std::sync::Arc;

use proptest::prelude::*;
use u_assign::random::create_rng;
use u_assign::{Allocation, AssignmentCandidate, CostMatrix, PopulationSeeder};

/// Matrices of 1–5 workers × 1–8 tasks with integral costs in 0..50.
fn cost_matrix() -> impl Strategy<Value = Arc<CostMatrix>> {
    (1usize..=5, 1usize..=8).prop_flat_map(|(workers, tasks)| {
        prop::collection::vec(
            prop::collection::vec((0u32..50).prop_map(f64::from), tasks),
            workers,
        )
        .prop_map(|rows| Arc::new(CostMatrix::new(rows).expect("generated rows are rectangular")))
    })
}

fn assert_complete(c: &AssignmentCandidate) {
    let tasks: Vec<usize> = c.allocations().iter().map(Allocation::task).collect();
    assert_eq!(tasks, (0..c.matrix().task_count()).collect::<Vec<_>>());
    c.validate().unwrap();
}

proptest! {
    #[test]
    fn test_allocation_cost_round_trips(matrix in cost_matrix()) {
        for worker in 0..matrix.worker_count() {
            for task in 0..matrix.task_count() {
                let alloc = Allocation::new(task, worker, &matrix).unwrap();
                prop_assert_eq!(alloc.cost(), matrix.cost(worker, task));
            }
        }
    }

    #[test]
    fn test_seeded_candidates_are_complete(matrix in cost_matrix(), seed in any::<u64>(), size in 2usize..12) {
        let seeder = PopulationSeeder::new(matrix);
        let mut rng = create_rng(seed);
        let population = seeder.seed_population(size, true, &mut rng).unwrap();
        prop_assert_eq!(population.len(), size);
        for c in &population {
            assert_complete(c);
        }
    }

    #[test]
    fn test_fitness_is_inverse_of_max_load(matrix in cost_matrix(), seed in any::<u64>()) {
        let seeder = PopulationSeeder::new(matrix.clone());
        let mut rng = create_rng(seed);
        let c = seeder.random_candidate(&mut rng).unwrap();

        let mut loads = vec![0.0; matrix.worker_count()];
        for (task, &worker) in c.workers().iter().enumerate() {
            loads[worker] += matrix.cost(worker, task);
        }
        let max = loads.iter().copied().fold(0.0, f64::max);
        if max > 0.0 {
            prop_assert!((c.fitness() - 1.0 / max).abs() < 1e-12);
        } else {
            prop_assert_eq!(c.fitness(), f64::INFINITY);
        }
    }

    #[test]
    fn test_recombine_takes_workers_from_parents(matrix in cost_matrix(), seed in any::<u64>()) {
        let seeder = PopulationSeeder::new(matrix);
        let mut rng = create_rng(seed);
        let a = seeder.random_candidate(&mut rng).unwrap();
        let b = seeder.random_candidate(&mut rng).unwrap();

        let child = a.recombine(&b, &mut rng).unwrap();
        assert_complete(&child);
        let (wa, wb, wc) = (a.workers(), b.workers(), child.workers());
        for task in 0..wc.len() {
            prop_assert!(wc[task] == wa[task] || wc[task] == wb[task]);
        }
    }

    #[test]
    fn test_mutate_swaps_two_workers(matrix in cost_matrix(), seed in any::<u64>()) {
        let seeder = PopulationSeeder::new(matrix.clone());
        let mut rng = create_rng(seed);
        let mut c = seeder.random_candidate(&mut rng).unwrap();
        let before = c.workers();

        c.mutate(&mut rng).unwrap();
        assert_complete(&c);
        let after = c.workers();

        let changed: Vec<usize> = (0..before.len()).filter(|&t| before[t] != after[t]).collect();
        prop_assert!(changed.is_empty() || changed.len() == 2);
        if let &[i, j] = changed.as_slice() {
            prop_assert_eq!(after[i], before[j]);
            prop_assert_eq!(after[j], before[i]);
        }
        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort_unstable();
        sorted_after.sort_unstable();
        prop_assert_eq!(sorted_before, sorted_after);

        for alloc in c.allocations() {
            prop_assert_eq!(alloc.cost(), matrix.cost(alloc.worker(), alloc.task()));
        }
    }

    #[test]
    fn test_uda_picks_cheapest_lowest_index(matrix in cost_matrix()) {
        let uda = PopulationSeeder::new(matrix.clone()).user_directed_assignment().unwrap();
        for (task, &worker) in uda.workers().iter().enumerate() {
            let chosen = matrix.cost(worker, task);
            for other in 0..matrix.worker_count() {
                let cost = matrix.cost(other, task);
                prop_assert!(chosen <= cost);
                if other < worker {
                    prop_assert!(cost > chosen);
                }
            }
        }
    }

    #[test]
    fn test_olb_is_round_robin(matrix in cost_matrix()) {
        let olb = PopulationSeeder::new(matrix.clone()).opportunistic_load_balancing().unwrap();
        for (task, &worker) in olb.workers().iter().enumerate() {
            prop_assert_eq!(worker, task % matrix.worker_count());
        }
    }
}
