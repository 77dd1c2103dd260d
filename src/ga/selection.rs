//! Selection strategies for the GA engine.
//!
//! Selection determines which members are chosen as parents. Strategies
//! work on a slice of fitness values and return an index into it.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::descending;
use rand::Rng;
use std::cmp::Ordering;

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better).
/// Infinite fitness is treated as strictly better than any finite value.
///
/// # Examples
///
/// ```
/// use u_assign::ga::Selection;
///
/// let mut rng = u_assign::random::create_rng(1);
/// let fitness = [0.1, 0.5, 0.2];
/// let idx = Selection::Tournament(3).select(&fitness, &mut rng);
/// assert!(idx < fitness.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` members at random, keep the fittest.
    ///
    /// Higher `k` = stronger selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are shifted so the least fit member keeps a small nonzero
    /// chance. When any member has infinite fitness, only those members
    /// are eligible.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Linear rank selection: the fittest member gets weight `n`, the
    /// least fit gets weight 1.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection through [`select`](Selection::select),
    /// O(n) through [`select_sorted`](Selection::select_sorted)
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from `fitness`.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(fitness, *k, rng),
            Selection::Roulette => roulette(fitness, rng),
            Selection::Rank => rank(fitness, rng),
        }
    }

    /// Selects a parent index from `fitness` already sorted best first.
    ///
    /// Rank selection then reads ranks off positions instead of sorting.
    /// The other strategies behave exactly as in [`select`](Self::select).
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select_sorted<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");
        debug_assert!(
            fitness
                .windows(2)
                .all(|w| descending(w[0], w[1]) != Ordering::Greater),
            "fitness must be sorted best first"
        );

        match self {
            Selection::Tournament(k) => tournament(fitness, *k, rng),
            Selection::Roulette => roulette(fitness, rng),
            Selection::Rank => rank_position(fitness.len(), rng),
        }
    }
}

fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel over `fitness_i - min_fitness + epsilon`.
fn roulette<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let perfect: Vec<usize> = (0..n).filter(|&i| fitness[i] == f64::INFINITY).collect();
    if !perfect.is_empty() {
        return perfect[rng.random_range(0..perfect.len())];
    }

    let min_fitness = fitness.iter().copied().fold(f64::INFINITY, f64::min);
    let epsilon = 1e-10;

    let weights: Vec<f64> = fitness
        .iter()
        .map(|&f| (f - min_fitness + epsilon).max(epsilon))
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

fn rank<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| descending(fitness[a], fitness[b]));
    order[rank_position(n, rng)]
}

/// Draws a position in a best-first ordering, position `p` weighted `n - p`.
fn rank_position<R: Rng>(n: usize, rng: &mut R) -> usize {
    if n == 1 {
        return 0;
    }

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for position in 0..n {
        cumulative += (n - position) as f64;
        if cumulative > threshold {
            return position;
        }
    }

    n - 1
}
