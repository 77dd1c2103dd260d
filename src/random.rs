//! Seedable random sources.
//!
//! Every stochastic operation in this crate takes an explicit `&mut R: Rng`.
//! These helpers build the concrete generator used by the solver and by
//! tests that need reproducible sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from `seed`, or from OS entropy when `seed` is `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Draws `count` independent child seeds from `rng`.
///
/// Used to give each restart its own stream before any restart runs, so the
/// outcome does not depend on execution order.
pub fn split_seeds<R: Rng>(rng: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.random()).collect()
}
