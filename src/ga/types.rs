//! Core trait definitions for the evolution engine contract.
//!
//! The two traits, [`Chromosome`] and [`EvolutionEngine`], are the whole
//! interface between an engine and a candidate representation. An engine
//! may call only the three [`Chromosome`] operators; a driver may ask the
//! engine only to evolve and to report its fittest members.

use rand::Rng;
use std::cmp::Ordering;

/// A candidate solution the engine can score, recombine, and perturb.
///
/// Fitness follows the **higher is better** convention. Positive infinity
/// is a legal value meaning "cannot be improved".
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Bits(Vec<bool>);
///
/// impl Chromosome for Bits {
///     type Error = std::convert::Infallible;
///     fn fitness(&self) -> f64 { self.0.iter().filter(|&&b| b).count() as f64 }
///     fn recombine<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<Self, Self::Error> {
///         Ok(Bits(self.0.iter().zip(&other.0)
///             .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
///             .collect()))
///     }
///     fn mutate<R: Rng>(&mut self, rng: &mut R) -> Result<(), Self::Error> {
///         let i = rng.random_range(0..self.0.len());
///         self.0[i] = !self.0[i];
///         Ok(())
///     }
/// }
/// ```
pub trait Chromosome: Clone + Send + Sync {
    /// Error raised by a failing operator. Engines propagate it unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Scores this candidate. Higher is better.
    fn fitness(&self) -> f64;

    /// Produces a new child from `self` and `other`. Neither parent changes.
    fn recombine<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<Self, Self::Error>;

    /// Perturbs this candidate in place.
    fn mutate<R: Rng>(&mut self, rng: &mut R) -> Result<(), Self::Error>;
}

/// A population-based search over [`Chromosome`]s.
///
/// Selection pressure and replacement policy are entirely up to the
/// implementation. The only requirements are that [`evolve`](Self::evolve)
/// advances one generation using the `Chromosome` operators, and that
/// [`best_fit`](Self::best_fit) ranks members by `fitness()` alone.
pub trait EvolutionEngine<C: Chromosome> {
    /// Advances the population by one generation.
    fn evolve<R: Rng>(&mut self, rng: &mut R) -> Result<(), C::Error>;

    /// Current members in descending fitness order.
    fn best_fit(&self) -> Vec<&C>;

    /// The single fittest member, if the population is non-empty.
    fn fittest(&self) -> Option<&C> {
        self.best_fit().into_iter().next()
    }
}

/// Orders two fitness values so that the better one sorts first.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
