//! GA engine configuration.
//!
//! [`GaConfig`] holds the parameters of one generational step. Population
//! size and the number of generations belong to the solver, which seeds the
//! population and decides how often to call `evolve`.

use super::selection::Selection;
use crate::error::{AssignError, AssignResult};

/// Configuration for [`GaEngine`](super::GaEngine).
///
/// # Defaults
///
/// ```
/// use u_assign::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.selection, Selection::Tournament(3));
/// assert!(config.parallel);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_selection(Selection::Rank)
///     .with_elite_ratio(0.2)
///     .with_mutation_rate(0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Fraction of the population copied unchanged into the next generation
    /// (0.0–1.0). Any elite keeps the best fitness from ever decreasing.
    pub elite_ratio: f64,

    /// Probability of recombining a selected pair (0.0–1.0).
    ///
    /// When recombination is skipped, the child is a clone of the first
    /// parent.
    pub crossover_rate: f64,

    /// Probability of mutating each child (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether offspring are scored in parallel using rayon.
    ///
    /// Has no effect without the `parallel` cargo feature.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            parallel: true,
        }
    }
}

impl GaConfig {
    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection of size `k`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of elites kept for a population of `population_size`.
    ///
    /// Always leaves room for at least one offspring.
    pub fn elite_count(&self, population_size: usize) -> usize {
        let count = (population_size as f64 * self.elite_ratio) as usize;
        count.min(population_size.saturating_sub(1))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`AssignError::Value`] if a rate lies outside 0.0–1.0 or the
    /// tournament size is zero.
    pub fn validate(&self) -> AssignResult<()> {
        for (name, rate) in [
            ("elite_ratio", self.elite_ratio),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AssignError::Value(format!(
                    "{name} must be within 0.0..=1.0, got {rate}"
                )));
            }
        }
        if self.selection == Selection::Tournament(0) {
            return Err(AssignError::Value(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
