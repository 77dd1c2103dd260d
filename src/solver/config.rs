//! Solver configuration.
//!
//! [`SolverConfig`] holds every knob of a best-of-restarts solve. Each
//! count trades time for quality independently: `population_size` and
//! `generations_per_run` widen and deepen one run, while `num_restarts`
//! adds independent runs at linear cost.

use crate::error::{AssignError, AssignResult};
use crate::ga::GaConfig;
use crate::seeder::HEURISTIC_SEEDS;

/// Configuration for [`Solver`](super::Solver).
///
/// # Defaults
///
/// ```
/// use u_assign::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.num_restarts, 10);
/// assert!(config.include_heuristics);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_population_size(40)
///     .with_generations_per_run(60)
///     .with_num_restarts(4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Candidates per restart.
    pub population_size: usize,

    /// Whether each population starts with the OLB and UDA candidates.
    pub include_heuristics: bool,

    /// Generations the engine evolves in each restart.
    pub generations_per_run: usize,

    /// Independent restarts, each from a freshly seeded population.
    pub num_restarts: usize,

    /// Master seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Whether restarts run concurrently on rayon's thread pool.
    ///
    /// Has no effect without the `parallel` cargo feature.
    pub parallel: bool,

    /// Parameters of the default GA engine.
    pub ga: GaConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            include_heuristics: true,
            generations_per_run: 100,
            num_restarts: 10,
            seed: None,
            parallel: true,
            ga: GaConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Includes or omits the heuristic seeds.
    pub fn with_heuristics(mut self, include: bool) -> Self {
        self.include_heuristics = include;
        self
    }

    /// Sets the generations per restart.
    pub fn with_generations_per_run(mut self, n: usize) -> Self {
        self.generations_per_run = n;
        self
    }

    /// Sets the number of restarts.
    pub fn with_num_restarts(mut self, n: usize) -> Self {
        self.num_restarts = n;
        self
    }

    /// Sets the master seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel restarts and parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self.ga.parallel = parallel;
        self
    }

    /// Replaces the GA engine parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Preset for quick answers on small matrices.
    ///
    /// - Population: 50, Generations: 50, Restarts: 5
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            generations_per_run: 50,
            num_restarts: 5,
            ..Self::default()
        }
    }

    /// Preset balancing quality and run time.
    ///
    /// - Population: 100, Generations: 200, Restarts: 10
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            generations_per_run: 200,
            num_restarts: 10,
            ..Self::default()
        }
    }

    /// Preset for the best attainable makespan.
    ///
    /// - Population: 200, Generations: 500, Restarts: 20
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            generations_per_run: 500,
            num_restarts: 20,
            ..Self::default()
        }
    }

    /// Picks a preset from the number of tasks.
    ///
    /// - `task_count < 20` → [`fast()`](Self::fast)
    /// - `20 ≤ task_count < 100` → [`balanced()`](Self::balanced)
    /// - `task_count ≥ 100` → [`quality()`](Self::quality)
    pub fn auto_select(task_count: usize) -> Self {
        if task_count < 20 {
            Self::fast()
        } else if task_count < 100 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`AssignError::Value`] if any count is zero, the population cannot
    /// hold the heuristic seeds, or the GA parameters are invalid.
    pub fn validate(&self) -> AssignResult<()> {
        if self.population_size == 0 {
            return Err(AssignError::Value(
                "population_size must be at least 1".into(),
            ));
        }
        if self.include_heuristics && self.population_size < HEURISTIC_SEEDS {
            return Err(AssignError::Value(format!(
                "population_size must be at least {HEURISTIC_SEEDS} when heuristics are included"
            )));
        }
        if self.generations_per_run == 0 {
            return Err(AssignError::Value(
                "generations_per_run must be at least 1".into(),
            ));
        }
        if self.num_restarts == 0 {
            return Err(AssignError::Value("num_restarts must be at least 1".into()));
        }
        self.ga.validate()
    }
}
