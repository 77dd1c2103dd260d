//! Generational GA engine.
//!
//! [`GaEngine`] owns one population and advances it a generation at a time:
//! elites are carried over, parents are picked by [`Selection`], children
//! are produced through [`Chromosome::recombine`] and
//! [`Chromosome::mutate`], then scored and ranked.
//!
//! [`Selection`]: super::Selection

use super::config::GaConfig;
use super::types::{descending, Chromosome, EvolutionEngine};
use crate::error::{AssignError, AssignResult};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

/// A population member with its fitness computed once.
#[derive(Debug, Clone)]
struct Member<C> {
    candidate: C,
    fitness: f64,
}

impl<C: Chromosome> Member<C> {
    fn scored(candidate: C) -> Self {
        let fitness = candidate.fitness();
        Self { candidate, fitness }
    }
}

/// Default [`EvolutionEngine`]: generational replacement with elitism.
///
/// Members are kept sorted by descending fitness between generations, so
/// [`best_fit`](EvolutionEngine::best_fit) is a plain walk over the
/// population.
///
/// # Usage
///
/// ```ignore
/// let mut engine = GaEngine::new(population, GaConfig::default())?;
/// engine.run(100, &mut rng)?;
/// let best = engine.fittest().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GaEngine<C: Chromosome> {
    members: Vec<Member<C>>,
    config: GaConfig,
    generation: usize,
    fitness_history: Vec<f64>,
}

impl<C: Chromosome> GaEngine<C> {
    /// Scores `population` and prepares it for evolution.
    ///
    /// # Errors
    /// [`AssignError::Value`] if the population is empty or `config` is
    /// invalid.
    pub fn new(population: Vec<C>, config: GaConfig) -> AssignResult<Self> {
        config.validate()?;
        if population.is_empty() {
            return Err(AssignError::Value("population must not be empty".into()));
        }

        let mut members = score(population, config.parallel);
        sort_members(&mut members);
        let fitness_history = vec![members[0].fitness];

        Ok(Self {
            members,
            config,
            generation: 0,
            fitness_history,
        })
    }

    /// Runs `generations` consecutive [`evolve`](EvolutionEngine::evolve)
    /// steps.
    pub fn run<R: Rng>(&mut self, generations: usize, rng: &mut R) -> Result<(), C::Error> {
        for _ in 0..generations {
            self.evolve(rng)?;
        }
        Ok(())
    }

    /// Number of generations evolved so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best fitness after initialization and after each generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Fitness of the current best member.
    pub fn best_fitness(&self) -> f64 {
        self.members[0].fitness
    }

    /// Population size.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; an engine cannot be built over an empty population.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

impl<C: Chromosome> EvolutionEngine<C> for GaEngine<C> {
    fn evolve<R: Rng>(&mut self, rng: &mut R) -> Result<(), C::Error> {
        let n = self.members.len();
        let elite_count = self.config.elite_count(n);
        let fitness: Vec<f64> = self.members.iter().map(|m| m.fitness).collect();

        let mut offspring = Vec::with_capacity(n - elite_count);
        while offspring.len() < n - elite_count {
            let p1 = self.config.selection.select_sorted(&fitness, rng);
            let p2 = self.config.selection.select_sorted(&fitness, rng);

            let mut child = if rng.random_range(0.0..1.0) < self.config.crossover_rate {
                self.members[p1]
                    .candidate
                    .recombine(&self.members[p2].candidate, rng)?
            } else {
                self.members[p1].candidate.clone()
            };

            if rng.random_range(0.0..1.0) < self.config.mutation_rate {
                child.mutate(rng)?;
            }

            offspring.push(child);
        }

        let mut next_gen: Vec<Member<C>> = self.members[..elite_count].to_vec();
        next_gen.extend(score(offspring, self.config.parallel));
        sort_members(&mut next_gen);

        self.members = next_gen;
        self.generation += 1;
        let best = self.members[0].fitness;
        self.fitness_history.push(best);
        trace!(generation = self.generation, best_fitness = best, "generation evolved");
        Ok(())
    }

    fn best_fit(&self) -> Vec<&C> {
        self.members.iter().map(|m| &m.candidate).collect()
    }
}

/// Stable sort, best first. Elites stay ahead of equally fit offspring.
fn sort_members<C>(members: &mut [Member<C>]) {
    members.sort_by(|a, b| descending(a.fitness, b.fitness));
}

#[cfg(feature = "parallel")]
fn score<C: Chromosome>(candidates: Vec<C>, parallel: bool) -> Vec<Member<C>> {
    if parallel {
        candidates.into_par_iter().map(Member::scored).collect()
    } else {
        candidates.into_iter().map(Member::scored).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn score<C: Chromosome>(candidates: Vec<C>, _parallel: bool) -> Vec<Member<C>> {
    candidates.into_iter().map(Member::scored).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::random::create_rng;
    use std::convert::Infallible;

    // ---- OneMax: maximize the number of set bits ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
    }

    impl BitString {
        fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
            Self {
                bits: (0..n).map(|_| rng.random_bool(0.5)).collect(),
            }
        }
    }

    impl Chromosome for BitString {
        type Error = Infallible;

        fn fitness(&self) -> f64 {
            self.bits.iter().filter(|&&b| b).count() as f64
        }

        fn recombine<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<Self, Infallible> {
            let bits = self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
                .collect();
            Ok(Self { bits })
        }

        fn mutate<R: Rng>(&mut self, rng: &mut R) -> Result<(), Infallible> {
            let idx = rng.random_range(0..self.bits.len());
            self.bits[idx] = !self.bits[idx];
            Ok(())
        }
    }

    fn onemax_population(size: usize, n: usize, seed: u64) -> Vec<BitString> {
        let mut rng = create_rng(seed);
        (0..size).map(|_| BitString::random(n, &mut rng)).collect()
    }

    #[test]
    fn test_onemax_convergence() {
        let config = GaConfig::default()
            .with_mutation_rate(0.3)
            .with_parallel(false);
        let mut engine = GaEngine::new(onemax_population(50, 20, 1), config).unwrap();
        let mut rng = create_rng(42);
        engine.run(200, &mut rng).unwrap();

        assert!(
            engine.best_fitness() >= 15.0,
            "expected fitness >= 15 for 20-bit OneMax, got {}",
            engine.best_fitness()
        );
        assert_eq!(engine.generation(), 200);
    }

    #[test]
    fn test_best_fit_is_descending() {
        let mut engine =
            GaEngine::new(onemax_population(30, 16, 2), GaConfig::default()).unwrap();
        let mut rng = create_rng(7);
        engine.run(5, &mut rng).unwrap();

        let ranked = engine.best_fit();
        assert_eq!(ranked.len(), 30);
        for pair in ranked.windows(2) {
            assert!(pair[0].fitness() >= pair[1].fitness());
        }
        assert_eq!(engine.fittest().unwrap().fitness(), engine.best_fitness());
    }

    #[test]
    fn test_elite_preservation() {
        let config = GaConfig::default()
            .with_elite_ratio(0.2)
            .with_parallel(false);
        let mut engine = GaEngine::new(onemax_population(20, 10, 3), config).unwrap();
        let mut rng = create_rng(42);
        engine.run(50, &mut rng).unwrap();

        for window in engine.fitness_history().windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness dropped with elitism: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_fitness_history_length() {
        let mut engine =
            GaEngine::new(onemax_population(20, 10, 4), GaConfig::default()).unwrap();
        let mut rng = create_rng(42);
        engine.run(30, &mut rng).unwrap();
        assert_eq!(engine.fitness_history().len(), 31);
    }

    #[test]
    fn test_population_size_is_stable() {
        for ratio in [0.0, 0.1, 0.5, 1.0] {
            let config = GaConfig::default().with_elite_ratio(ratio);
            let mut engine = GaEngine::new(onemax_population(11, 8, 5), config).unwrap();
            let mut rng = create_rng(9);
            engine.run(3, &mut rng).unwrap();
            assert_eq!(engine.len(), 11);
        }
    }

    #[test]
    fn test_all_selection_strategies() {
        for selection in [
            Selection::Tournament(3),
            Selection::Roulette,
            Selection::Rank,
        ] {
            let config = GaConfig::default()
                .with_selection(selection)
                .with_parallel(false);
            let mut engine = GaEngine::new(onemax_population(30, 10, 6), config).unwrap();
            let initial = engine.best_fitness();
            let mut rng = create_rng(42);
            engine.run(50, &mut rng).unwrap();

            assert!(
                engine.best_fitness() >= initial,
                "selection {selection:?} lost ground: {} < {initial}",
                engine.best_fitness()
            );
        }
    }

    #[test]
    fn test_same_rng_same_outcome() {
        let run = || {
            let mut engine =
                GaEngine::new(onemax_population(20, 12, 8), GaConfig::default()).unwrap();
            let mut rng = create_rng(11);
            engine.run(20, &mut rng).unwrap();
            engine.fitness_history().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_empty_population_rejected() {
        let err = GaEngine::<BitString>::new(vec![], GaConfig::default()).unwrap_err();
        assert!(matches!(err, AssignError::Value(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GaConfig::default().with_tournament_size(0);
        assert!(GaEngine::new(onemax_population(4, 4, 1), config).is_err());
    }

    // ---- Operator errors propagate unchanged ----

    #[derive(Clone, Debug)]
    struct Faulty;

    impl Chromosome for Faulty {
        type Error = AssignError;

        fn fitness(&self) -> f64 {
            1.0
        }

        fn recombine<R: Rng>(&self, _other: &Self, _rng: &mut R) -> AssignResult<Self> {
            Err(AssignError::InvariantViolation("broken operator".into()))
        }

        fn mutate<R: Rng>(&mut self, _rng: &mut R) -> AssignResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_operator_error_propagates() {
        let config = GaConfig::default().with_crossover_rate(1.0);
        let mut engine = GaEngine::new(vec![Faulty, Faulty, Faulty], config).unwrap();
        let mut rng = create_rng(1);
        let err = engine.evolve(&mut rng).unwrap_err();
        assert_eq!(err, AssignError::InvariantViolation("broken operator".into()));
        assert_eq!(engine.generation(), 0);
    }
}
