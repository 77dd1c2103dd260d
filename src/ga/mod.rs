//! Evolution engine contract and default Genetic Algorithm.
//!
//! The search is split along a narrow seam: a candidate representation
//! implements [`Chromosome`], and an engine implements [`EvolutionEngine`].
//! Either side can be replaced without touching the other.
//!
//! # Core Traits
//!
//! - [`Chromosome`]: what an engine may call on a candidate
//!   (`fitness`, `recombine`, `mutate`)
//! - [`EvolutionEngine`]: what an engine provides back (`evolve`, `best_fit`)
//!
//! # Key Types
//!
//! - [`GaEngine`]: Generational GA with elitism
//! - [`GaConfig`]: Engine parameters (selection, elitism, operator rates)
//! - [`Selection`]: Tournament, roulette, and rank parent selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod engine;
mod selection;
mod types;

pub use config::GaConfig;
pub use engine::GaEngine;
pub use selection::Selection;
pub use types::{Chromosome, EvolutionEngine};
