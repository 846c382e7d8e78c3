//! Genetic Algorithm for depot-anchored tours.
//!
//! The engine evolves a fixed-size population of [`Tour`]s. Each generation
//! is fully evaluated before any breeding starts; breeding then assembles
//! the next population from elites plus selected, recombined and mutated
//! offspring.
//!
//! # Key Types
//!
//! - [`TourProblem`]: depot, customers and distance oracle
//! - [`GaConfig`]: validated run parameters and the operator [`Variant`]
//! - [`GaEngine`]: step-wise state machine, one generation per step
//! - [`GaRunner`]: runs an engine to completion
//! - [`GaResult`]: best tour plus per-generation statistics
//!
//! # Capability Traits
//!
//! - [`SelectionStrategy`]: [`Tournament`]
//! - [`CrossoverOperator`]: [`Crossover::Order`], [`Crossover::PairedOrder`]
//! - [`MutationOperator`]: [`Mutation::Swap`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod convergence;
mod fitness;
pub mod operators;
mod population;
mod problem;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, Variant};
pub use convergence::ConvergenceTracker;
pub use fitness::{fitness_of, FitnessEvaluator, GenerationSummary};
pub use operators::{Crossover, CrossoverOperator, Mutation, MutationOperator};
pub use population::PopulationFactory;
pub use problem::TourProblem;
pub use runner::{GaEngine, GaResult, GaRunner, GenerationStats, Termination};
pub use selection::{SelectionStrategy, Tournament};
pub use types::{CityId, Tour};
