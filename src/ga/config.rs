//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::GaError;

use super::operators::Crossover;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named operator bundles.
///
/// Both variants use tournament selection and swap mutation applied once
/// per offspring; they differ in how crossover builds offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    /// One child per crossover ([`Crossover::Order`], cyclic fill).
    Classic,
    /// Two children per crossover ([`Crossover::PairedOrder`], linear
    /// fill); the surplus child is dropped when the population is full.
    #[default]
    Paired,
}

impl Variant {
    /// The crossover operator this variant breeds with.
    pub fn crossover(self) -> Crossover {
        match self {
            Variant::Classic => Crossover::Order,
            Variant::Paired => Crossover::PairedOrder,
        }
    }
}

/// Configuration for the tour GA.
///
/// # Defaults
///
/// ```
/// use tour_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tour_ga::ga::{GaConfig, Variant};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(4)
///     .with_elitism_count(10)
///     .with_variant(Variant::Classic)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of tours per generation. Constant for the whole run.
    pub population_size: usize,

    /// Hard upper bound on evaluated generations.
    pub max_generations: usize,

    /// Fittest tours copied unchanged into the next generation.
    pub elitism_count: usize,

    /// Contestants per tournament (drawn without replacement).
    pub tournament_size: usize,

    /// Probability of recombining a selected pair (0.0–1.0).
    ///
    /// When crossover is skipped the parents are copied.
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0), applied once per
    /// offspring, not per gene.
    pub mutation_rate: f64,

    /// Generations of identical best fitness that end the run.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_window: usize,

    /// Generations that must be evaluated before stagnation may fire.
    pub min_generations: usize,

    /// Operator bundle.
    pub variant: Variant,

    /// Whether to evaluate tours in parallel using rayon.
    ///
    /// Ignored without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            elitism_count: 5,
            tournament_size: 5,
            crossover_rate: 0.8,
            mutation_rate: 0.02,
            stagnation_window: 0,
            min_generations: 0,
            variant: Variant::Paired,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of elites carried over each generation.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate. Out-of-range values are rejected by
    /// [`validate`](Self::validate), not clamped.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate. Out-of-range values are rejected by
    /// [`validate`](Self::validate), not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the stagnation window (0 to disable).
    pub fn with_stagnation_window(mut self, window: usize) -> Self {
        self.stagnation_window = window;
        self
    }

    /// Sets the warm-up before stagnation may fire.
    pub fn with_min_generations(mut self, n: usize) -> Self {
        self.min_generations = n;
        self
    }

    /// Sets the operator variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for the single-child variant with a single elite.
    ///
    /// - Population: 50, Generations: 100, Tournament: 3
    /// - Crossover: 0.85, Mutation: 0.1, Elites: 1
    /// - Stagnation window: 10, checked once more than 21 generations
    ///   have been evaluated
    pub fn classic() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            elitism_count: 1,
            tournament_size: 3,
            crossover_rate: 0.85,
            mutation_rate: 0.1,
            stagnation_window: 10,
            min_generations: 22,
            variant: Variant::Classic,
            ..Self::default()
        }
    }

    /// Preset for the two-child variant; runs to `max_generations`.
    ///
    /// - Population: 100, Generations: 500, Tournament: 5
    /// - Crossover: 0.8, Mutation: 0.02, Elites: 5
    pub fn paired() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// Nothing is clamped: every invalid value is reported as an error.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::EmptyPopulation);
        }
        if self.max_generations == 0 {
            return Err(GaError::ZeroGenerations);
        }
        if self.elitism_count > self.population_size {
            return Err(GaError::EliteOverflow {
                elitism_count: self.elitism_count,
                population_size: self.population_size,
            });
        }
        if self.tournament_size < 2 {
            return Err(GaError::TournamentTooSmall(self.tournament_size));
        }
        if self.tournament_size > self.population_size {
            return Err(GaError::TournamentOverflow {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), GaError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GaError::RateOutOfRange { name, value })
    }
}
