//! GA evolutionary loop execution.
//!
//! [`GaEngine`] is the generation-by-generation state machine:
//! INIT → EVALUATING → (termination check) → SELECTING/BREEDING → EVALUATING …
//! until a termination condition holds. [`GaRunner`] drives an engine to
//! completion.

use super::config::GaConfig;
use super::convergence::ConvergenceTracker;
use super::fitness::{FitnessEvaluator, GenerationSummary};
use super::operators::{maybe_mutate, recombine, Crossover, CrossoverOperator, Mutation, MutationOperator};
use super::population::PopulationFactory;
use super::problem::TourProblem;
use super::selection::{SelectionStrategy, Tournament};
use super::types::{CityId, Tour};
use crate::distance::DistanceOracle;
use crate::error::GaError;
use crate::random::rng_from;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// `max_generations` generations were evaluated.
    MaxGenerations,
    /// Best fitness was unchanged for the whole stagnation window.
    Stagnation,
    /// A cancellation flag was observed at a generation boundary.
    Cancelled,
    /// Fewer than two customers: the only possible tour was found.
    Exhausted,
}

/// Statistics of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    pub best_fitness: f64,
    pub avg_fitness: f64,
    /// Distance of this generation's fittest tour.
    pub best_distance: f64,
    /// Best distance seen so far in the run.
    pub best_ever_distance: f64,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaResult {
    /// The best tour found, depot at both ends.
    pub best_tour: Vec<CityId>,

    /// Travel distance of `best_tour`.
    pub best_distance: f64,

    /// Fitness of `best_tour`.
    pub best_fitness: f64,

    /// Best-of-generation fitness, one entry per generation.
    pub best_fitness_history: Vec<f64>,

    /// Average fitness, one entry per generation.
    pub avg_fitness_history: Vec<f64>,

    /// Best-ever distance after each generation (non-increasing).
    pub best_distance_history: Vec<f64>,

    /// Number of generations evaluated.
    pub generations_completed: usize,

    /// Why the run stopped.
    pub termination: Termination,
}

/// Step-wise GA over a [`TourProblem`].
///
/// Construction performs INIT and evaluates the first generation; each
/// [`step`](Self::step) breeds and evaluates one more. Between steps the
/// engine is at a generation boundary: the population is fully evaluated,
/// statistics are up to date, and stopping is always safe.
///
/// The operator type parameters default to the built-in bundle; use
/// [`with_operators`](GaEngine::with_operators) to plug in others.
pub struct GaEngine<'a, D, S = Tournament, C = Crossover, M = Mutation> {
    problem: &'a TourProblem<D>,
    config: GaConfig,
    selection: S,
    crossover: C,
    mutation: M,
    rng: StdRng,
    population: Vec<Tour>,
    champion: Tour,
    tracker: ConvergenceTracker,
    last: GenerationStats,
    termination: Option<Termination>,
}

impl<'a, D: DistanceOracle> GaEngine<'a, D> {
    /// Creates an engine with the operators named by `config.variant`.
    ///
    /// # Errors
    /// Returns the first configuration error found by [`GaConfig::validate`].
    pub fn new(problem: &'a TourProblem<D>, config: &GaConfig) -> Result<Self, GaError> {
        Self::with_operators(
            problem,
            config,
            Tournament::new(config.tournament_size),
            config.variant.crossover(),
            Mutation::Swap,
        )
    }
}

impl<'a, D, S, C, M> GaEngine<'a, D, S, C, M>
where
    D: DistanceOracle,
    S: SelectionStrategy,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Creates an engine with explicit operators.
    ///
    /// `config.tournament_size` and `config.variant` are still validated
    /// but otherwise unused here.
    pub fn with_operators(
        problem: &'a TourProblem<D>,
        config: &GaConfig,
        selection: S,
        crossover: C,
        mutation: M,
    ) -> Result<Self, GaError> {
        config.validate()?;

        let mut rng = rng_from(config.seed);
        let factory = PopulationFactory::new(problem.depot(), problem.customers());
        let mut population = factory.create_population(config.population_size, &mut rng);

        let summary = evaluator(problem).evaluate_population(&mut population, config.parallel);
        let champion = population[summary.best_index].clone();

        let mut engine = Self {
            problem,
            config: config.clone(),
            selection,
            crossover,
            mutation,
            rng,
            population,
            last: stats(1, &summary, champion.distance()),
            champion,
            tracker: ConvergenceTracker::new(config.stagnation_window, config.min_generations),
            termination: None,
        };
        engine
            .tracker
            .record(summary.best_fitness, summary.avg_fitness, engine.champion.distance());
        engine.after_evaluation();
        Ok(engine)
    }

    /// Breeds and evaluates the next generation.
    ///
    /// Returns `None` without doing anything once the engine has terminated.
    pub fn step(&mut self) -> Option<GenerationStats> {
        if self.termination.is_some() {
            return None;
        }

        self.breed();
        let summary =
            evaluator(self.problem).evaluate_population(&mut self.population, self.config.parallel);

        // Strictly better only: the champion is never swapped for an equal tour.
        if summary.best_fitness > self.champion.fitness() {
            self.champion = self.population[summary.best_index].clone();
        }
        self.tracker
            .record(summary.best_fitness, summary.avg_fitness, self.champion.distance());
        self.last = stats(self.tracker.generations(), &summary, self.champion.distance());
        self.after_evaluation();
        Some(self.last)
    }

    /// Stops the engine at the current generation boundary.
    pub fn cancel(&mut self) {
        if self.termination.is_none() {
            self.termination = Some(Termination::Cancelled);
            tracing::info!(generation = self.generation(), "GA cancelled");
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Number of generations evaluated so far (at least 1).
    pub fn generation(&self) -> usize {
        self.tracker.generations()
    }

    /// Statistics of the most recently evaluated generation.
    pub fn last_stats(&self) -> &GenerationStats {
        &self.last
    }

    /// The current, fully evaluated population.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Best tour seen so far.
    pub fn best(&self) -> &Tour {
        &self.champion
    }

    pub fn tracker(&self) -> &ConvergenceTracker {
        &self.tracker
    }

    /// Finishes the run and returns its result.
    ///
    /// An engine that has not terminated yet reports
    /// [`Termination::Cancelled`].
    pub fn into_result(self) -> GaResult {
        let generations_completed = self.tracker.generations();
        let (best_fitness_history, avg_fitness_history, best_distance_history) =
            self.tracker.into_histories();
        GaResult {
            best_distance: self.champion.distance(),
            best_fitness: self.champion.fitness(),
            best_tour: self.champion.into_cities(),
            best_fitness_history,
            avg_fitness_history,
            best_distance_history,
            generations_completed,
            termination: self.termination.unwrap_or(Termination::Cancelled),
        }
    }

    /// Logs the evaluated generation and decides whether to stop before breeding.
    fn after_evaluation(&mut self) {
        tracing::debug!(
            generation = self.last.generation,
            best_distance = self.last.best_distance,
            best_ever_distance = self.last.best_ever_distance,
            avg_fitness = self.last.avg_fitness,
            "generation evaluated"
        );

        let reason = if self.problem.is_trivial() {
            Some(Termination::Exhausted)
        } else if self.tracker.is_stagnant() {
            Some(Termination::Stagnation)
        } else if self.tracker.generations() >= self.config.max_generations {
            Some(Termination::MaxGenerations)
        } else {
            None
        };

        if let Some(reason) = reason {
            tracing::info!(
                ?reason,
                generations = self.tracker.generations(),
                best_distance = self.champion.distance(),
                "GA terminated"
            );
            self.termination = Some(reason);
        }
    }

    /// Replaces the population: elites first, then offspring until full.
    fn breed(&mut self) {
        let size = self.config.population_size;
        let mut next: Vec<Tour> = Vec::with_capacity(size);

        // Stable sort: equal fitness keeps population order.
        let mut ranked: Vec<usize> = (0..self.population.len()).collect();
        ranked.sort_by(|&a, &b| {
            self.population[b]
                .fitness()
                .partial_cmp(&self.population[a].fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        next.extend(
            ranked[..self.config.elitism_count]
                .iter()
                .map(|&i| self.population[i].clone()),
        );

        while next.len() < size {
            let p1 = self.selection.select(&self.population, &mut self.rng);
            let p2 = self.selection.select(&self.population, &mut self.rng);

            let children = recombine(
                &self.crossover,
                &self.population[p1],
                &self.population[p2],
                self.config.crossover_rate,
                &mut self.rng,
            );

            for mut child in children {
                if next.len() >= size {
                    break;
                }
                maybe_mutate(&self.mutation, &mut child, self.config.mutation_rate, &mut self.rng);
                next.push(child);
            }
        }

        self.population = next;
    }
}

fn evaluator<D: DistanceOracle>(problem: &TourProblem<D>) -> FitnessEvaluator<'_, D> {
    FitnessEvaluator::new(problem.oracle())
}

fn stats(generation: usize, summary: &GenerationSummary, best_ever_distance: f64) -> GenerationStats {
    GenerationStats {
        generation,
        best_fitness: summary.best_fitness,
        avg_fitness: summary.avg_fitness,
        best_distance: summary.best_distance,
        best_ever_distance,
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = TourProblem::new(0, customers, matrix)?;
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best distance: {}", result.best_distance);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA to completion.
    ///
    /// # Errors
    /// Returns a [`GaError`] if the configuration is invalid.
    pub fn run<D: DistanceOracle>(problem: &TourProblem<D>, config: &GaConfig) -> Result<GaResult, GaError> {
        Self::run_inner(problem, config, None, |_| {})
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag becomes `true`, the GA stops at
    /// the next generation boundary and returns the best tour found so far.
    pub fn run_with_cancel<D: DistanceOracle>(
        problem: &TourProblem<D>,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, GaError> {
        Self::run_inner(problem, config, cancel, |_| {})
    }

    /// Runs the GA, calling `observer` after every evaluated generation
    /// (including the first).
    pub fn run_with_observer<D, F>(
        problem: &TourProblem<D>,
        config: &GaConfig,
        observer: F,
    ) -> Result<GaResult, GaError>
    where
        D: DistanceOracle,
        F: FnMut(&GenerationStats),
    {
        Self::run_inner(problem, config, None, observer)
    }

    fn run_inner<D, F>(
        problem: &TourProblem<D>,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<GaResult, GaError>
    where
        D: DistanceOracle,
        F: FnMut(&GenerationStats),
    {
        let _span = tracing::info_span!(
            "ga_run",
            customers = problem.customers().len(),
            population_size = config.population_size,
            variant = ?config.variant,
        )
        .entered();
        tracing::info!(max_generations = config.max_generations, seed = ?config.seed, "GA started");

        let mut engine = GaEngine::new(problem, config)?;
        observer(engine.last_stats());

        while !engine.is_terminated() {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                engine.cancel();
                break;
            }
            if let Some(stats) = engine.step() {
                observer(&stats);
            }
        }

        Ok(engine.into_result())
    }
}

// ============================================================================
// Tests
// ============================================================================
