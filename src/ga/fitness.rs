//! Tour evaluation.
//!
//! Fitness is the inverse of total travel distance, so ranking by fitness
//! (higher is better) is ranking by distance (lower is better). A tour of
//! zero length scores the floor value `0.0`.

use super::types::{CityId, Tour};
use crate::distance::DistanceOracle;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Converts a tour distance to fitness: `1 / distance`, or `0.0` when the
/// distance is not positive.
pub fn fitness_of(distance: f64) -> f64 {
    if distance > 0.0 {
        1.0 / distance
    } else {
        0.0
    }
}

/// Fitness distribution of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    /// Index of the fittest tour (first one on ties).
    pub best_index: usize,
    pub best_fitness: f64,
    pub best_distance: f64,
    pub avg_fitness: f64,
}

/// Scores tours against a [`DistanceOracle`].
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a, D> {
    oracle: &'a D,
}

impl<'a, D: DistanceOracle> FitnessEvaluator<'a, D> {
    pub fn new(oracle: &'a D) -> Self {
        Self { oracle }
    }

    /// Sum of `distance(route[i], route[i + 1])` over consecutive pairs,
    /// measured in travel direction.
    pub fn route_distance(&self, route: &[CityId]) -> f64 {
        route
            .windows(2)
            .map(|leg| self.oracle.distance(leg[0], leg[1]))
            .sum()
    }

    /// Fitness of a city sequence.
    pub fn fitness(&self, route: &[CityId]) -> f64 {
        fitness_of(self.route_distance(route))
    }

    /// Measures `tour` and stores distance and fitness on it.
    ///
    /// A tour without customers never leaves the depot: it is stored with
    /// distance 0 and fitness 0 and the oracle is not consulted.
    pub fn evaluate(&self, tour: &mut Tour) {
        if tour.interior().is_empty() {
            tour.set_evaluation(0.0, 0.0);
            return;
        }
        let distance = self.route_distance(tour.cities());
        tour.set_evaluation(distance, fitness_of(distance));
    }

    /// Evaluates every tour that is not already evaluated, then reduces the
    /// generation to its best and average fitness.
    ///
    /// With `parallel` (and the `parallel` feature) the evaluations run on
    /// rayon workers; the reduction only starts once all of them are done.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn evaluate_population(&self, population: &mut [Tour], parallel: bool) -> GenerationSummary {
        assert!(!population.is_empty(), "cannot evaluate an empty population");
        self.evaluate_pending(population, parallel);
        summarize(population)
    }

    #[cfg(feature = "parallel")]
    fn evaluate_pending(&self, population: &mut [Tour], parallel: bool) {
        if parallel {
            population
                .par_iter_mut()
                .filter(|tour| !tour.is_evaluated())
                .for_each(|tour| self.evaluate(tour));
        } else {
            self.evaluate_sequential(population);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_pending(&self, population: &mut [Tour], _parallel: bool) {
        self.evaluate_sequential(population);
    }

    fn evaluate_sequential(&self, population: &mut [Tour]) {
        for tour in population.iter_mut().filter(|tour| !tour.is_evaluated()) {
            self.evaluate(tour);
        }
    }
}

fn summarize(population: &[Tour]) -> GenerationSummary {
    let mut best_index = 0;
    let mut total = 0.0;
    for (i, tour) in population.iter().enumerate() {
        total += tour.fitness();
        if tour.fitness() > population[best_index].fitness() {
            best_index = i;
        }
    }
    let best = &population[best_index];
    GenerationSummary {
        best_index,
        best_fitness: best.fitness(),
        best_distance: best.distance(),
        avg_fitness: total / population.len() as f64,
    }
}
