//! Parent selection.
//!
//! Selection picks parents from an evaluated population. Every call is an
//! independent draw, so the same tour may be chosen as both parents.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Tour;
use rand::seq::index;
use rand::Rng;

/// Chooses one parent index from an evaluated population.
pub trait SelectionStrategy {
    /// Returns the index of the selected parent.
    ///
    /// # Panics
    /// Implementations may panic if `population` is empty.
    fn select<R: Rng + ?Sized>(&self, population: &[Tour], rng: &mut R) -> usize;
}

/// Tournament selection without replacement.
///
/// Draws `size` distinct tours uniformly at random and returns the fittest.
/// Ties go to the contestant drawn first.
///
/// - size 2-3: light pressure, keeps diversity
/// - size 4-5: moderate pressure (typical)
/// - larger: fast convergence, risk of premature convergence
///
/// # Examples
///
/// ```
/// use tour_ga::ga::{SelectionStrategy, Tournament, Tour};
/// use tour_ga::random::create_rng;
///
/// let population = vec![Tour::new(0, vec![1, 2]), Tour::new(0, vec![2, 1])];
/// let mut rng = create_rng(1);
/// let idx = Tournament::new(2).select(&population, &mut rng);
/// assert!(idx < 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    size: usize,
}

impl Tournament {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SelectionStrategy for Tournament {
    /// A tournament larger than the population degrades to the whole
    /// population; configuration validation rejects that case up front.
    fn select<R: Rng + ?Sized>(&self, population: &[Tour], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let n = population.len();
        let k = self.size.clamp(1, n);

        let mut contestants = index::sample(rng, n, k).into_iter();
        let mut best = contestants.next().unwrap_or(0);
        for idx in contestants {
            if population[idx].fitness() > population[best].fitness() {
                best = idx;
            }
        }
        best
    }
}
