//! Tour representation.
//!
//! A [`Tour`] is the GA individual: `[depot, c_1, ..., c_k, depot]` where
//! the interior is a permutation of the customer set. Operators only ever
//! touch the interior, so the depot stays pinned at both ends.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// City identifier. The depot is conventionally `0`.
pub type CityId = usize;

/// A candidate tour together with its most recent evaluation.
///
/// Unevaluated tours report `distance() == f64::INFINITY` and
/// `fitness() == 0.0`. Any mutable access to the interior clears the
/// evaluation, so a stale fitness can never survive a modification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour {
    cities: Vec<CityId>,
    distance: f64,
    fitness: f64,
}

impl Tour {
    /// Builds `[depot] + interior + [depot]`.
    pub fn new(depot: CityId, interior: Vec<CityId>) -> Self {
        let mut cities = Vec::with_capacity(interior.len() + 2);
        cities.push(depot);
        cities.extend(interior);
        cities.push(depot);
        Self {
            cities,
            distance: f64::INFINITY,
            fitness: 0.0,
        }
    }

    /// Full city sequence, depot included at both ends.
    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    /// Consumes the tour, returning the full city sequence.
    pub fn into_cities(self) -> Vec<CityId> {
        self.cities
    }

    /// The depot this tour starts and ends at.
    pub fn depot(&self) -> CityId {
        self.cities[0]
    }

    /// Customers in visiting order (depot excluded).
    pub fn interior(&self) -> &[CityId] {
        let n = self.cities.len();
        &self.cities[1..n - 1]
    }

    /// Mutable interior. Clears the cached evaluation.
    pub fn interior_mut(&mut self) -> &mut [CityId] {
        self.distance = f64::INFINITY;
        self.fitness = 0.0;
        let n = self.cities.len();
        &mut self.cities[1..n - 1]
    }

    /// Number of cities in the sequence, both depot visits included.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// A tour always holds at least the two depot visits.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Total travel distance from the last evaluation.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Fitness from the last evaluation (higher is better).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Whether the tour has been evaluated since it was last modified.
    pub fn is_evaluated(&self) -> bool {
        self.distance.is_finite()
    }

    pub(crate) fn set_evaluation(&mut self, distance: f64, fitness: f64) {
        self.distance = distance;
        self.fitness = fitness;
    }

    /// Checks the depot and permutation invariants against a customer set.
    ///
    /// Returns `true` iff both ends equal `depot` and the interior contains
    /// every customer exactly once and nothing else.
    pub fn is_valid_for(&self, depot: CityId, customers: &[CityId]) -> bool {
        if self.cities.len() != customers.len() + 2 {
            return false;
        }
        if self.cities[0] != depot || self.cities[self.cities.len() - 1] != depot {
            return false;
        }
        let mut interior = self.interior().to_vec();
        let mut expected = customers.to_vec();
        interior.sort_unstable();
        expected.sort_unstable();
        interior == expected
    }
}
