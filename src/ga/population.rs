//! Random initial populations.

use super::types::{CityId, Tour};
use crate::random::shuffle;
use rand::Rng;

/// Produces uniformly random valid tours for a fixed depot and customer set.
#[derive(Debug, Clone, Copy)]
pub struct PopulationFactory<'a> {
    depot: CityId,
    customers: &'a [CityId],
}

impl<'a> PopulationFactory<'a> {
    pub fn new(depot: CityId, customers: &'a [CityId]) -> Self {
        Self { depot, customers }
    }

    /// Returns `[depot] + shuffle(customers) + [depot]`.
    pub fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> Tour {
        let mut interior = self.customers.to_vec();
        shuffle(&mut interior, rng);
        Tour::new(self.depot, interior)
    }

    /// Returns `size` independently shuffled tours.
    pub fn create_population<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<Tour> {
        (0..size).map(|_| self.create_individual(rng)).collect()
    }
}
