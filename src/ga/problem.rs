//! Problem definition: depot, customers and the distance oracle.

use super::types::CityId;
use crate::distance::DistanceOracle;
use crate::error::GaError;
use std::collections::HashSet;
use std::fmt;

/// A depot-anchored tour problem.
///
/// Holds the depot, the customer identifiers to visit and the oracle used
/// to measure tours. Construction rejects customer lists that could never
/// yield a valid permutation.
#[derive(Clone)]
pub struct TourProblem<D> {
    depot: CityId,
    customers: Vec<CityId>,
    oracle: D,
}

impl<D> fmt::Debug for TourProblem<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourProblem")
            .field("depot", &self.depot)
            .field("customers", &self.customers)
            .finish_non_exhaustive()
    }
}

impl<D: DistanceOracle> TourProblem<D> {
    /// Creates a problem.
    ///
    /// An empty or single-customer list is valid; it has exactly one tour.
    ///
    /// # Errors
    /// - [`GaError::DepotAmongCustomers`] if `customers` contains `depot`.
    /// - [`GaError::DuplicateCustomer`] if a customer repeats.
    pub fn new(depot: CityId, customers: Vec<CityId>, oracle: D) -> Result<Self, GaError> {
        let mut seen = HashSet::with_capacity(customers.len());
        for &c in &customers {
            if c == depot {
                return Err(GaError::DepotAmongCustomers(depot));
            }
            if !seen.insert(c) {
                return Err(GaError::DuplicateCustomer(c));
            }
        }
        Ok(Self {
            depot,
            customers,
            oracle,
        })
    }

    pub fn depot(&self) -> CityId {
        self.depot
    }

    pub fn customers(&self) -> &[CityId] {
        &self.customers
    }

    pub fn oracle(&self) -> &D {
        &self.oracle
    }

    /// Returns `true` when fewer than two customers leave only one possible tour.
    pub fn is_trivial(&self) -> bool {
        self.customers.len() < 2
    }
}
