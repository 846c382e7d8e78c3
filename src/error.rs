//! Error types.

use crate::ga::CityId;

/// Errors surfaced when a run is configured or a problem is defined.
///
/// Operators and the evolutionary loop themselves are infallible; every
/// variant here is detected before the first generation is created.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,
    #[error("max_generations must be at least 1")]
    ZeroGenerations,
    #[error("elitism_count ({elitism_count}) exceeds population_size ({population_size})")]
    EliteOverflow {
        elitism_count: usize,
        population_size: usize,
    },
    #[error("tournament_size must be at least 2, got {0}")]
    TournamentTooSmall(usize),
    #[error("tournament_size ({tournament_size}) exceeds population_size ({population_size})")]
    TournamentOverflow {
        tournament_size: usize,
        population_size: usize,
    },
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("depot {0} must not appear among the customers")]
    DepotAmongCustomers(CityId),
    #[error("customer {0} appears more than once")]
    DuplicateCustomer(CityId),
    #[error("city {0} appears more than once in the distance matrix")]
    DuplicateCity(CityId),
    #[error("distance matrix must be {expected}x{expected}, got a row of length {actual}")]
    MatrixShape { expected: usize, actual: usize },
}
