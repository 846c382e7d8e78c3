//! Generational genetic algorithm for depot-anchored tours.
//!
//! Searches for short tours that leave a fixed depot, visit every customer
//! exactly once and return to the depot (a Traveling Salesman variant).
//!
//! - **Distance**: the engine never computes distances itself; callers
//!   supply a [`DistanceOracle`](distance::DistanceOracle), either a closure
//!   or a precomputed [`DistanceMatrix`](distance::DistanceMatrix).
//! - **Genetic Algorithm**: tournament selection, Order Crossover, swap
//!   mutation, elitism and a stagnation-window stopping policy, driven by
//!   [`GaRunner`](ga::GaRunner) or stepped generation by generation with
//!   [`GaEngine`](ga::GaEngine).
//!
//! # Architecture
//!
//! The crate is a pure in-memory computation. Instance parsing, plotting,
//! result export and command-line handling belong to consumers: they feed
//! `(customers, distance)` in and read a [`GaResult`](ga::GaResult) out.
//!
//! ```
//! use tour_ga::distance::DistanceMatrix;
//! use tour_ga::ga::{GaConfig, GaRunner, TourProblem};
//!
//! let matrix = DistanceMatrix::euclidean(&[
//!     (0, 0.0, 0.0),
//!     (1, 0.0, 3.0),
//!     (2, 4.0, 3.0),
//!     (3, 4.0, 0.0),
//! ])
//! .unwrap();
//! let problem = TourProblem::new(0, vec![1, 2, 3], matrix).unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_seed(7);
//!
//! let result = GaRunner::run(&problem, &config).unwrap();
//! assert!((result.best_distance - 14.0).abs() < 1e-9);
//! ```

pub mod distance;
pub mod error;
pub mod ga;
pub mod random;

pub use error::GaError;
