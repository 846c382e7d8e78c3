//! Distance collaborators.
//!
//! The GA consumes distances through the [`DistanceOracle`] trait and never
//! computes them itself. Any `Fn(CityId, CityId) -> f64` closure is an
//! oracle; [`DistanceMatrix`] is a dense, precomputed alternative addressed
//! by city identifier rather than raw row index.
//!
//! # Contract
//!
//! - `distance(u, v)` is non-negative and finite for every pair of cities
//!   in the working set.
//! - The result is deterministic for a fixed instance.
//! - Symmetry is **not** assumed: `distance(u, v)` and `distance(v, u)` may
//!   differ, and tours are always measured in travel direction.
//!
//! Violations are precondition errors and are not checked by the engine.

use crate::error::GaError;
use crate::ga::CityId;
use std::collections::HashMap;

/// Source of travel distances between two cities.
///
/// `Send + Sync` because population evaluation may run across rayon
/// worker threads.
pub trait DistanceOracle: Send + Sync {
    /// Distance travelled from `from` to `to`.
    fn distance(&self, from: CityId, to: CityId) -> f64;
}

impl<F> DistanceOracle for F
where
    F: Fn(CityId, CityId) -> f64 + Send + Sync,
{
    fn distance(&self, from: CityId, to: CityId) -> f64 {
        self(from, to)
    }
}

/// Dense distance matrix keyed by city identifier.
///
/// The identifier→row map is built once at construction, so each lookup is
/// a hash probe plus an index instead of a scan over the city list.
///
/// # Examples
///
/// ```
/// use tour_ga::distance::{DistanceMatrix, DistanceOracle};
///
/// let m = DistanceMatrix::new(
///     vec![0, 7, 9],
///     vec![
///         vec![0.0, 1.0, 2.0],
///         vec![1.5, 0.0, 3.0],
///         vec![2.0, 3.0, 0.0],
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(m.distance(7, 9), 3.0);
/// assert_eq!(m.distance(7, 0), 1.5);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    ids: Vec<CityId>,
    index: HashMap<CityId, usize>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from city identifiers and row-major distances.
    ///
    /// `rows[i][j]` is the distance from `ids[i]` to `ids[j]`.
    ///
    /// # Errors
    /// - [`GaError::DuplicateCity`] if an identifier repeats.
    /// - [`GaError::MatrixShape`] if `rows` is not `ids.len()` square.
    pub fn new(ids: Vec<CityId>, rows: Vec<Vec<f64>>) -> Result<Self, GaError> {
        let n = ids.len();
        let index = build_index(&ids)?;

        if rows.len() != n {
            return Err(GaError::MatrixShape {
                expected: n,
                actual: rows.len(),
            });
        }

        let mut values = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(GaError::MatrixShape {
                    expected: n,
                    actual: row.len(),
                });
            }
            values.extend(row);
        }

        Ok(Self { ids, index, values })
    }

    /// Precomputes the matrix over `ids` by querying `oracle` for every
    /// ordered pair.
    ///
    /// Useful when the underlying oracle is expensive and the working set
    /// (depot plus customers) is a small subset of a larger instance.
    ///
    /// # Errors
    /// [`GaError::DuplicateCity`] if an identifier repeats.
    pub fn from_oracle<D: DistanceOracle>(ids: Vec<CityId>, oracle: &D) -> Result<Self, GaError> {
        let index = build_index(&ids)?;
        let values = ids
            .iter()
            .flat_map(|&from| ids.iter().map(move |&to| (from, to)))
            .map(|(from, to)| if from == to { 0.0 } else { oracle.distance(from, to) })
            .collect();

        Ok(Self { ids, index, values })
    }

    /// Builds a symmetric Euclidean matrix from `(id, x, y)` points.
    ///
    /// # Errors
    /// [`GaError::DuplicateCity`] if an identifier repeats.
    pub fn euclidean(points: &[(CityId, f64, f64)]) -> Result<Self, GaError> {
        let ids: Vec<CityId> = points.iter().map(|&(id, _, _)| id).collect();
        let index = build_index(&ids)?;
        let values = points
            .iter()
            .flat_map(|&(_, x1, y1)| {
                points
                    .iter()
                    .map(move |&(_, x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
            })
            .collect();

        Ok(Self { ids, index, values })
    }

    /// City identifiers in row order.
    pub fn ids(&self) -> &[CityId] {
        &self.ids
    }

    /// Number of cities covered.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the matrix covers no cities.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` if `id` has a row in this matrix.
    pub fn contains(&self, id: CityId) -> bool {
        self.index.contains_key(&id)
    }

    fn row_of(&self, id: CityId) -> usize {
        match self.index.get(&id) {
            Some(&row) => row,
            None => panic!("city {id} is not covered by the distance matrix"),
        }
    }
}

impl DistanceOracle for DistanceMatrix {
    /// # Panics
    /// Panics if either identifier is not covered by the matrix.
    fn distance(&self, from: CityId, to: CityId) -> f64 {
        let n = self.ids.len();
        self.values[self.row_of(from) * n + self.row_of(to)]
    }
}

fn build_index(ids: &[CityId]) -> Result<HashMap<CityId, usize>, GaError> {
    let mut index = HashMap::with_capacity(ids.len());
    for (row, &id) in ids.iter().enumerate() {
        if index.insert(id, row).is_some() {
            return Err(GaError::DuplicateCity(id));
        }
    }
    Ok(index)
}
