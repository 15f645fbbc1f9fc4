//! Dense distance matrix.

use crate::models::{Location, Stop};

/// A dense n×n matrix of travel distances in whole kilometers, stored in
/// row-major order.
///
/// Index 0 is the depot; indices 1..=N correspond 1:1 with input stop
/// order. Entries are haversine great-circle distances rounded to the
/// nearest kilometer, so the matrix is symmetric with a zero diagonal.
///
/// # Examples
///
/// ```
/// use route_solver::distance::DistanceMatrix;
/// use route_solver::models::{Location, Stop};
///
/// let depot = Location::new(0.0, 0.0);
/// let stops = vec![Stop::new("a", Location::new(0.0, 1.0), 5)];
/// let dm = DistanceMatrix::from_problem(depot, &stops);
/// assert_eq!(dm.size(), 2);
/// assert_eq!(dm.get(0, 1), 111);
/// assert_eq!(dm.get(0, 0), 0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes the (1 + stop count)² matrix for a depot and its stops.
    ///
    /// Deterministic and side-effect free. With zero stops this returns
    /// the trivial 1×1 matrix `[[0]]`.
    pub fn from_problem(depot: Location, stops: &[Stop]) -> Self {
        let mut locations = Vec::with_capacity(1 + stops.len());
        locations.push(depot);
        locations.extend(stops.iter().map(|s| s.location()));

        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                // Rounding happens once per pair, so both directions agree.
                let km = locations[i].haversine_km(&locations[j]).round() as i64;
                dm.set(i, j, km);
                dm.set(j, i, km);
            }
        }
        dm
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<i64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: i64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes (depot + stops).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_stops() -> Vec<Stop> {
        vec![
            Stop::new("a", Location::new(0.0, 1.0), 5),
            Stop::new("b", Location::new(0.0, 2.0), 5),
        ]
    }

    #[test]
    fn test_zero_stops_trivial_matrix() {
        let dm = DistanceMatrix::from_problem(Location::new(12.0, 34.0), &[]);
        assert_eq!(dm.size(), 1);
        assert_eq!(dm.get(0, 0), 0);
    }

    #[test]
    fn test_from_problem() {
        let dm = DistanceMatrix::from_problem(Location::new(0.0, 0.0), &sample_stops());
        assert_eq!(dm.size(), 3);
        // One degree of longitude at the equator, rounded.
        assert_eq!(dm.get(0, 1), 111);
        assert_eq!(dm.get(1, 2), 111);
        assert_eq!(dm.get(0, 2), 222);
    }

    #[test]
    fn test_zero_diagonal() {
        let dm = DistanceMatrix::from_problem(Location::new(0.0, 0.0), &sample_stops());
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0);
        }
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_problem(Location::new(40.0, -74.0), &sample_stops());
        assert!(dm.is_symmetric());
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0, 5, 5, 0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5);
        assert_eq!(dm.get(1, 0), 5);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0, 1, 2]).is_none());
    }

    #[test]
    fn test_asymmetric_detected() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10);
        dm.set(1, 0, 15);
        assert!(!dm.is_symmetric());
    }

    proptest! {
        #[test]
        fn prop_symmetric_zero_diagonal(
            coords in prop::collection::vec((-80.0f64..80.0, -179.0f64..179.0), 0..8),
            depot_lat in -80.0f64..80.0,
            depot_lon in -179.0f64..179.0,
        ) {
            let stops: Vec<Stop> = coords
                .iter()
                .enumerate()
                .map(|(i, &(lat, lon))| Stop::new(format!("s{i}"), Location::new(lat, lon), 1))
                .collect();
            let dm = DistanceMatrix::from_problem(Location::new(depot_lat, depot_lon), &stops);
            prop_assert_eq!(dm.size(), stops.len() + 1);
            prop_assert!(dm.is_symmetric());
            for i in 0..dm.size() {
                prop_assert_eq!(dm.get(i, i), 0);
                for j in 0..dm.size() {
                    prop_assert!(dm.get(i, j) >= 0);
                }
            }
        }
    }
}
