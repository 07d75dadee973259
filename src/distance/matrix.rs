//! Dense distance matrix.

use crate::models::Location;

/// A dense n×n Euclidean distance table stored in row-major order.
///
/// Built once per instance and shared read-only by every constructor and the
/// fitness function.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Location;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::customer(1, 3.0, 4.0),
///     Location::customer(2, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the Euclidean distance matrix of the given locations.
    pub fn from_locations(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = locations[i].distance_to(&locations[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Savings of serving customers `i` and `j` on one route instead of two
    /// separate depot round trips: `d(0,i) + d(0,j) - d(i,j)`.
    pub fn saving(&self, i: usize, j: usize) -> f64 {
        self.get(0, i) + self.get(0, j) - self.get(i, j)
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Equal distances resolve to the earliest candidate. Returns `None` if
    /// `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_locations() -> Vec<Location> {
        vec![
            Location::depot(0.0, 0.0),
            Location::customer(1, 3.0, 4.0),
            Location::customer(2, 0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_locations() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert_eq!(dm.get(1, 1), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        for i in 0..dm.size() {
            for j in 0..dm.size() {
                assert_eq!(dm.get(i, j), dm.get(j, i));
            }
        }
    }

    #[test]
    fn test_saving_symmetric() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        // d(0,1)=5, d(0,2)=8, d(1,2)=5
        assert!((dm.saving(1, 2) - 8.0).abs() < 1e-10);
        assert_eq!(dm.saving(1, 2), dm.saving(2, 1));
    }

    #[test]
    fn test_nearest_neighbor() {
        let dm = DistanceMatrix::from_locations(&sample_locations());
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_nearest_neighbor_tie_prefers_first() {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::customer(1, 1.0, 0.0),
            Location::customer(2, 0.0, 1.0),
        ];
        let dm = DistanceMatrix::from_locations(&locations);
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2, 1]), Some(2));
    }
}
