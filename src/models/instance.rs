//! CVRP instance: locations, distances and vehicle capacity.

use std::ops::RangeInclusive;

use rand::Rng;

use super::Location;
use crate::distance::DistanceMatrix;
use crate::error::{CvrpError, Result};

/// A validated CVRP instance.
///
/// Holds the location list (index 0 = depot, `1..=N` = customers), the
/// memoized distance table, and the capacity shared by every vehicle.
/// Construction validates the input so that every solver can assume a
/// well-formed instance.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Instance;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 0.0, 0.0],
///     &[0.0, 0.0, 1.0, 2.0],
///     2,
/// ).unwrap();
/// assert_eq!(instance.num_customers(), 4);
/// assert_eq!(instance.capacity(), 2);
/// assert!((instance.distance(0, 2) - 2.0).abs() < 1e-10);
///
/// let err = Instance::from_coordinates(0.0, 0.0, &[1.0], &[], 2).unwrap_err();
/// assert!(err.is_invalid_input());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    locations: Vec<Location>,
    distances: DistanceMatrix,
    capacity: i32,
}

impl Instance {
    /// Builds an instance where every customer demands one package.
    pub fn from_coordinates(
        depot_x: f64,
        depot_y: f64,
        xs: &[f64],
        ys: &[f64],
        capacity: i32,
    ) -> Result<Self> {
        Self::with_demands(depot_x, depot_y, xs, ys, &vec![1; xs.len()], capacity)
    }

    /// Builds an instance with explicit per-customer demands.
    pub fn with_demands(
        depot_x: f64,
        depot_y: f64,
        xs: &[f64],
        ys: &[f64],
        demands: &[i32],
        capacity: i32,
    ) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(CvrpError::InvalidInput(format!(
                "x and y coordinate lists differ in length ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        if demands.len() != xs.len() {
            return Err(CvrpError::InvalidInput(format!(
                "{} demands given for {} customers",
                demands.len(),
                xs.len()
            )));
        }

        let mut locations = Vec::with_capacity(xs.len() + 1);
        locations.push(Location::depot(depot_x, depot_y));
        for (i, ((&x, &y), &demand)) in xs.iter().zip(ys).zip(demands).enumerate() {
            locations.push(Location::new(i + 1, x, y, demand));
        }
        Self::from_locations(locations, capacity)
    }

    /// Builds an instance from a complete location list.
    ///
    /// `locations[i].index()` must equal `i`, and `locations[0]` is the depot.
    pub fn from_locations(locations: Vec<Location>, capacity: i32) -> Result<Self> {
        if capacity <= 0 {
            return Err(CvrpError::InvalidInput(format!(
                "capacity must be positive, got {capacity}"
            )));
        }
        if locations.len() < 2 {
            return Err(CvrpError::InvalidInput("no customers given".into()));
        }
        for (i, loc) in locations.iter().enumerate() {
            if loc.index() != i {
                return Err(CvrpError::InvalidInput(format!(
                    "location at position {i} carries index {}",
                    loc.index()
                )));
            }
            if !loc.x().is_finite() || !loc.y().is_finite() {
                return Err(CvrpError::InvalidInput(format!(
                    "location {i} has a non-finite coordinate"
                )));
            }
            if loc.demand() < 0 || (loc.is_depot() && loc.demand() != 0) {
                return Err(CvrpError::InvalidInput(format!(
                    "location {i} has invalid demand {}",
                    loc.demand()
                )));
            }
        }

        let distances = DistanceMatrix::from_locations(&locations);
        Ok(Self {
            locations,
            distances,
            capacity,
        })
    }

    /// Generates an instance with the depot and `num_customers` unit-demand
    /// customers placed uniformly in `[min, max)²`.
    pub fn random<R: Rng>(
        num_customers: usize,
        min: f64,
        max: f64,
        capacity: i32,
        rng: &mut R,
    ) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(CvrpError::InvalidInput(format!(
                "empty coordinate range [{min}, {max})"
            )));
        }
        let locations = (0..=num_customers)
            .map(|i| {
                let x = rng.random_range(min..max);
                let y = rng.random_range(min..max);
                if i == 0 {
                    Location::depot(x, y)
                } else {
                    Location::customer(i, x, y)
                }
            })
            .collect();
        Self::from_locations(locations, capacity)
    }

    /// Returns [`CvrpError::Infeasible`] for the first customer whose demand
    /// alone exceeds the capacity.
    pub fn ensure_feasible(&self) -> Result<()> {
        match self.customers().find(|&c| self.demand(c) > self.capacity) {
            Some(customer) => Err(CvrpError::Infeasible {
                customer,
                demand: self.demand(customer),
                capacity: self.capacity,
            }),
            None => Ok(()),
        }
    }

    /// All locations (index 0 = depot).
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Memoized distance table.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.distances.size() - 1
    }

    /// Customer indices `1..=N`.
    pub fn customers(&self) -> RangeInclusive<usize> {
        1..=self.num_customers()
    }

    /// Demand of location `index`.
    pub fn demand(&self, index: usize) -> i32 {
        self.locations[index].demand()
    }

    /// Sum of all customer demands, widened so it cannot overflow.
    pub fn total_demand(&self) -> i64 {
        self.locations.iter().map(|l| i64::from(l.demand())).sum()
    }

    /// Distance between two locations.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_from_coordinates() {
        let inst = Instance::from_coordinates(0.0, 0.0, &[3.0, 0.0], &[4.0, 8.0], 5)
            .expect("valid");
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.customers().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(inst.demand(1), 1);
        assert_eq!(inst.total_demand(), 2);
        assert!((inst.distance(0, 1) - 5.0).abs() < 1e-10);
        assert!(inst.ensure_feasible().is_ok());
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = Instance::from_coordinates(0.0, 0.0, &[1.0, 2.0], &[1.0], 5).unwrap_err();
        assert!(err.is_invalid_input());
        let err = Instance::with_demands(0.0, 0.0, &[1.0], &[1.0], &[1, 2], 5).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_non_positive_capacity() {
        for cap in [0, -3] {
            let err = Instance::from_coordinates(0.0, 0.0, &[1.0], &[1.0], cap).unwrap_err();
            assert!(err.is_invalid_input());
        }
    }

    #[test]
    fn test_empty_customers() {
        let err = Instance::from_coordinates(0.0, 0.0, &[], &[], 5).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_bad_location_data() {
        let err = Instance::from_coordinates(0.0, 0.0, &[f64::NAN], &[1.0], 5).unwrap_err();
        assert!(err.is_invalid_input());
        let err = Instance::with_demands(0.0, 0.0, &[1.0], &[1.0], &[-1], 5).unwrap_err();
        assert!(err.is_invalid_input());
        let err = Instance::from_locations(
            vec![Location::depot(0.0, 0.0), Location::customer(2, 1.0, 1.0)],
            5,
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_infeasible_customer() {
        let inst = Instance::with_demands(0.0, 0.0, &[1.0, 2.0], &[0.0, 0.0], &[3, 9], 5)
            .expect("valid shape");
        match inst.ensure_feasible() {
            Err(CvrpError::Infeasible {
                customer,
                demand,
                capacity,
            }) => {
                assert_eq!(customer, 2);
                assert_eq!(demand, 9);
                assert_eq!(capacity, 5);
            }
            other => panic!("expected Infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_random_instance() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let inst = Instance::random(25, 100.0, 500.0, 5, &mut rng).expect("valid");
        assert_eq!(inst.num_customers(), 25);
        for loc in inst.locations() {
            assert!(loc.x() >= 100.0 && loc.x() < 500.0);
            assert!(loc.y() >= 100.0 && loc.y() < 500.0);
        }
        assert!(Instance::random(5, 1.0, 1.0, 5, &mut rng).is_err());
    }
}
