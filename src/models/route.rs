//! Route type.

use serde::Serialize;

use super::Location;
use crate::distance::DistanceMatrix;

/// An ordered sequence of customers served by one vehicle.
///
/// The depot is implicit at both ends and never stored. The total demand is
/// cached as `i64` so that sums of `i32` demands cannot overflow; the length
/// is computed from a [`DistanceMatrix`] on request.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Location, Route};
/// use u_cvrp::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::customer(1, 1.0, 0.0),
///     Location::customer(2, 2.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
///
/// let a = Route::from_customers(vec![1], &locations);
/// let b = Route::from_customers(vec![2], &locations);
/// let merged = Route::merge(&a, &b, 2).unwrap();
/// assert_eq!(merged.customers(), &[1, 2]);
/// assert_eq!(merged.demand(), 2);
/// assert!((merged.length(&dm) - 4.0).abs() < 1e-10);
/// assert!(Route::merge(&merged, &a, 2).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Route {
    customers: Vec<usize>,
    demand: i64,
}

impl Route {
    /// Creates an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a route visiting `customers` in order, summing their demands
    /// from `locations`.
    pub fn from_customers(customers: Vec<usize>, locations: &[Location]) -> Self {
        let demand = customers.iter().map(|&c| i64::from(locations[c].demand())).sum();
        Self { customers, demand }
    }

    /// Customer indices in visit order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers on this route.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the route serves no customer.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// First customer after leaving the depot.
    pub fn first(&self) -> Option<usize> {
        self.customers.first().copied()
    }

    /// Last customer before returning to the depot.
    pub fn last(&self) -> Option<usize> {
        self.customers.last().copied()
    }

    /// Returns `true` if `customer` is the first or last stop.
    pub fn is_endpoint(&self, customer: usize) -> bool {
        self.first() == Some(customer) || self.last() == Some(customer)
    }

    /// Total demand of the customers on this route.
    pub fn demand(&self) -> i64 {
        self.demand
    }

    /// Returns `true` if the route's demand fits within `capacity`.
    pub fn is_feasible(&self, capacity: i32) -> bool {
        self.demand <= i64::from(capacity)
    }

    /// Returns `true` if a customer demanding `demand` can join the route
    /// without exceeding `capacity`.
    pub fn fits(&self, demand: i32, capacity: i32) -> bool {
        self.demand + i64::from(demand) <= i64::from(capacity)
    }

    /// Travelled distance: depot → first, consecutive stops, last → depot.
    pub fn length(&self, distances: &DistanceMatrix) -> f64 {
        path_length(&self.customers, distances)
    }

    /// Concatenates `a` followed by `b`.
    ///
    /// Returns `None` when the combined demand exceeds `capacity`.
    pub fn merge(a: &Route, b: &Route, capacity: i32) -> Option<Route> {
        let demand = a.demand + b.demand;
        if demand > i64::from(capacity) {
            return None;
        }
        let mut customers = Vec::with_capacity(a.len() + b.len());
        customers.extend_from_slice(&a.customers);
        customers.extend_from_slice(&b.customers);
        Some(Route { customers, demand })
    }

    /// The same customers visited in reverse order.
    pub fn reversed(&self) -> Route {
        let mut customers = self.customers.clone();
        customers.reverse();
        Route {
            customers,
            demand: self.demand,
        }
    }

    /// Extra distance caused by inserting `customer` before position `pos`.
    pub fn insertion_cost(&self, pos: usize, customer: usize, distances: &DistanceMatrix) -> f64 {
        let prev = if pos == 0 { 0 } else { self.customers[pos - 1] };
        let next = self.customers.get(pos).copied().unwrap_or(0);
        distances.get(prev, customer) + distances.get(customer, next) - distances.get(prev, next)
    }

    pub(crate) fn insert(&mut self, pos: usize, customer: usize, demand: i32) {
        self.customers.insert(pos, customer);
        self.demand += i64::from(demand);
    }

    pub(crate) fn remove(&mut self, pos: usize, demand: i32) -> usize {
        self.demand -= i64::from(demand);
        self.customers.remove(pos)
    }

    pub(crate) fn customers_mut(&mut self) -> &mut [usize] {
        &mut self.customers
    }
}

/// Length of a depot-anchored path over `customers`.
pub(crate) fn path_length(customers: &[usize], distances: &DistanceMatrix) -> f64 {
    let (Some(&first), Some(&last)) = (customers.first(), customers.last()) else {
        return 0.0;
    };
    let inner: f64 = customers
        .windows(2)
        .map(|w| distances.get(w[0], w[1]))
        .sum();
    distances.get(0, first) + inner + distances.get(last, 0)
}
