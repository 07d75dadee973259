//! Solution and violation types.

use std::fmt;

use serde::Serialize;

use super::{Instance, Route};
use crate::distance::DistanceMatrix;

/// A way in which a solution breaks the CVRP partition or capacity rules.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Route demand exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Demand carried by the route.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A route visits no customer.
    EmptyRoute {
        /// Route index in the solution.
        route_index: usize,
    },
    /// A customer is visited more than once.
    DuplicateCustomer {
        /// Customer index.
        customer_id: usize,
    },
    /// A customer is never visited.
    MissingCustomer {
        /// Customer index.
        customer_id: usize,
    },
    /// A route references the depot or an index beyond the instance.
    UnknownCustomer {
        /// Offending index.
        customer_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A partition of all customers into capacity-respecting routes.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Instance, Route, Solution};
///
/// let instance = Instance::from_coordinates(0.0, 0.0, &[1.0, 2.0], &[0.0, 0.0], 2).unwrap();
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_customers(vec![1, 2], instance.locations()));
/// assert!(sol.is_feasible(&instance));
/// assert!((sol.total_distance(instance.distances()) - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates a solution with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solution from existing routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub(crate) fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Sum of route lengths.
    pub fn total_distance(&self, distances: &DistanceMatrix) -> f64 {
        self.routes.iter().map(|r| r.length(distances)).sum()
    }

    /// Routes as plain customer index lists, in route order.
    pub fn route_lists(&self) -> Vec<Vec<usize>> {
        self.routes.iter().map(|r| r.customers().to_vec()).collect()
    }

    /// Checks the partition and capacity invariants against `instance`.
    ///
    /// A valid solution has an empty violations list.
    pub fn violations(&self, instance: &Instance) -> Vec<Violation> {
        let n = instance.num_customers();
        let mut seen = vec![0usize; n + 1];
        let mut violations = Vec::new();

        for (route_index, route) in self.routes.iter().enumerate() {
            if route.is_empty() {
                violations.push(Violation::new(ViolationType::EmptyRoute { route_index }));
            }
            if !route.is_feasible(instance.capacity()) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index,
                    load: route.demand(),
                    capacity: instance.capacity(),
                }));
            }
            for &c in route.customers() {
                if c == 0 || c > n {
                    violations.push(Violation::new(ViolationType::UnknownCustomer {
                        customer_id: c,
                    }));
                    continue;
                }
                seen[c] += 1;
                if seen[c] == 2 {
                    violations.push(Violation::new(ViolationType::DuplicateCustomer {
                        customer_id: c,
                    }));
                }
            }
        }

        for (customer_id, &count) in seen.iter().enumerate().skip(1) {
            if count == 0 {
                violations.push(Violation::new(ViolationType::MissingCustomer { customer_id }));
            }
        }

        violations
    }

    /// Returns `true` if every customer is served exactly once, no route is
    /// empty, and every route fits the vehicle capacity.
    pub fn is_feasible(&self, instance: &Instance) -> bool {
        self.violations(instance).is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, route) in self.routes.iter().enumerate() {
            write!(f, "Route {i}: 0")?;
            for c in route.customers() {
                write!(f, " {c}")?;
            }
            writeln!(f, " 0")?;
        }
        Ok(())
    }
}
