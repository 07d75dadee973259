//! Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). It then merges routes by
//! computing the "savings" of joining two customers directly:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! Pairs are processed in decreasing order of savings (ties: lower `i + j`
//! first, then lower `i`). A pair merges two routes only when both customers
//! are endpoints of different routes and the combined demand fits the
//! capacity. Routes are oriented so the join happens at `i`–`j`.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::Result;
use crate::history::History;
use crate::models::{Instance, Route, Solution};

/// A savings value for joining two customers.
#[derive(Debug, Clone, Copy)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

impl Saving {
    fn order(a: &Saving, b: &Saving) -> Ordering {
        b.value
            .total_cmp(&a.value)
            .then_with(|| (a.i + a.j).cmp(&(b.i + b.j)))
            .then_with(|| a.i.cmp(&b.i))
    }
}

/// Constructs a CVRP solution using the Clarke-Wright savings algorithm.
///
/// Returns [`CvrpError::Infeasible`](crate::CvrpError::Infeasible) if a
/// customer's demand alone exceeds the capacity.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Instance;
/// use u_cvrp::constructive::clarke_wright_savings;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 3.0],
///     &[0.0, 0.0, 0.0],
///     3,
/// ).unwrap();
///
/// let solution = clarke_wright_savings(&instance).unwrap();
/// assert_eq!(solution.num_routes(), 1);
/// assert!((solution.total_distance(instance.distances()) - 6.0).abs() < 1e-10);
/// ```
pub fn clarke_wright_savings(instance: &Instance) -> Result<Solution> {
    merge_by_savings(instance, |_| {})
}

/// Runs [`clarke_wright_savings`], recording the initial singleton routes
/// and then the full solution after every merge into `history`.
pub fn clarke_wright_recorded(instance: &Instance, history: &mut History) -> Result<Solution> {
    let distances = instance.distances();
    merge_by_savings(instance, |solution| {
        history.record(solution, distances);
    })
}

/// Computes `s(i, j)` for every unordered customer pair, sorted in
/// processing order.
fn sorted_savings(instance: &Instance) -> Vec<Saving> {
    let n = instance.num_customers();
    let distances = instance.distances();
    let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 1..=n {
        for j in (i + 1)..=n {
            savings.push(Saving {
                i,
                j,
                value: distances.saving(i, j),
            });
        }
    }
    savings.sort_by(Saving::order);
    savings
}

fn merge_by_savings<F>(instance: &Instance, mut on_step: F) -> Result<Solution>
where
    F: FnMut(&Solution),
{
    instance.ensure_feasible()?;

    let n = instance.num_customers();
    let capacity = instance.capacity();

    // slot r holds the route created for customer r, until merged away
    let mut routes: Vec<Option<Route>> = (0..=n)
        .map(|c| (c > 0).then(|| Route::from_customers(vec![c], instance.locations())))
        .collect();
    let mut route_of: Vec<usize> = (0..=n).collect();

    on_step(&snapshot(&routes));

    for saving in sorted_savings(instance) {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];
        if ri == rj {
            continue;
        }

        let (Some(route_i), Some(route_j)) = (&routes[ri], &routes[rj]) else {
            continue;
        };
        if !route_i.is_endpoint(saving.i) || !route_j.is_endpoint(saving.j) {
            continue;
        }

        // i must end the left part and j must start the right part
        let left = if route_i.last() == Some(saving.i) {
            route_i.clone()
        } else {
            route_i.reversed()
        };
        let right = if route_j.first() == Some(saving.j) {
            route_j.clone()
        } else {
            route_j.reversed()
        };

        let Some(merged) = Route::merge(&left, &right, capacity) else {
            continue;
        };

        for &c in right.customers() {
            route_of[c] = ri;
        }
        routes[ri] = Some(merged);
        routes[rj] = None;

        trace!(i = saving.i, j = saving.j, saving = saving.value, "merged routes");
        on_step(&snapshot(&routes));
    }

    Ok(snapshot(&routes))
}

fn snapshot(routes: &[Option<Route>]) -> Solution {
    Solution::from_routes(routes.iter().flatten().cloned().collect())
}
