//! Nearest-neighbor constructive heuristic.
//!
//! Builds routes greedily: starting from the depot, always visit the nearest
//! unvisited customer that still fits the vehicle. When no remaining
//! customer fits, the route returns to the depot and a new one is opened.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use rand::Rng;

use crate::error::Result;
use crate::models::{Instance, Route, Solution};

/// Constructs a CVRP solution using the nearest-neighbor heuristic.
///
/// Equal distances resolve to the lower customer index, so the result is
/// deterministic.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Instance;
/// use u_cvrp::constructive::nearest_neighbor;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 3.0],
///     &[0.0, 0.0, 0.0],
///     10,
/// ).unwrap();
///
/// let solution = nearest_neighbor(&instance).unwrap();
/// assert_eq!(solution.route_lists(), vec![vec![1, 2, 3]]);
/// ```
pub fn nearest_neighbor(instance: &Instance) -> Result<Solution> {
    build(instance, |_| None)
}

/// Nearest-neighbor variant whose first customer on every route is drawn
/// uniformly from the unvisited customers using `rng`.
///
/// Used to diversify the initial GA population.
pub fn nearest_neighbor_randomized<R: Rng>(instance: &Instance, rng: &mut R) -> Result<Solution> {
    build(instance, |unvisited| {
        let pos = rng.random_range(0..unvisited.len());
        Some(unvisited.remove(pos))
    })
}

/// Greedy route building. `open_route` may take a customer out of the
/// (non-empty) unvisited list to start each new route.
fn build<F>(instance: &Instance, mut open_route: F) -> Result<Solution>
where
    F: FnMut(&mut Vec<usize>) -> Option<usize>,
{
    instance.ensure_feasible()?;

    let distances = instance.distances();
    let capacity = instance.capacity();
    let mut unvisited: Vec<usize> = instance.customers().collect();
    let mut solution = Solution::new();

    while !unvisited.is_empty() {
        let mut route = Route::new();

        if let Some(first) = open_route(&mut unvisited) {
            route.insert(0, first, instance.demand(first));
        }

        loop {
            let current = route.last().unwrap_or(0);
            let candidates: Vec<usize> = unvisited
                .iter()
                .copied()
                .filter(|&c| route.fits(instance.demand(c), capacity))
                .collect();

            let Some(next) = distances.nearest_neighbor(current, &candidates) else {
                break;
            };
            if let Some(pos) = unvisited.iter().position(|&c| c == next) {
                unvisited.remove(pos);
            }
            route.insert(route.len(), next, instance.demand(next));
        }

        solution.add_route(route);
    }

    Ok(solution)
}
