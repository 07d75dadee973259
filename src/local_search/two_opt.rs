//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions (i, j) in a route, compute the change in
//! distance from reversing the customers between them:
//!
//! ```text
//! delta = d(prev_i, r[j]) + d(r[i], next_j) - d(prev_i, r[i]) - d(r[j], next_j)
//! ```
//!
//! If delta < 0, reverse the segment [i..=j] and accept the improvement.
//! Repeat until no further improvements are found (first-improvement strategy).
//! The GA applies this to every child as its memetic step.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::models::{path_length, Solution};

/// Applies 2-opt improvement to a single route given as customer indices.
///
/// The route starts and ends at the depot (index 0). Returns the improved
/// customer sequence and its length.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Instance;
/// use u_cvrp::local_search::two_opt_improve;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 3.0],
///     &[0.0, 0.0, 0.0],
///     3,
/// ).unwrap();
///
/// // Suboptimal order: 1, 3, 2
/// let (improved, dist) = two_opt_improve(&[1, 3, 2], instance.distances());
/// assert_eq!(improved.len(), 3);
/// assert!(dist <= 6.0 + 1e-10); // optimal: 0→1→2→3→0 = 6
/// ```
pub fn two_opt_improve(route: &[usize], distances: &DistanceMatrix) -> (Vec<usize>, f64) {
    let mut current = route.to_vec();
    let n = current.len();
    let mut improved = n >= 2;

    while improved {
        improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                if two_opt_delta(&current, distances, i, j) < -1e-10 {
                    current[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    let dist = path_length(&current, distances);
    (current, dist)
}

/// Applies [`two_opt_improve`] to every route of `solution` in place.
///
/// Route membership and demands are unchanged, so feasibility is preserved.
pub fn improve_routes(solution: &mut Solution, distances: &DistanceMatrix) {
    for route in solution.routes_mut() {
        let (better, _) = two_opt_improve(route.customers(), distances);
        route.customers_mut().copy_from_slice(&better);
    }
}

/// Distance change from reversing `route[i..=j]`.
fn two_opt_delta(route: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let prev_i = if i == 0 { 0 } else { route[i - 1] };
    let next_j = route.get(j + 1).copied().unwrap_or(0);

    let old_cost = distances.get(prev_i, route[i]) + distances.get(route[j], next_j);
    let new_cost = distances.get(prev_i, route[j]) + distances.get(route[i], next_j);

    new_cost - old_cost
}
