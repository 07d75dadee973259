//! Constructive heuristics for building initial CVRP solutions.
//!
//! - [`clarke_wright_savings`] — Clarke-Wright savings algorithm (1964), O(n² log n)
//! - [`nearest_neighbor`] — Greedy nearest-neighbor extension, O(n²)
//! - [`random_solution`] — Shuffled capacity-respecting partition, O(n)
//!
//! Every constructor returns [`CvrpError::Infeasible`](crate::CvrpError::Infeasible)
//! when a single customer exceeds the vehicle capacity.

mod clarke_wright;
mod nearest_neighbor;
mod random;

pub use clarke_wright::{clarke_wright_recorded, clarke_wright_savings};
pub use nearest_neighbor::{nearest_neighbor, nearest_neighbor_randomized};
pub use random::random_solution;
