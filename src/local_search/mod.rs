//! Local search operators for improving CVRP solutions.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt edge reversal
//! - [`improve_routes`] — 2-opt over every route of a solution

mod two_opt;

pub use two_opt::{improve_routes, two_opt_improve};
