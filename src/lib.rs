//! # u-cvrp
//!
//! Capacitated vehicle routing: Clarke–Wright savings, constructive
//! seeding heuristics, and a memetic genetic algorithm, each reporting the
//! sequence of solutions it passed through.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, Instance, Route, Solution)
//! - [`distance`] — Euclidean distance matrix and savings values
//! - [`constructive`] — Constructive heuristics (Clarke-Wright, Nearest Neighbor, Random)
//! - [`local_search`] — Intra-route 2-opt
//! - [`ga`] — Genetic algorithm over route-set chromosomes
//! - [`history`] — Snapshot recording and CSV persistence
//! - [`solver`] — `solve_by_savings` and `solve_by_genetic`
//!
//! ## Example
//!
//! ```
//! use u_cvrp::models::Instance;
//! use u_cvrp::solver::solve_by_savings;
//!
//! let instance = Instance::from_coordinates(
//!     0.0, 0.0,
//!     &[1.0, 2.0, 3.0],
//!     &[0.0, 0.0, 0.0],
//!     10,
//! )?;
//! let history = solve_by_savings(&instance)?;
//! assert_eq!(history.final_solution().map(|s| s.num_routes()), Some(1));
//! # Ok::<(), u_cvrp::CvrpError>(())
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod ga;
pub mod history;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{CvrpError, Result};
