//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides the core abstractions: locations with demands, the validated
//! instance that ties locations, distances and capacity together, routes as
//! ordered customer sequences, and solutions as capacity-respecting
//! partitions of the customer set.

mod instance;
mod location;
mod route;
mod solution;

pub use instance::Instance;
pub use location::Location;
pub use route::Route;
pub(crate) use route::path_length;
pub use solution::{Solution, Violation, ViolationType};
