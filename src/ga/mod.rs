//! Genetic algorithm for the CVRP.
//!
//! - [`GaRunner`] — Generic elitist evolutionary loop
//! - [`GaProblem`] / [`Individual`] — Contract between the loop and a problem
//! - [`CvrpGaProblem`] — Route-set chromosomes with seeding per [`StartingType`]
//! - [`route_crossover`] / [`mutate`] — Feasibility-preserving operators
//! - [`GaConfig`] — Run parameters

mod chromosome;
mod config;
mod operators;
mod problem;
mod runner;
mod selection;
mod types;

pub use chromosome::Chromosome;
pub use config::{GaConfig, GaPhase, StartingType};
pub use operators::{mutate, route_crossover};
pub use problem::CvrpGaProblem;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use types::{GaProblem, Individual};
