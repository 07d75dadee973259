//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! evolutionary loop in [`GaRunner`](super::GaRunner) and the CVRP-specific
//! operators in [`CvrpGaProblem`](super::CvrpGaProblem).

use rand::Rng;

use crate::error::Result;

/// A candidate solution in the GA population.
///
/// Fitness is minimized. The runner calls [`GaProblem::evaluate`] and
/// stores the result via [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    /// Returns the current fitness of this individual.
    fn fitness(&self) -> f64;

    /// Sets the fitness of this individual.
    fn set_fitness(&mut self, fitness: f64);
}

/// Defines a GA optimization problem.
///
/// Every stochastic hook receives the generator it must draw from, so the
/// runner controls reproducibility.
///
/// `GaProblem` must be `Send + Sync` because offspring may be produced on
/// rayon workers.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates the individual for population slot `slot`.
    ///
    /// Slots run from 0 to `population_size - 1`, which lets a problem mix
    /// several seeding strategies within one population.
    fn create_individual<R: Rng>(&self, slot: usize, rng: &mut R) -> Result<Self::Individual>;

    /// Evaluates an individual and returns its fitness (lower is better).
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces one child from two parents.
    ///
    /// The default implementation clones `parent1`.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Mutates an individual in place. The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Deterministic local improvement applied to every child after
    /// mutation. The default is a no-op.
    fn improve(&self, _individual: &mut Self::Individual) {}
}
