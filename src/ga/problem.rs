//! GA problem definition for the CVRP.
//!
//! Implements [`GaProblem`] over route-set chromosomes. Seeding follows
//! [`StartingType`]; crossover and mutation come from
//! [`operators`](super::operators); the optional improvement step is
//! intra-route 2-opt.

use rand::Rng;

use crate::constructive::{
    clarke_wright_savings, nearest_neighbor, nearest_neighbor_randomized, random_solution,
};
use crate::error::Result;
use crate::local_search::improve_routes;
use crate::models::{Instance, Solution};

use super::chromosome::Chromosome;
use super::config::{GaConfig, StartingType};
use super::operators::{mutate, route_crossover};
use super::types::GaProblem;

/// GA problem for capacitated vehicle routing.
///
/// Holds the Clarke–Wright and nearest-neighbour solutions computed once at
/// construction, so seeding a population only clones or perturbs them.
///
/// # Examples
///
/// ```
/// use u_cvrp::ga::{CvrpGaProblem, GaConfig, GaRunner};
/// use u_cvrp::models::Instance;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 3.0],
///     &[0.0, 0.0, 0.0],
///     3,
/// ).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(20)
///     .with_seed(42);
///
/// let problem = CvrpGaProblem::new(&instance, &config).unwrap();
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_fitness <= 6.0 + 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct CvrpGaProblem<'a> {
    instance: &'a Instance,
    starting_type: StartingType,
    population_size: usize,
    local_search: bool,
    max_mutation_attempts: usize,
    savings: Solution,
    nearest: Solution,
}

impl<'a> CvrpGaProblem<'a> {
    /// Creates the problem for `instance` with operator settings from
    /// `config`.
    ///
    /// # Errors
    ///
    /// [`CvrpError::Infeasible`](crate::CvrpError::Infeasible) when a
    /// customer's demand exceeds the capacity.
    pub fn new(instance: &'a Instance, config: &GaConfig) -> Result<Self> {
        Ok(Self {
            instance,
            starting_type: config.starting_type,
            population_size: config.population_size,
            local_search: config.local_search,
            max_mutation_attempts: config.max_mutation_attempts,
            savings: clarke_wright_savings(instance)?,
            nearest: nearest_neighbor(instance)?,
        })
    }

    /// The instance being solved.
    pub fn instance(&self) -> &Instance {
        self.instance
    }

    fn perturbed<R: Rng>(&self, base: &Solution, rng: &mut R) -> Solution {
        let mut solution = base.clone();
        mutate(&mut solution, self.instance, self.max_mutation_attempts, rng);
        solution
    }

    /// One third random; the rest alternate savings and nearest-neighbour
    /// slots, each starting with its pure constructor output.
    fn mixed_seed<R: Rng>(&self, slot: usize, rng: &mut R) -> Result<Solution> {
        let random_slots = self.population_size / 3;
        if slot < random_slots {
            return random_solution(self.instance, rng);
        }

        let k = slot - random_slots;
        let solution = match (k % 2 == 0, k < 2) {
            (true, true) => self.savings.clone(),
            (true, false) => self.perturbed(&self.savings, rng),
            (false, true) => self.nearest.clone(),
            (false, false) => nearest_neighbor_randomized(self.instance, rng)?,
        };
        Ok(solution)
    }
}

impl GaProblem for CvrpGaProblem<'_> {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, slot: usize, rng: &mut R) -> Result<Chromosome> {
        let solution = match self.starting_type {
            StartingType::Random => random_solution(self.instance, rng)?,
            StartingType::ClarkeWright => self.savings.clone(),
            StartingType::NearestNeighbours => self.nearest.clone(),
            StartingType::Mixed => self.mixed_seed(slot, rng)?,
        };
        Ok(Chromosome::new(solution))
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        individual.solution().total_distance(self.instance.distances())
    }

    fn crossover<R: Rng>(&self, parent1: &Chromosome, parent2: &Chromosome, rng: &mut R) -> Chromosome {
        Chromosome::new(route_crossover(
            parent1.solution(),
            parent2.solution(),
            self.instance,
            rng,
        ))
    }

    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rng: &mut R) {
        mutate(
            individual.solution_mut(),
            self.instance,
            self.max_mutation_attempts,
            rng,
        );
    }

    fn improve(&self, individual: &mut Chromosome) {
        if self.local_search {
            improve_routes(individual.solution_mut(), self.instance.distances());
        }
    }
}
