//! Route-set chromosome.
//!
//! Each chromosome is a complete [`Solution`]: operators act on routes
//! directly, so every chromosome in a population is feasible.

use super::types::Individual;
use crate::models::Solution;

/// A GA individual holding one feasible solution.
///
/// Fitness is the total route length. Lower fitness = better solution.
///
/// # Examples
///
/// ```
/// use u_cvrp::ga::{Chromosome, Individual};
/// use u_cvrp::models::Solution;
///
/// let chromosome = Chromosome::new(Solution::new());
/// assert_eq!(chromosome.fitness(), f64::INFINITY);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    solution: Solution,
    fitness: f64,
}

impl Chromosome {
    /// Wraps a solution; fitness starts unevaluated.
    pub fn new(solution: Solution) -> Self {
        Self {
            solution,
            fitness: f64::INFINITY,
        }
    }

    /// Returns the encoded solution.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Consumes the chromosome, returning its solution.
    pub fn into_solution(self) -> Solution {
        self.solution
    }

    pub(crate) fn solution_mut(&mut self) -> &mut Solution {
        &mut self.solution
    }
}

impl Individual for Chromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
