//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the run:
//! seeding → (selection → crossover → mutation → improvement) per generation.
//!
//! # Reproducibility
//!
//! Every population slot of every generation draws from its own ChaCha8
//! stream, addressed by `(seed, generation, slot)`. Offspring therefore do
//! not depend on production order, and a parallel run yields exactly the
//! same populations as a sequential one.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::config::{GaConfig, GaPhase};
use super::types::{GaProblem, Individual};
use crate::error::Result;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual of the final generation.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness after seeding, then after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// The population is sorted before breeding; its best member is copied
/// unchanged into the next generation, so the best fitness never increases.
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or any error raised while seeding.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_observer(problem, config, |_, _| {})
    }

    /// Runs the GA, passing the best individual after seeding (generation 0)
    /// and after every generation to `observe`.
    pub fn run_with_observer<P, F>(
        problem: &P,
        config: &GaConfig,
        mut observe: F,
    ) -> Result<GaResult<P::Individual>>
    where
        P: GaProblem,
        F: FnMut(usize, &P::Individual),
    {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let parallel = cfg!(feature = "parallel") && config.parallel;

        let mut population = seed_population(problem, config.population_size, seed, parallel)?;
        let mut best = population[best_index(&population)].clone();
        let mut fitness_history = Vec::with_capacity(config.generations + 1);
        fitness_history.push(best.fitness());
        observe(0, &best);

        info!(
            phase = %GaPhase::Seeded,
            population = population.len(),
            seed,
            parallel,
            best = best.fitness(),
            "population seeded"
        );

        for generation in 1..=config.generations {
            population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));

            let offspring = breed(problem, config, &population, seed, generation, parallel);
            population.truncate(1);
            population.extend(offspring);

            best = population[best_index(&population)].clone();
            fitness_history.push(best.fitness());
            observe(generation, &best);

            debug!(
                phase = %GaPhase::Evolving,
                generation,
                best = best.fitness(),
                "generation complete"
            );
        }

        info!(
            phase = %GaPhase::Converged,
            generations = config.generations,
            best = best.fitness(),
            "evolution finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.generations,
            fitness_history,
        })
    }
}

/// Generator for one population slot of one generation. Generation 0 is
/// seeding.
fn slot_rng(seed: u64, generation: usize, slot: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(((generation as u64) << 32) | slot as u64);
    rng
}

fn seed_population<P: GaProblem>(
    problem: &P,
    size: usize,
    seed: u64,
    parallel: bool,
) -> Result<Vec<P::Individual>> {
    let create = |slot: usize| -> Result<P::Individual> {
        let mut ind = problem.create_individual(slot, &mut slot_rng(seed, 0, slot))?;
        let f = problem.evaluate(&ind);
        ind.set_fitness(f);
        Ok(ind)
    };

    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return (0..size).into_par_iter().map(create).collect();
        }
    }
    (0..size).map(create).collect()
}

/// Produces slots `1..population.len()` of the next generation; slot 0 is
/// reserved for the elite.
fn breed<P: GaProblem>(
    problem: &P,
    config: &GaConfig,
    population: &[P::Individual],
    seed: u64,
    generation: usize,
    parallel: bool,
) -> Vec<P::Individual> {
    let child = |slot: usize| -> P::Individual {
        let mut rng = slot_rng(seed, generation, slot);
        let p1 = config.selection.select(population, &mut rng);
        let p2 = config.selection.select(population, &mut rng);

        let mut child = problem.crossover(&population[p1], &population[p2], &mut rng);
        if rng.random_bool(config.mutation_prob) {
            problem.mutate(&mut child, &mut rng);
        }
        problem.improve(&mut child);

        let f = problem.evaluate(&child);
        child.set_fitness(f);
        child
    };

    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return (1..population.len()).into_par_iter().map(child).collect();
        }
    }
    (1..population.len()).map(child).collect()
}

/// Index of the lowest fitness; the first one wins ties.
fn best_index<I: Individual>(population: &[I]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() < population[best].fitness() {
            best = i;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
