//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the evolutionary loop. It is plain
//! data with serde support, so an outer layer can load it from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::error::{CvrpError, Result};

/// How the initial population is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingType {
    /// Independent random capacity-respecting partitions.
    Random,
    /// Copies of the Clarke–Wright savings solution.
    #[default]
    ClarkeWright,
    /// Copies of the nearest-neighbour solution.
    NearestNeighbours,
    /// One third random, the rest alternating Clarke–Wright and
    /// nearest-neighbour slots. Only the first slot of each constructor holds
    /// its pure output; later ones are perturbed.
    Mixed,
}

/// Lifecycle of a GA run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaPhase {
    /// Initial population built and evaluated.
    Seeded,
    /// Generations are being produced.
    Evolving,
    /// All generations done; the best chromosome is final.
    Converged,
}

impl fmt::Display for GaPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GaPhase::Seeded => "seeded",
            GaPhase::Evolving => "evolving",
            GaPhase::Converged => "converged",
        };
        f.write_str(name)
    }
}

/// Configuration for the genetic solver.
///
/// # Defaults
///
/// ```
/// use u_cvrp::ga::{GaConfig, StartingType};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 500);
/// assert_eq!(config.starting_type, StartingType::ClarkeWright);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_cvrp::ga::{GaConfig, Selection, StartingType};
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_generations(200)
///     .with_mutation_prob(0.3)
///     .with_starting_type(StartingType::Mixed)
///     .with_selection(Selection::Rank)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of chromosomes per generation.
    pub population_size: usize,

    /// Number of generations after seeding.
    pub generations: usize,

    /// Probability that a child is mutated (0.0–1.0).
    pub mutation_prob: f64,

    /// Seeding strategy for the first population.
    pub starting_type: StartingType,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Apply intra-route 2-opt to every child.
    pub local_search: bool,

    /// Random seed. `None` draws one from entropy.
    pub seed: Option<u64>,

    /// Produce offspring on rayon workers. Needs the `parallel` feature;
    /// otherwise the run stays sequential. Results are identical either way.
    pub parallel: bool,

    /// Operand draws a mutation may spend on capacity-violating moves
    /// before the child is left unchanged.
    pub max_mutation_attempts: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_prob: 0.5,
            starting_type: StartingType::default(),
            selection: Selection::default(),
            local_search: true,
            seed: None,
            parallel: false,
            max_mutation_attempts: 10,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation probability. Out-of-range values are rejected by
    /// [`validate`](Self::validate).
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = p;
        self
    }

    /// Sets the seeding strategy.
    pub fn with_starting_type(mut self, starting_type: StartingType) -> Self {
        self.starting_type = starting_type;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Enables or disables the 2-opt step.
    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel offspring production.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the mutation retry bound.
    pub fn with_max_mutation_attempts(mut self, n: usize) -> Self {
        self.max_mutation_attempts = n;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`CvrpError::InvalidInput`] for a zero population, a mutation
    /// probability outside `[0, 1]`, or a tournament of size 0.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(CvrpError::InvalidInput(
                "population_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return Err(CvrpError::InvalidInput(format!(
                "mutation_prob must be within [0, 1], got {}",
                self.mutation_prob
            )));
        }
        if self.selection == Selection::Tournament(0) {
            return Err(CvrpError::InvalidInput(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
