//! Top-level solve entry points.
//!
//! Both return a [`History`]: the instance locations plus the sequence of
//! solutions the solver passed through. The last snapshot is the answer.

use tracing::info;

use crate::constructive::clarke_wright_recorded;
use crate::error::Result;
use crate::ga::{CvrpGaProblem, GaConfig, GaRunner};
use crate::history::History;
use crate::models::Instance;

/// Solves with Clarke–Wright savings.
///
/// The history starts with one route per customer and gains one snapshot
/// per merge.
///
/// # Errors
///
/// [`CvrpError::Infeasible`](crate::CvrpError::Infeasible) when a customer's
/// demand exceeds the capacity.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Instance;
/// use u_cvrp::solver::solve_by_savings;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 0.0, 0.0],
///     &[0.0, 0.0, 1.0, 2.0],
///     2,
/// ).unwrap();
///
/// let history = solve_by_savings(&instance).unwrap();
/// let last = history.final_solution().unwrap();
/// assert_eq!(last.num_routes(), 2);
/// assert_eq!(history.snapshots()[0].solution().num_routes(), 4);
/// ```
pub fn solve_by_savings(instance: &Instance) -> Result<History> {
    info!(
        customers = instance.num_customers(),
        capacity = instance.capacity(),
        "solving by savings"
    );

    let mut history = History::new(instance.locations().to_vec());
    let solution = clarke_wright_recorded(instance, &mut history)?;

    info!(
        routes = solution.num_routes(),
        distance = solution.total_distance(instance.distances()),
        snapshots = history.len(),
        "savings finished"
    );
    Ok(history)
}

/// Solves with the genetic algorithm.
///
/// The history holds the best chromosome after seeding and after each
/// generation, so it has `config.generations + 1` snapshots and its
/// distances never increase.
///
/// # Errors
///
/// - [`CvrpError::InvalidInput`](crate::CvrpError::InvalidInput) for an
///   invalid `config`
/// - [`CvrpError::Infeasible`](crate::CvrpError::Infeasible) when a
///   customer's demand exceeds the capacity
///
/// # Examples
///
/// ```
/// use u_cvrp::ga::{GaConfig, StartingType};
/// use u_cvrp::models::Instance;
/// use u_cvrp::solver::solve_by_genetic;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 0.0, 0.0],
///     &[0.0, 0.0, 1.0, 2.0],
///     2,
/// ).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(12)
///     .with_generations(10)
///     .with_starting_type(StartingType::Mixed)
///     .with_seed(1);
///
/// let history = solve_by_genetic(&instance, &config).unwrap();
/// assert_eq!(history.len(), 11);
/// assert!(history.final_solution().unwrap().is_feasible(&instance));
/// ```
pub fn solve_by_genetic(instance: &Instance, config: &GaConfig) -> Result<History> {
    config.validate()?;
    info!(
        customers = instance.num_customers(),
        capacity = instance.capacity(),
        population = config.population_size,
        generations = config.generations,
        starting_type = ?config.starting_type,
        "solving by genetic algorithm"
    );

    let problem = CvrpGaProblem::new(instance, config)?;
    let mut history = History::new(instance.locations().to_vec());
    let result = GaRunner::run_with_observer(&problem, config, |_, best| {
        history.record(best.solution(), instance.distances());
    })?;

    info!(
        routes = result.best.solution().num_routes(),
        distance = result.best_fitness,
        snapshots = history.len(),
        "genetic algorithm finished"
    );
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CvrpError;
    use crate::ga::StartingType;

    fn two_pairs() -> Instance {
        Instance::from_coordinates(0.0, 0.0, &[1.0, 2.0, 0.0, 0.0], &[0.0, 0.0, 1.0, 2.0], 2)
            .expect("valid")
    }

    #[test]
    fn test_savings_history_shape() {
        let inst = two_pairs();
        let history = solve_by_savings(&inst).expect("feasible");
        // singletons, then two merges
        assert_eq!(history.len(), 3);
        assert_eq!(history.locations().len(), 5);
        let last = history.final_solution().expect("non-empty");
        assert!(last.is_feasible(&inst));
        assert!((last.total_distance(inst.distances()) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_genetic_history_shape() {
        let inst = two_pairs();
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(6)
            .with_seed(3);
        let history = solve_by_genetic(&inst, &config).expect("feasible");
        assert_eq!(history.len(), 7);
        let distances = history.best_distances();
        assert!(distances.windows(2).all(|w| w[1] <= w[0]));
        for snap in history.snapshots() {
            assert!(snap.solution().is_feasible(&inst));
        }
    }

    #[test]
    fn test_genetic_every_starting_type() {
        let inst = two_pairs();
        for starting_type in [
            StartingType::Random,
            StartingType::ClarkeWright,
            StartingType::NearestNeighbours,
            StartingType::Mixed,
        ] {
            let config = GaConfig::default()
                .with_population_size(6)
                .with_generations(5)
                .with_starting_type(starting_type)
                .with_seed(21);
            let history = solve_by_genetic(&inst, &config).expect("feasible");
            let best = history.final_solution().expect("non-empty");
            assert!(best.is_feasible(&inst), "{starting_type:?}");
        }
    }

    #[test]
    fn test_genetic_rejects_bad_config() {
        let inst = two_pairs();
        let config = GaConfig::default().with_mutation_prob(1.5);
        let err = solve_by_genetic(&inst, &config).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidInput(_)));
    }

    #[test]
    fn test_infeasible_customer() {
        let inst = Instance::with_demands(0.0, 0.0, &[1.0, 2.0], &[0.0, 0.0], &[1, 9], 5)
            .expect("valid");
        assert!(matches!(
            solve_by_savings(&inst).unwrap_err(),
            CvrpError::Infeasible { customer: 2, .. }
        ));
        let config = GaConfig::default().with_population_size(4).with_generations(2);
        assert!(solve_by_genetic(&inst, &config).unwrap_err().is_infeasible());
    }
}
