use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use u_cvrp::constructive::{clarke_wright_savings, nearest_neighbor, random_solution};
use u_cvrp::ga::{GaConfig, Selection, StartingType};
use u_cvrp::models::{Instance, Solution};
use u_cvrp::solver::solve_by_genetic;

/// Instances with 1..=12 customers, demands 1..=4 and capacity 4..=10.
fn instance_strategy() -> impl Strategy<Value = Instance> {
    (1usize..=12)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0, 1i32..=4), n),
                4i32..=10,
            )
        })
        .prop_map(|(customers, capacity)| {
            let xs: Vec<f64> = customers.iter().map(|c| c.0).collect();
            let ys: Vec<f64> = customers.iter().map(|c| c.1).collect();
            let demands: Vec<i32> = customers.iter().map(|c| c.2).collect();
            Instance::with_demands(0.0, 0.0, &xs, &ys, &demands, capacity)
                .expect("generated instance is valid")
        })
}

fn starting_type_strategy() -> impl Strategy<Value = StartingType> {
    prop_oneof![
        Just(StartingType::Random),
        Just(StartingType::ClarkeWright),
        Just(StartingType::NearestNeighbours),
        Just(StartingType::Mixed),
    ]
}

fn assert_partition(solution: &Solution, instance: &Instance) {
    let violations = solution.violations(instance);
    assert!(violations.is_empty(), "{violations:?}");
    let mut seen: Vec<usize> = solution.routes().iter().flat_map(|r| r.customers().to_vec()).collect();
    seen.sort_unstable();
    assert_eq!(seen, instance.customers().collect::<Vec<_>>());
}

fn baseline(instance: &Instance) -> f64 {
    instance.customers().map(|c| 2.0 * instance.distance(0, c)).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn constructors_partition_customers(instance in instance_strategy(), seed in any::<u64>()) {
        assert_partition(&clarke_wright_savings(&instance).unwrap(), &instance);
        assert_partition(&nearest_neighbor(&instance).unwrap(), &instance);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        assert_partition(&random_solution(&instance, &mut rng).unwrap(), &instance);
    }

    #[test]
    fn savings_are_symmetric(instance in instance_strategy()) {
        let dm = instance.distances();
        for i in instance.customers() {
            for j in instance.customers() {
                prop_assert!((dm.saving(i, j) - dm.saving(j, i)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn savings_never_worse_than_baseline(instance in instance_strategy()) {
        prop_assume!(instance.num_customers() >= 2);
        let cw = clarke_wright_savings(&instance).unwrap();
        prop_assert!(cw.total_distance(instance.distances()) <= baseline(&instance) + 1e-9);
    }

    #[test]
    fn one_route_when_capacity_covers_demand(instance in instance_strategy()) {
        let capacity = i32::try_from(instance.total_demand()).unwrap();
        let roomy = Instance::from_locations(instance.locations().to_vec(), capacity).unwrap();
        prop_assert_eq!(clarke_wright_savings(&roomy).unwrap().num_routes(), 1);
        prop_assert_eq!(nearest_neighbor(&roomy).unwrap().num_routes(), 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn genetic_best_is_non_increasing_and_feasible(
        instance in instance_strategy(),
        starting_type in starting_type_strategy(),
        seed in any::<u64>(),
        rank in any::<bool>(),
    ) {
        let selection = if rank { Selection::Rank } else { Selection::Tournament(3) };
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(8)
            .with_starting_type(starting_type)
            .with_selection(selection)
            .with_seed(seed);

        let history = solve_by_genetic(&instance, &config).unwrap();
        prop_assert_eq!(history.len(), 9);
        for w in history.best_distances().windows(2) {
            prop_assert!(w[1] <= w[0], "{} > {}", w[1], w[0]);
        }
        for snap in history.snapshots() {
            assert_partition(snap.solution(), &instance);
        }
    }

    #[test]
    fn genetic_is_deterministic_per_seed(instance in instance_strategy(), seed in any::<u64>()) {
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(6)
            .with_starting_type(StartingType::Mixed)
            .with_seed(seed);

        let a = solve_by_genetic(&instance, &config).unwrap();
        let b = solve_by_genetic(&instance, &config).unwrap();
        prop_assert_eq!(a.route_lists(), b.route_lists());

    }
}

#[cfg(feature = "parallel")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn genetic_parallel_matches_sequential(instance in instance_strategy(), seed in any::<u64>()) {
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(6)
            .with_starting_type(StartingType::Mixed)
            .with_seed(seed);

        let sequential = solve_by_genetic(&instance, &config).unwrap();
        let parallel = solve_by_genetic(&instance, &config.clone().with_parallel(true)).unwrap();
        prop_assert_eq!(sequential.route_lists(), parallel.route_lists());
    }
}
