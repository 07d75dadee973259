use std::io;
use std::sync::{Arc, Mutex};

use u_cvrp::constructive::{clarke_wright_savings, nearest_neighbor};
use u_cvrp::ga::{GaConfig, StartingType};
use u_cvrp::history::{read_history_from_path, write_history_to_path, END_MARKER};
use u_cvrp::models::Instance;
use u_cvrp::solver::{solve_by_genetic, solve_by_savings};
use u_cvrp::CvrpError;

fn two_pairs() -> Instance {
    Instance::from_coordinates(0.0, 0.0, &[1.0, 2.0, 0.0, 0.0], &[0.0, 0.0, 1.0, 2.0], 2)
        .expect("valid")
}

#[test]
fn savings_pairs_collinear_customers() {
    let inst = two_pairs();
    let history = solve_by_savings(&inst).expect("feasible");
    let last = history.final_solution().expect("non-empty");

    let mut routes: Vec<Vec<usize>> = last
        .route_lists()
        .into_iter()
        .map(|mut r| {
            r.sort_unstable();
            r
        })
        .collect();
    routes.sort();
    assert_eq!(routes, vec![vec![1, 2], vec![3, 4]]);

    // 4 single-customer routes: 2·(1 + 2 + 1 + 2) = 12
    let distance = last.total_distance(inst.distances());
    assert!(distance < 12.0);
    assert!((distance - 8.0).abs() < 1e-10);
}

#[test]
fn roomy_vehicle_uses_one_route() {
    let inst = Instance::from_coordinates(
        5.0,
        5.0,
        &[1.0, 9.0, 3.0, 7.0, 2.0],
        &[8.0, 2.0, 4.0, 6.0, 1.0],
        100,
    )
    .expect("valid");
    assert_eq!(clarke_wright_savings(&inst).expect("feasible").num_routes(), 1);
    assert_eq!(nearest_neighbor(&inst).expect("feasible").num_routes(), 1);
}

#[test]
fn oversized_customer_is_infeasible() {
    let inst = Instance::with_demands(0.0, 0.0, &[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0], &[2, 7, 1], 6)
        .expect("valid");
    let err = solve_by_savings(&inst).unwrap_err();
    assert!(matches!(
        err,
        CvrpError::Infeasible {
            customer: 2,
            demand: 7,
            capacity: 6
        }
    ));
    assert!(solve_by_genetic(&inst, &GaConfig::default()).unwrap_err().is_infeasible());
}

#[test]
fn invalid_inputs_fail_fast() {
    assert!(Instance::from_coordinates(0.0, 0.0, &[1.0, 2.0], &[0.0], 3)
        .unwrap_err()
        .is_invalid_input());
    assert!(Instance::from_coordinates(0.0, 0.0, &[1.0], &[0.0], 0)
        .unwrap_err()
        .is_invalid_input());
    assert!(Instance::from_coordinates(0.0, 0.0, &[], &[], 3)
        .unwrap_err()
        .is_invalid_input());
    assert!(Instance::with_demands(0.0, 0.0, &[1.0], &[0.0], &[-1], 3)
        .unwrap_err()
        .is_invalid_input());
    assert!(Instance::from_coordinates(0.0, f64::NAN, &[1.0], &[0.0], 3)
        .unwrap_err()
        .is_invalid_input());
}

#[test]
fn genetic_never_worse_than_its_savings_seed() {
    let inst = Instance::from_coordinates(
        0.0,
        0.0,
        &[3.0, -2.0, 5.0, -4.0, 1.0, 6.0, -1.0, 2.0, -5.0, 4.0],
        &[1.0, 4.0, -3.0, -2.0, 6.0, 2.0, -5.0, -4.0, 3.0, 5.0],
        3,
    )
    .expect("valid");
    let savings = clarke_wright_savings(&inst).expect("feasible");
    let config = GaConfig::default()
        .with_population_size(20)
        .with_generations(40)
        .with_starting_type(StartingType::ClarkeWright)
        .with_seed(2024);

    let history = solve_by_genetic(&inst, &config).expect("feasible");
    let best = history.final_solution().expect("non-empty");
    assert!(best.total_distance(inst.distances()) <= savings.total_distance(inst.distances()) + 1e-9);
}

#[test]
fn history_file_round_trip() {
    let inst = two_pairs();
    let history = solve_by_savings(&inst).expect("feasible");

    let path = std::env::temp_dir().join(format!("u-cvrp-scenario-{}.csv", std::process::id()));
    write_history_to_path(&history, &path).expect("writes");
    let text = std::fs::read_to_string(&path).expect("readable");
    let back = read_history_from_path(&path).expect("reads");
    std::fs::remove_file(&path).ok();

    assert_eq!(text.lines().filter(|l| *l == END_MARKER).count(), history.len());
    assert_eq!(back.route_lists(), history.route_lists());
    assert_eq!(back.locations().len(), inst.locations().len());
}

#[test]
fn near_max_demands_stay_on_separate_routes() {
    let inst = Instance::with_demands(
        0.0,
        0.0,
        &[1.0, 2.0],
        &[0.0, 0.0],
        &[1_500_000_000, 1_500_000_000],
        2_000_000_000,
    )
    .expect("valid");
    assert_eq!(inst.total_demand(), 3_000_000_000);

    let savings = clarke_wright_savings(&inst).expect("feasible");
    assert_eq!(savings.num_routes(), 2);
    assert!(savings.is_feasible(&inst));
    assert_eq!(nearest_neighbor(&inst).expect("feasible").num_routes(), 2);

    let config = GaConfig::default()
        .with_population_size(6)
        .with_generations(5)
        .with_starting_type(StartingType::Mixed)
        .with_seed(3);
    let history = solve_by_genetic(&inst, &config).expect("feasible");
    for snapshot in history.snapshots() {
        assert!(snapshot.solution().is_feasible(&inst));
        assert_eq!(snapshot.solution().num_routes(), 2);
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn logging_subscriber_sees_solver_events() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(2)
            .with_seed(1);
        solve_by_genetic(&two_pairs(), &config).expect("feasible");
    });

    let text = String::from_utf8(logs.0.lock().expect("log buffer").clone()).expect("utf8");
    assert!(text.contains("genetic algorithm finished"), "{text}");
    assert!(text.contains("snapshots=3"), "{text}");
}
