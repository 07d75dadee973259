//! Random capacity-respecting partition.
//!
//! Shuffles the customers and fills routes in shuffled order, opening a new
//! route whenever the next customer would overflow the current one. Used to
//! diversify GA populations.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;
use crate::models::{Instance, Route, Solution};

/// Constructs a random feasible solution.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_cvrp::models::Instance;
/// use u_cvrp::constructive::random_solution;
///
/// let instance = Instance::from_coordinates(
///     0.0, 0.0,
///     &[1.0, 2.0, 3.0, 4.0],
///     &[0.0, 0.0, 0.0, 0.0],
///     2,
/// ).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let solution = random_solution(&instance, &mut rng).unwrap();
/// assert!(solution.is_feasible(&instance));
/// assert_eq!(solution.num_routes(), 2);
/// ```
pub fn random_solution<R: Rng>(instance: &Instance, rng: &mut R) -> Result<Solution> {
    instance.ensure_feasible()?;

    let mut order: Vec<usize> = instance.customers().collect();
    order.shuffle(rng);

    let capacity = instance.capacity();
    let mut solution = Solution::new();
    let mut route = Route::new();

    for c in order {
        let demand = instance.demand(c);
        if !route.fits(demand, capacity) {
            solution.add_route(std::mem::take(&mut route));
        }
        route.insert(route.len(), c, demand);
    }
    if !route.is_empty() {
        solution.add_route(route);
    }

    Ok(solution)
}
