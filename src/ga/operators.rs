//! Route-level crossover and mutation for CVRP chromosomes.
//!
//! # Crossover
//!
//! A contiguous segment of one donor route is inserted as a block at its
//! cheapest position in the receiver's routes. The segment's customers are
//! first removed from their old receiver positions. If the block overflows
//! its route, non-segment customers are popped from the route tail and
//! reinserted at their cheapest feasible position, or on a new route.
//! Finally, routes are combined end-to-end while that shortens the solution.
//!
//! # Mutation
//!
//! One of three moves, chosen uniformly:
//!
//! - **swap**: exchange two customers (any routes)
//! - **reverse**: reverse a segment within one route
//! - **relocate**: move a customer into a different route
//!
//! A move that would violate capacity is redrawn, up to a bounded number of
//! attempts.

use rand::Rng;
use tracing::debug;

use crate::models::{Instance, Route, Solution};

/// Builds a child from `receiver` by transplanting a random route segment
/// of `donor`.
///
/// The child is always feasible: if repair fails, a copy of `receiver` is
/// returned.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_cvrp::constructive::{clarke_wright_savings, random_solution};
/// use u_cvrp::ga::route_crossover;
/// use u_cvrp::models::Instance;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let instance = Instance::random(12, 0.0, 50.0, 4, &mut rng).unwrap();
/// let a = clarke_wright_savings(&instance).unwrap();
/// let b = random_solution(&instance, &mut rng).unwrap();
///
/// let child = route_crossover(&a, &b, &instance, &mut rng);
/// assert!(child.is_feasible(&instance));
/// ```
pub fn route_crossover<R: Rng>(
    receiver: &Solution,
    donor: &Solution,
    instance: &Instance,
    rng: &mut R,
) -> Solution {
    let candidates: Vec<&Route> = donor.routes().iter().filter(|r| !r.is_empty()).collect();
    if candidates.is_empty() {
        return receiver.clone();
    }

    let route = candidates[rng.random_range(0..candidates.len())];
    let start = rng.random_range(0..route.len());
    let end = rng.random_range(start..route.len());

    insert_segment(receiver, &route.customers()[start..=end], instance)
}

/// Inserts `segment` into a copy of `receiver` and repairs it.
fn insert_segment(receiver: &Solution, segment: &[usize], instance: &Instance) -> Solution {
    let mut in_segment = vec![false; instance.locations().len()];
    for &c in segment {
        in_segment[c] = true;
    }

    let mut routes: Vec<Route> = receiver
        .routes()
        .iter()
        .map(|r| {
            let kept: Vec<usize> = r.customers().iter().copied().filter(|&c| !in_segment[c]).collect();
            Route::from_customers(kept, instance.locations())
        })
        .filter(|r| !r.is_empty())
        .collect();

    let target = insert_block(&mut routes, segment, instance);
    let displaced = pop_overflow(&mut routes[target], &in_segment, instance);
    routes.retain(|r| !r.is_empty());

    for c in displaced {
        reinsert(&mut routes, c, instance);
    }
    combine_routes(&mut routes, instance);

    let child = Solution::from_routes(routes);
    if child.is_feasible(instance) {
        child
    } else {
        debug!(
            segment_len = segment.len(),
            "crossover repair failed, falling back to receiver copy"
        );
        receiver.clone()
    }
}

/// Inserts `segment` as a block at its cheapest position, ignoring
/// capacity. Returns the index of the route that received it.
fn insert_block(routes: &mut Vec<Route>, segment: &[usize], instance: &Instance) -> usize {
    let distances = instance.distances();
    let (Some(&head), Some(&tail)) = (segment.first(), segment.last()) else {
        return 0;
    };

    // (route, position); route == routes.len() means a new route
    let mut best = (routes.len(), 0);
    let mut best_cost = distances.get(0, head) + distances.get(tail, 0);

    for (r, route) in routes.iter().enumerate() {
        let stops = route.customers();
        for pos in 0..=stops.len() {
            let prev = if pos == 0 { 0 } else { stops[pos - 1] };
            let next = stops.get(pos).copied().unwrap_or(0);
            let cost = distances.get(prev, head) + distances.get(tail, next)
                - distances.get(prev, next);
            if cost < best_cost {
                best_cost = cost;
                best = (r, pos);
            }
        }
    }

    let (r, pos) = best;
    if r == routes.len() {
        routes.push(Route::new());
    }
    let stops = routes[r].customers();
    let mut merged = Vec::with_capacity(stops.len() + segment.len());
    merged.extend_from_slice(&stops[..pos]);
    merged.extend_from_slice(segment);
    merged.extend_from_slice(&stops[pos..]);
    routes[r] = Route::from_customers(merged, instance.locations());
    r
}

/// Removes non-segment customers from the back of `route` until it fits.
fn pop_overflow(route: &mut Route, in_segment: &[bool], instance: &Instance) -> Vec<usize> {
    let mut displaced = Vec::new();
    while !route.is_feasible(instance.capacity()) {
        let Some(pos) = route.customers().iter().rposition(|&c| !in_segment[c]) else {
            break;
        };
        let c = route.customers()[pos];
        displaced.push(route.remove(pos, instance.demand(c)));
    }
    displaced
}

/// Inserts `customer` at its cheapest feasible position, or on a new route.
fn reinsert(routes: &mut Vec<Route>, customer: usize, instance: &Instance) {
    let demand = instance.demand(customer);
    let mut best: Option<(usize, usize, f64)> = None;

    for (r, route) in routes.iter().enumerate() {
        if !route.fits(demand, instance.capacity()) {
            continue;
        }
        for pos in 0..=route.len() {
            let cost = route.insertion_cost(pos, customer, instance.distances());
            if best.map_or(true, |(_, _, c)| cost < c) {
                best = Some((r, pos, cost));
            }
        }
    }

    match best {
        Some((r, pos, _)) => routes[r].insert(pos, customer, demand),
        None => routes.push(Route::from_customers(vec![customer], instance.locations())),
    }
}

/// Repeatedly joins the pair of routes whose end-to-end concatenation
/// saves the most distance, while capacity allows.
pub(crate) fn combine_routes(routes: &mut Vec<Route>, instance: &Instance) {
    let distances = instance.distances();
    loop {
        let mut best: Option<(usize, usize, Route, f64)> = None;

        for i in 0..routes.len() {
            for j in (i + 1)..routes.len() {
                let (a, b) = (&routes[i], &routes[j]);
                if a.demand() + b.demand() > i64::from(instance.capacity()) {
                    continue;
                }
                let (Some(a_first), Some(a_last), Some(b_first), Some(b_last)) =
                    (a.first(), a.last(), b.first(), b.last())
                else {
                    continue;
                };

                let joins = [
                    (a_last, b_first, false, false),
                    (a_last, b_last, false, true),
                    (a_first, b_first, true, false),
                    (a_first, b_last, true, true),
                ];
                for (left_end, right_start, rev_a, rev_b) in joins {
                    let gain = distances.saving(left_end, right_start);
                    if gain <= 1e-10 || best.as_ref().is_some_and(|(_, _, _, g)| gain <= *g) {
                        continue;
                    }
                    let left = if rev_a { a.reversed() } else { a.clone() };
                    let right = if rev_b { b.reversed() } else { b.clone() };
                    if let Some(merged) = Route::merge(&left, &right, instance.capacity()) {
                        best = Some((i, j, merged, gain));
                    }
                }
            }
        }

        let Some((i, j, merged, _)) = best else {
            return;
        };
        routes[i] = merged;
        routes.remove(j);
    }
}

/// Applies one random capacity-respecting move to `solution`.
///
/// Returns `false` and leaves `solution` unchanged when `max_attempts`
/// draws all fail.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_cvrp::constructive::clarke_wright_savings;
/// use u_cvrp::ga::mutate;
/// use u_cvrp::models::Instance;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// let instance = Instance::random(10, 0.0, 50.0, 4, &mut rng).unwrap();
/// let mut solution = clarke_wright_savings(&instance).unwrap();
///
/// mutate(&mut solution, &instance, 10, &mut rng);
/// assert!(solution.is_feasible(&instance));
/// ```
pub fn mutate<R: Rng>(
    solution: &mut Solution,
    instance: &Instance,
    max_attempts: usize,
    rng: &mut R,
) -> bool {
    for _ in 0..max_attempts {
        let applied = match rng.random_range(0..3) {
            0 => swap(solution, instance, rng),
            1 => reverse(solution, rng),
            _ => relocate(solution, instance, rng),
        };
        if applied {
            return true;
        }
    }
    debug!(max_attempts, "mutation found no feasible move");
    false
}

/// Uniformly picks a visit, returned as (route, position).
fn pick_visit<R: Rng>(solution: &Solution, rng: &mut R) -> Option<(usize, usize)> {
    let total = solution.num_served();
    if total == 0 {
        return None;
    }
    let mut k = rng.random_range(0..total);
    for (r, route) in solution.routes().iter().enumerate() {
        if k < route.len() {
            return Some((r, k));
        }
        k -= route.len();
    }
    None
}

fn swap<R: Rng>(solution: &mut Solution, instance: &Instance, rng: &mut R) -> bool {
    let (Some((r1, p1)), Some((r2, p2))) = (pick_visit(solution, rng), pick_visit(solution, rng))
    else {
        return false;
    };
    if (r1, p1) == (r2, p2) {
        return false;
    }

    let routes = solution.routes_mut();
    if r1 == r2 {
        routes[r1].customers_mut().swap(p1, p2);
        return true;
    }

    let a = routes[r1].customers()[p1];
    let b = routes[r2].customers()[p2];
    let (da, db) = (instance.demand(a), instance.demand(b));
    let cap = i64::from(instance.capacity());
    let shift = i64::from(db) - i64::from(da);
    if routes[r1].demand() + shift > cap || routes[r2].demand() - shift > cap {
        return false;
    }

    routes[r1].remove(p1, da);
    routes[r1].insert(p1, b, db);
    routes[r2].remove(p2, db);
    routes[r2].insert(p2, a, da);
    true
}

fn reverse<R: Rng>(solution: &mut Solution, rng: &mut R) -> bool {
    let eligible: Vec<usize> = solution
        .routes()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.len() >= 2)
        .map(|(i, _)| i)
        .collect();
    if eligible.is_empty() {
        return false;
    }

    let route = &mut solution.routes_mut()[eligible[rng.random_range(0..eligible.len())]];
    let len = route.len();
    let i = rng.random_range(0..len - 1);
    let j = rng.random_range(i + 1..len);
    route.customers_mut()[i..=j].reverse();
    true
}

fn relocate<R: Rng>(solution: &mut Solution, instance: &Instance, rng: &mut R) -> bool {
    let n_routes = solution.num_routes();
    if n_routes < 2 {
        return false;
    }
    let Some((from, pos)) = pick_visit(solution, rng) else {
        return false;
    };
    let mut to = rng.random_range(0..n_routes - 1);
    if to >= from {
        to += 1;
    }

    let routes = solution.routes_mut();
    let c = routes[from].customers()[pos];
    let demand = instance.demand(c);
    if !routes[to].fits(demand, instance.capacity()) {
        return false;
    }

    let at = rng.random_range(0..=routes[to].len());
    routes[from].remove(pos, demand);
    routes[to].insert(at, c, demand);
    if routes[from].is_empty() {
        routes.remove(from);
    }
    true
}
