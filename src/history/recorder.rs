//! Append-only record of solution snapshots.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{CvrpError, Result};
use crate::models::{Instance, Location, Route, Solution, ViolationType};

/// One recorded solution, stored by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    solution: Solution,
    total_distance: f64,
}

impl Snapshot {
    /// The recorded solution.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Total distance of the recorded solution.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Routes as customer index lists.
    pub fn route_lists(&self) -> Vec<Vec<usize>> {
        self.solution.route_lists()
    }
}

/// The output artifact of a solve: every location plus the ordered
/// sequence of snapshots taken while solving.
///
/// Snapshots are cloned on record, so later changes to a live solution never
/// reach the history. Order is exactly the order of [`History::record`]
/// calls.
///
/// # Examples
///
/// ```
/// use u_cvrp::history::History;
/// use u_cvrp::models::{Instance, Route, Solution};
///
/// let instance = Instance::from_coordinates(0.0, 0.0, &[1.0, 2.0], &[0.0, 0.0], 2).unwrap();
/// let mut history = History::new(instance.locations().to_vec());
///
/// let mut live = Solution::from_routes(vec![
///     Route::from_customers(vec![1], instance.locations()),
///     Route::from_customers(vec![2], instance.locations()),
/// ]);
/// history.record(&live, instance.distances());
/// live = Solution::from_routes(vec![Route::from_customers(vec![1, 2], instance.locations())]);
/// history.record(&live, instance.distances());
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.snapshots()[0].route_lists(), vec![vec![1], vec![2]]);
/// assert_eq!(history.best_distances(), vec![6.0, 4.0]);
/// ```
///
/// Serialized form is the location list plus one `[route][stop]` list per
/// snapshot. Deserializing goes through [`History::from_route_lists`], so a
/// loaded history always satisfies the partition invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "HistoryRecord", try_from = "HistoryRecord")]
pub struct History {
    locations: Vec<Location>,
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Creates an empty history over the given locations (index 0 = depot).
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            snapshots: Vec::new(),
        }
    }

    /// Rebuilds a history from plain route lists, recomputing route demands
    /// and distances from `locations`.
    ///
    /// Every snapshot must visit each customer exactly once on non-empty
    /// routes. Capacity is not checked, since it is not part of the record.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::MalformedHistory`] if the locations are invalid
    /// or a snapshot breaks the partition.
    pub fn from_route_lists(
        locations: Vec<Location>,
        snapshots: Vec<Vec<Vec<usize>>>,
    ) -> Result<Self> {
        let instance = Instance::from_locations(locations, i32::MAX)
            .map_err(|e| CvrpError::MalformedHistory(e.to_string()))?;
        let n = instance.num_customers();
        let mut history = History::new(instance.locations().to_vec());

        for (k, lists) in snapshots.into_iter().enumerate() {
            if let Some(&c) = lists.iter().flatten().find(|&&c| c == 0 || c > n) {
                return Err(CvrpError::MalformedHistory(format!(
                    "snapshot {k} references unknown customer {c}"
                )));
            }
            let solution = Solution::from_routes(
                lists
                    .into_iter()
                    .map(|customers| Route::from_customers(customers, instance.locations()))
                    .collect(),
            );
            let broken = solution
                .violations(&instance)
                .into_iter()
                .find(|v| !matches!(v.kind, ViolationType::CapacityExceeded { .. }));
            if let Some(v) = broken {
                return Err(CvrpError::MalformedHistory(format!(
                    "snapshot {k} is not a partition: {:?}",
                    v.kind
                )));
            }
            history.record(&solution, instance.distances());
        }
        Ok(history)
    }

    /// Appends a copy of `solution`.
    pub fn record(&mut self, solution: &Solution, distances: &DistanceMatrix) {
        self.snapshots.push(Snapshot {
            total_distance: solution.total_distance(distances),
            solution: solution.clone(),
        });
    }

    /// All locations, depot first.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Recorded snapshots in order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// The solution of the most recent snapshot.
    pub fn final_solution(&self) -> Option<&Solution> {
        self.last().map(Snapshot::solution)
    }

    /// Total distance of every snapshot, in order.
    pub fn best_distances(&self) -> Vec<f64> {
        self.snapshots.iter().map(Snapshot::total_distance).collect()
    }

    /// Every snapshot as route lists: `[snapshot][route][stop]`.
    pub fn route_lists(&self) -> Vec<Vec<Vec<usize>>> {
        self.snapshots.iter().map(Snapshot::route_lists).collect()
    }
}

#[derive(Serialize, Deserialize)]
struct HistoryRecord {
    locations: Vec<Location>,
    snapshots: Vec<Vec<Vec<usize>>>,
}

impl From<History> for HistoryRecord {
    fn from(history: History) -> Self {
        Self {
            snapshots: history.route_lists(),
            locations: history.locations,
        }
    }
}

impl TryFrom<HistoryRecord> for History {
    type Error = CvrpError;

    fn try_from(record: HistoryRecord) -> Result<Self> {
        History::from_route_lists(record.locations, record.snapshots)
    }
}
