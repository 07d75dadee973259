//! Depot and customer locations.

use serde::{Deserialize, Serialize};

/// A point in the plane that a vehicle visits (or starts from).
///
/// Location 0 is the depot. Customers are numbered `1..=N` and carry a
/// demand, the number of packages they require (1 unless stated otherwise).
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Location;
///
/// let depot = Location::depot(0.0, 0.0);
/// assert_eq!(depot.index(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Location::customer(1, 3.0, 4.0);
/// assert_eq!(c.demand(), 1);
/// assert!((depot.distance_to(&c) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    index: usize,
    x: f64,
    y: f64,
    demand: i32,
}

impl Location {
    /// Creates a location with an explicit demand.
    pub fn new(index: usize, x: f64, y: f64, demand: i32) -> Self {
        Self { index, x, y, demand }
    }

    /// Creates the depot (index 0, no demand).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0)
    }

    /// Creates a customer with unit demand.
    pub fn customer(index: usize, x: f64, y: f64) -> Self {
        Self::new(index, x, y, 1)
    }

    /// Location index (0 = depot).
    pub fn index(&self) -> usize {
        self.index
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Packages required at this location.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.index == 0
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
