//! Error type shared by the engine entry points and the history adapter.

use thiserror::Error;

/// Errors surfaced to callers of the engine.
///
/// Operator-level failures inside the genetic algorithm never appear here:
/// they fall back to a parent copy and the run continues.
#[derive(Debug, Error)]
pub enum CvrpError {
    /// The instance or configuration is malformed. Raised before any
    /// computation starts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A single customer cannot be served by any vehicle.
    #[error("customer {customer} demands {demand} but vehicle capacity is {capacity}")]
    Infeasible {
        /// Customer index (1-based, 0 is the depot).
        customer: usize,
        /// Demand of that customer.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },

    /// CSV encoding or decoding failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted history could not be interpreted.
    #[error("malformed history: {0}")]
    MalformedHistory(String),
}

impl CvrpError {
    /// Returns `true` for [`CvrpError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CvrpError::InvalidInput(_))
    }

    /// Returns `true` for [`CvrpError::Infeasible`].
    pub fn is_infeasible(&self) -> bool {
        matches!(self, CvrpError::Infeasible { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CvrpError>;
