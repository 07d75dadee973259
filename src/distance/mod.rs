//! Distance queries between the depot and customers.
//!
//! Provides a dense, memoized Euclidean distance matrix.

mod matrix;

pub use matrix::DistanceMatrix;
