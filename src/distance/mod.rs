//! Travel distance matrices.
//!
//! Provides the dense great-circle distance matrix consumed by the
//! routing model.

mod matrix;

pub use matrix::DistanceMatrix;
