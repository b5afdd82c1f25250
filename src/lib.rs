//! Approximate k-path counting by extensor coding.
//!
//! Vertices are coded with random vectors lifted into an exterior algebra;
//! the walk sum over the coded adjacency matrix cancels every walk that
//! revisits a vertex, leaving a quantity whose expectation is `k!` times the
//! number of k-paths.

pub mod coding;
pub mod error;
pub mod estimator;
pub mod extensor;
pub mod graph;
pub mod matrix;
pub mod monomial;
pub mod stats;
mod traits;
pub mod walk;

pub use coding::MAX_WALK_LENGTH;
pub use error::{Error, Result};
pub use estimator::{
    estimate_walk_count, estimate_with_config, EstimatorConfig, Termination, WalkEstimate,
};
pub use extensor::Extensor;
pub use graph::Adjacency;
pub use matrix::CodedMatrix;
pub use monomial::Monomial;
pub use walk::{compute_walk_sum, has_path, walk_sum};

#[cfg(feature = "parallel")]
pub use estimator::estimate_with_config_par;
