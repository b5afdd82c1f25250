//! Walk sums: push a coding vector through the coded adjacency matrix.
//!
//! For a coding `ξ` and coded matrix `A` (row `i` carrying `ξ(i)`), the walk
//! sum is
//!
//! ```text
//! f(G, ξ) = (1 1 … 1) · A^(k-1) · (ξ(v_1), …, ξ(v_n))^T
//! ```
//!
//! which expands to `Σ_walks ξ(w_1) ∧ ξ(w_2) ∧ … ∧ ξ(w_k)`. Walks that
//! revisit a vertex vanish by nilpotency, so only k-paths survive.

use crate::coding;
use crate::error::{Error, Result};
use crate::extensor::Extensor;
use crate::graph::Adjacency;
use crate::matrix::CodedMatrix;

/// Apply `matrix` `k - 1` times to `coding` and add up the components.
///
/// `k == 1` applies the matrix zero times (every vertex is a walk of one
/// vertex). `k == 0` is rejected with [`Error::InvalidWalkLength`];
/// coefficients leaving `i64` abort with [`Error::CoefficientOverflow`].
pub fn walk_sum(matrix: &CodedMatrix, coding: &[Extensor], k: usize) -> Result<Extensor> {
    if k == 0 {
        return Err(Error::InvalidWalkLength { k });
    }

    let mut current = coding.to_vec();
    for _ in 1..k {
        current = matrix.mul_vec(&current)?;
    }

    current
        .iter()
        .try_fold(Extensor::zero(), |acc, x| acc.checked_add(x))
}

/// Raw trial value: the coefficient sum of [`walk_sum`].
pub fn compute_walk_sum(matrix: &CodedMatrix, coding: &[Extensor], k: usize) -> Result<i64> {
    walk_sum(matrix, coding, k)?.coefficient_sum()
}

/// Decide whether `adjacency` contains a path on `k` distinct vertices.
///
/// Uses the deterministic Vandermonde coding: every k-path contributes the
/// square of a non-zero Vandermonde determinant, and all contributions share
/// one sign, so the walk sum is non-zero exactly when a k-path exists.
/// Coefficients grow like `n^(k(k-1))`; on graphs where they leave `i64`
/// the call fails with [`Error::CoefficientOverflow`] rather than guessing.
pub fn has_path(adjacency: &Adjacency, k: usize) -> Result<bool> {
    let coding = coding::vandermonde(adjacency.num_vertices(), k)?;
    let matrix = CodedMatrix::build(adjacency, &coding)?;
    Ok(!walk_sum(&matrix, &coding, k)?.is_zero())
}
