//! Error taxonomy shared by the algebra, the matrix layer, the estimator and
//! the graph readers.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort an operation. No variant carries a partial
/// result.
#[derive(Debug, Error)]
pub enum Error {
    /// A basis index does not fit the 32-bit monomial encoding.
    #[error("basis index too large: {index} (monomials hold indices 0..32)")]
    BasisIndexTooLarge {
        /// The offending index (after any shift was applied).
        index: usize,
    },

    /// Coefficient and basis sequences passed to an extensor constructor differ in length.
    #[error("number of coefficients ({coeffs}) and basis blades ({bases}) must match")]
    ShapeMismatch {
        /// Number of coefficients supplied.
        coeffs: usize,
        /// Number of basis subsets supplied.
        bases: usize,
    },

    /// A matrix, vector or adjacency buffer has the wrong size.
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Which operand was malformed.
        what: &'static str,
        /// Size required by the operation.
        expected: usize,
        /// Size actually supplied.
        found: usize,
    },

    /// A dense adjacency buffer contains something other than 0 or 1.
    #[error("adjacency entry {index} is {value}, expected 0 or 1")]
    InvalidAdjacencyEntry {
        /// Linear (row-major) position of the entry.
        index: usize,
        /// The stored value.
        value: u8,
    },

    /// An `i64` coefficient left its range during extensor arithmetic.
    #[error("coefficient overflow in {op}")]
    CoefficientOverflow {
        /// The operation that overflowed.
        op: &'static str,
    },

    /// Walk length outside the supported range.
    #[error("invalid walk length k = {k}")]
    InvalidWalkLength {
        /// The requested walk length.
        k: usize,
    },

    /// Approximation error must be a positive finite number.
    #[error("approximation error must be positive and finite, got {epsilon}")]
    InvalidEpsilon {
        /// The requested approximation error.
        epsilon: f64,
    },

    /// A graph file could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number (0 for whole-file problems).
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A graph file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
