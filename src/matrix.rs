//! Triplet-list sparse matrix with [`Extensor`] entries.

use crate::error::{Error, Result};
use crate::extensor::Extensor;
use crate::graph::Adjacency;

/// Sparse `nrows × ncols` matrix of extensors in COO form.
///
/// Only non-zero entries are stored, as `(row, col, value)` triples in
/// row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct CodedMatrix {
    nrows: usize,
    ncols: usize,
    entries: Vec<(usize, usize, Extensor)>,
}

impl CodedMatrix {
    /// Substitute the coding of each source vertex into the adjacency matrix.
    ///
    /// Entry `(i, j)` exists iff `adjacency[i][j] = 1` and holds `coding[i]`,
    /// so every edge leaving vertex `i` carries the same extensor. Rows whose
    /// coding is zero are omitted entirely.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless `coding.len()` equals
    /// the number of columns and covers every row.
    pub fn build(adjacency: &Adjacency, coding: &[Extensor]) -> Result<Self> {
        let (nrows, ncols) = (adjacency.nrows(), adjacency.ncols());
        if coding.len() != ncols {
            return Err(Error::DimensionMismatch {
                what: "coding vector",
                expected: ncols,
                found: coding.len(),
            });
        }
        if nrows > coding.len() {
            return Err(Error::DimensionMismatch {
                what: "adjacency rows",
                expected: coding.len(),
                found: nrows,
            });
        }

        let entries = adjacency
            .data()
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a != 0)
            .map(|(i, _)| (i / ncols, i % ncols))
            .filter(|&(row, _)| !coding[row].is_zero())
            .map(|(row, col)| (row, col, coding[row].clone()))
            .collect();

        Ok(CodedMatrix {
            nrows,
            ncols,
            entries,
        })
    }

    /// Sparse matrix from dense row-major values; zero values are skipped.
    pub fn from_values(nrows: usize, ncols: usize, values: Vec<Extensor>) -> Result<Self> {
        let expected = nrows.checked_mul(ncols).unwrap_or(usize::MAX);
        if values.len() != expected {
            return Err(Error::DimensionMismatch {
                what: "matrix values",
                expected,
                found: values.len(),
            });
        }

        let entries = values
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, v)| (i / ncols, i % ncols, v))
            .collect();

        Ok(CodedMatrix {
            nrows,
            ncols,
            entries,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns; input vectors to [`CodedMatrix::mul_vec`] must
    /// have this length.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Stored `(row, col, value)` triples.
    #[inline]
    pub fn entries(&self) -> &[(usize, usize, Extensor)] {
        &self.entries
    }

    /// Entry at `(i, j)`, if one is stored.
    pub fn get(&self, i: usize, j: usize) -> Option<&Extensor> {
        self.entries
            .iter()
            .find(|(r, c, _)| *r == i && *c == j)
            .map(|(_, _, v)| v)
    }

    /// Matrix–vector product over the exterior algebra.
    ///
    /// `result[row] = Σ value ∧ v[col]` over the stored entries of `row`;
    /// rows without entries come out as [`Extensor::zero`]. This extends
    /// every partial walk ending at `col` by the edge `row → col`.
    ///
    /// Fails with [`Error::DimensionMismatch`] on a vector of the wrong
    /// length and with [`Error::CoefficientOverflow`] if a coefficient leaves
    /// `i64`.
    pub fn mul_vec(&self, v: &[Extensor]) -> Result<Vec<Extensor>> {
        if v.len() != self.ncols {
            return Err(Error::DimensionMismatch {
                what: "vector",
                expected: self.ncols,
                found: v.len(),
            });
        }

        let mut res = vec![Extensor::zero(); self.nrows];
        for (row, col, value) in self.entries.iter() {
            res[*row] = res[*row].checked_add(&value.wedge(&v[*col])?)?;
        }

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(coeffs: &[i64], basis: &[Vec<u8>]) -> Extensor {
        Extensor::new(coeffs, basis).unwrap()
    }

    #[test]
    fn build_uses_row_coding() {
        let adj = Adjacency::new(2, 2, vec![1, 1, 0, 1]).unwrap();
        let coding = vec![ext(&[1], &[vec![1]]), ext(&[2], &[vec![2]])];
        let m = CodedMatrix::build(&adj, &coding).unwrap();

        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(0, 0), Some(&coding[0]));
        assert_eq!(m.get(0, 1), Some(&coding[0]));
        assert_eq!(m.get(1, 0), None);
        assert_eq!(m.get(1, 1), Some(&coding[1]));
    }

    #[test]
    fn build_skips_zero_codings() {
        let adj = Adjacency::new(2, 2, vec![1, 1, 1, 1]).unwrap();
        let coding = vec![ext(&[0], &[vec![1]]), ext(&[2], &[vec![2]])];
        let m = CodedMatrix::build(&adj, &coding).unwrap();
        assert_eq!(m.nnz(), 2);
        assert!(m.entries().iter().all(|(r, _, _)| *r == 1));
    }

    #[test]
    fn build_rejects_short_coding() {
        let adj = Adjacency::path(3);
        let coding = vec![Extensor::zero(); 2];
        assert!(matches!(
            CodedMatrix::build(&adj, &coding),
            Err(Error::DimensionMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn mul_vec_dimension_check() {
        let m = CodedMatrix::from_values(1, 2, vec![Extensor::zero(), Extensor::zero()]).unwrap();
        assert!(m.mul_vec(&[Extensor::zero()]).is_err());
        assert!(CodedMatrix::from_values(2, 2, vec![Extensor::zero()]).is_err());
    }

    #[test]
    fn empty_rows_are_zero() {
        let m = CodedMatrix::from_values(
            2,
            2,
            vec![ext(&[1], &[vec![1]]), Extensor::zero(), Extensor::zero(), Extensor::zero()],
        )
        .unwrap();
        let r = m.mul_vec(&[ext(&[1], &[vec![2]]), ext(&[1], &[vec![3]])]).unwrap();
        assert_eq!(r[0], ext(&[1], &[vec![1, 2]]));
        assert!(r[1].is_empty());
    }
}
