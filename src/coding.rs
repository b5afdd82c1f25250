//! Per-vertex codings: one lifted extensor for every vertex of the graph.
//!
//! A coding for walk length `k` maps vertex `v` to `lift(ξ(v), k)` where
//! `ξ(v) = Σ_{i=1..k} c_i(v) e_i` is a grade-1 extensor over the first block
//! of generators. After lifting, every coding lives over `e_1..e_2k`, so a
//! walk of `k` vertices lands exactly on the top blade `e_1 ∧ … ∧ e_2k` and
//! any walk that revisits a vertex cancels.

use rand::Rng;

use crate::error::{Error, Result};
use crate::extensor::Extensor;
use crate::monomial::{Monomial, MAX_BASIS_INDEX};

/// Largest walk length whose `2k` generators fit in indices `1..=31`.
pub const MAX_WALK_LENGTH: usize = (MAX_BASIS_INDEX - 1) / 2;

/// Random ±1 coding.
///
/// For each vertex, `k` independent fair signs are drawn from `rng` and
/// placed on `e_1..e_k` before lifting. The squared determinant of a random
/// sign matrix has expectation `k!`, which is what makes the walk sum an
/// unbiased estimator of the k-path count.
///
/// Fails with [`Error::InvalidWalkLength`] for `k == 0` and with
/// [`Error::BasisIndexTooLarge`] for `k > MAX_WALK_LENGTH`.
pub fn bernoulli<R: Rng>(n: usize, k: usize, rng: &mut R) -> Result<Vec<Extensor>> {
    if k == 0 {
        return Err(Error::InvalidWalkLength { k });
    }

    let mut res = Vec::with_capacity(n);
    for _ in 0..n {
        let terms = (1..=k)
            .map(|i| {
                let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
                Ok((basis(i)?, sign))
            })
            .collect::<Result<Vec<_>>>()?;
        res.push(Extensor::from_terms(terms)?.lift(k)?);
    }

    Ok(res)
}

/// Deterministic Vandermonde coding `v ↦ lift(Σ_{i<k} v^i e_{i+1}, k)` for
/// vertex numbers `v = 1..=n`.
///
/// Distinct vertices give linearly independent rows, so a walk visiting `k`
/// distinct vertices never cancels to zero on its own. Powers that leave
/// `i64` fail with [`Error::CoefficientOverflow`].
pub fn vandermonde(n: usize, k: usize) -> Result<Vec<Extensor>> {
    if k == 0 {
        return Err(Error::InvalidWalkLength { k });
    }

    let mut res = Vec::with_capacity(n);
    for v in 1..=n as i64 {
        let mut terms = Vec::with_capacity(k);
        for i in 1..=k {
            let power = v
                .checked_pow((i - 1) as u32)
                .ok_or(Error::CoefficientOverflow { op: "vandermonde" })?;
            terms.push((basis(i)?, power));
        }
        res.push(Extensor::from_terms(terms)?.lift(k)?);
    }

    Ok(res)
}

fn basis(i: usize) -> Result<Monomial> {
    if i >= MAX_BASIS_INDEX {
        return Err(Error::BasisIndexTooLarge { index: i });
    }
    Monomial::single(i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bernoulli_coefficients_are_signs() {
        let mut rng = StdRng::seed_from_u64(7);
        let coding = bernoulli(5, 3, &mut rng).unwrap();
        assert_eq!(coding.len(), 5);
        for x in &coding {
            // (Σ s_i e_i) ∧ (Σ s_j e_{j+3}): one term s_i s_j per pair (i, j).
            assert_eq!(x.len(), 9);
            for (m, c) in x.iter() {
                assert_eq!(m.count(), 2);
                assert!(c == 1 || c == -1, "coefficient {} is not a sign", c);
                assert!(m.ordered_indices().iter().all(|&i| (1..=6).contains(&i)));
            }
        }
    }

    #[test]
    fn bernoulli_is_seeded() {
        let a = bernoulli(4, 4, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = bernoulli(4, 4, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn walk_length_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            bernoulli(2, 0, &mut rng),
            Err(Error::InvalidWalkLength { k: 0 })
        ));
        assert!(bernoulli(1, MAX_WALK_LENGTH, &mut rng).is_ok());
        assert!(matches!(
            bernoulli(1, MAX_WALK_LENGTH + 1, &mut rng),
            Err(Error::BasisIndexTooLarge { .. })
        ));
    }

    #[test]
    fn vandermonde_overflow_is_an_error() {
        // Lifted coefficients reach v^28 at k = 15: fine for v = 4, not for v = 5.
        assert!(vandermonde(4, MAX_WALK_LENGTH).is_ok());
        assert!(matches!(
            vandermonde(23, MAX_WALK_LENGTH),
            Err(Error::CoefficientOverflow { .. })
        ));
    }

    #[test]
    fn lifted_vandermonde() {
        let coding = vandermonde(5, 5).unwrap();
        let prod = coding[1..]
            .iter()
            .try_fold(coding[0].clone(), |acc, x| acc.wedge(x))
            .unwrap();
        // det(V)^2 with V the 5×5 Vandermonde matrix on 1..=5: 288^2.
        let top = Monomial::from_indices(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
        assert_eq!(prod.coeff(top), 82944);
        assert_eq!(prod.pruned().len(), 1);
    }
}
