use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::error::{Error, Result};
use crate::monomial::Monomial;

/// Sparse element of the exterior (Grassmann) algebra with integer
/// coefficients.
///
/// Stored as a map from [`Monomial`] to coefficient. Every operation returns a
/// new value; operands are never mutated, so the same extensor may be shared
/// freely between matrix entries and vectors.
///
/// Zero-valued entries are allowed to survive addition and multiplication
/// (cancellation leaves them behind). Both [`is_zero`](Extensor::is_zero) and
/// equality read an explicit zero the same as an absent entry.
#[derive(Clone, Debug, Default)]
pub struct Extensor {
    data: HashMap<Monomial, i64>,
}

impl Extensor {
    /// Build an extensor from parallel coefficient and basis-subset slices.
    ///
    /// ```
    /// use extensor_coding::Extensor;
    /// // 3 e_1∧e_3 − 7 e_3
    /// let x = Extensor::new(&[3, -7], &[vec![1, 3], vec![3]]).unwrap();
    /// assert_eq!(x.len(), 2);
    /// ```
    ///
    /// Fails with [`Error::ShapeMismatch`] when the slices differ in length and
    /// with [`Error::BasisIndexTooLarge`] for indices `>= 32`. A basis subset
    /// given twice keeps the later coefficient.
    pub fn new<B: AsRef<[u8]>>(coeffs: &[i64], basis: &[B]) -> Result<Self> {
        if coeffs.len() != basis.len() {
            return Err(Error::ShapeMismatch {
                coeffs: coeffs.len(),
                bases: basis.len(),
            });
        }

        let mut data = HashMap::with_capacity(basis.len());
        for (&c, b) in coeffs.iter().zip(basis) {
            data.insert(Monomial::from_indices(b.as_ref())?, c);
        }

        Ok(Extensor { data })
    }

    /// Single-term extensor `coeff · e_index`.
    pub fn simple(coeff: i64, index: u8) -> Result<Self> {
        Self::from_terms([(Monomial::single(index)?, coeff)])
    }

    /// Collect `(monomial, coefficient)` pairs, summing repeated monomials.
    ///
    /// Fails with [`Error::CoefficientOverflow`] if a sum leaves `i64`.
    pub fn from_terms<I: IntoIterator<Item = (Monomial, i64)>>(terms: I) -> Result<Self> {
        let mut data = HashMap::new();
        for (m, c) in terms {
            accumulate(&mut data, m, c, "from_terms")?;
        }
        Ok(Extensor { data })
    }

    /// Scalar extensor `c · 1` on the empty blade.
    pub fn scalar(c: i64) -> Self {
        Extensor {
            data: HashMap::from([(Monomial::empty(), c)]),
        }
    }

    /// The additive identity (no entries).
    #[inline]
    pub fn zero() -> Self {
        Extensor::default()
    }

    /// True when every stored coefficient is zero (vacuously for no entries).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.values().all(|&c| c == 0)
    }

    /// Number of stored entries, explicit zeros included.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// No stored entries at all. Use `is_zero` for the algebraic test.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Coefficient of `m` (0 when absent).
    #[inline]
    pub fn coeff(&self, m: Monomial) -> i64 {
        self.data.get(&m).copied().unwrap_or(0)
    }

    /// Stored coefficients in unspecified order.
    pub fn coeffs(&self) -> Vec<i64> {
        self.data.values().copied().collect()
    }

    /// Sum of all stored coefficients.
    ///
    /// Fails with [`Error::CoefficientOverflow`] if the sum leaves `i64`.
    pub fn coefficient_sum(&self) -> Result<i64> {
        self.data.values().try_fold(0i64, |acc, &c| {
            acc.checked_add(c)
                .ok_or(Error::CoefficientOverflow { op: "coefficient_sum" })
        })
    }

    /// Iterate stored `(monomial, coefficient)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Monomial, i64)> + '_ {
        self.data.iter().map(|(&m, &c)| (m, c))
    }

    /// Copy without explicit zero entries.
    pub fn pruned(&self) -> Self {
        Extensor {
            data: self
                .data
                .iter()
                .filter(|&(_, &c)| c != 0)
                .map(|(&m, &c)| (m, c))
                .collect(),
        }
    }

    /// Coefficient-wise sum; monomials present in either operand appear in
    /// the result. Backs the `+` operators.
    ///
    /// Fails with [`Error::CoefficientOverflow`] if a coefficient leaves `i64`.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        let mut data = HashMap::with_capacity(self.data.len() + other.data.len());
        for (&m, &c) in self.data.iter().chain(other.data.iter()) {
            accumulate(&mut data, m, c, "add")?;
        }
        Ok(Extensor { data })
    }

    /// Multiply every coefficient by `c`.
    ///
    /// Fails with [`Error::CoefficientOverflow`] if a product leaves `i64`.
    pub fn scale(&self, c: i64) -> Result<Self> {
        let data = self
            .data
            .iter()
            .map(|(&m, &v)| {
                v.checked_mul(c)
                    .map(|p| (m, p))
                    .ok_or(Error::CoefficientOverflow { op: "scale" })
            })
            .collect::<Result<_>>()?;
        Ok(Extensor { data })
    }

    /// Exterior product `self ∧ other`.
    ///
    /// Only pairs of disjoint blades contribute (`e_i ∧ e_i = 0`); each
    /// contributes `sign · a · b` to the union blade, with the sign given by
    /// [`Monomial::wedge_sign`].
    ///
    /// Fails with [`Error::CoefficientOverflow`] if a coefficient leaves
    /// `i64`; no wrapped value is ever returned.
    pub fn wedge(&self, other: &Self) -> Result<Self> {
        let mut data = HashMap::with_capacity(self.data.len() * other.data.len());

        for (&ma, &ca) in self.data.iter() {
            for (&mb, &cb) in other.data.iter() {
                if !ma.is_disjoint(mb) {
                    continue;
                }
                let term = ca
                    .checked_mul(cb)
                    .and_then(|p| p.checked_mul(Monomial::wedge_sign(ma, mb)))
                    .ok_or(Error::CoefficientOverflow { op: "wedge" })?;
                accumulate(&mut data, ma.union(mb), term, "wedge")?;
            }
        }

        Ok(Extensor { data })
    }

    /// Extend into a second block of `k` generators: `self ∧ shift_k(self)`.
    ///
    /// `shift_k` moves every index of every blade up by `k`, so for a grade-1
    /// extensor over `e_1..e_k` the result lives over `e_1..e_2k`.
    ///
    /// Fails with [`Error::BasisIndexTooLarge`] if the shifted copy does not
    /// fit and with [`Error::CoefficientOverflow`] if a product coefficient
    /// leaves `i64`.
    pub fn lift(&self, k: usize) -> Result<Self> {
        let mut shifted = HashMap::with_capacity(self.data.len());
        for (&m, &c) in self.data.iter() {
            shifted.insert(m.shifted(k)?, c);
        }
        self.wedge(&Extensor { data: shifted })
    }
}

fn accumulate(
    data: &mut HashMap<Monomial, i64>,
    m: Monomial,
    c: i64,
    op: &'static str,
) -> Result<()> {
    let slot = data.entry(m).or_insert(0);
    *slot = slot
        .checked_add(c)
        .ok_or(Error::CoefficientOverflow { op })?;
    Ok(())
}

impl PartialEq for Extensor {
    fn eq(&self, other: &Self) -> bool {
        self.data.iter().all(|(&m, &c)| other.coeff(m) == c)
            && other.data.iter().all(|(&m, &c)| self.coeff(m) == c)
    }
}

impl Eq for Extensor {}

impl Display for Extensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms: Vec<(Monomial, i64)> = self.iter().filter(|&(_, c)| c != 0).collect();
        if terms.is_empty() {
            return write!(f, "0");
        }
        terms.sort_unstable_by_key(|&(m, _)| (m.count(), m.bits()));
        for (n, (m, c)) in terms.into_iter().enumerate() {
            if n > 0 {
                write!(f, " + ")?;
            }
            if m.is_empty() {
                write!(f, "{}", c)?;
            } else {
                write!(f, "{}{}", c, m)?;
            }
        }
        Ok(())
    }
}
