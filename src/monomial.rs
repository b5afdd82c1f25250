//! Basis blades of the exterior algebra encoded as 32-bit masks.
//!
//! A [`Monomial`] is a set of generator indices; bit `i` of the mask is set
//! iff `e_i` takes part in the blade. The empty monomial is the scalar unit.
//!
//! | mask (low bits first) | blade           |
//! |-----------------------|-----------------|
//! | `000…`                | 1               |
//! | `010…`                | e_1             |
//! | `011…`                | e_1 ∧ e_2       |
//! | `0101…`               | e_1 ∧ e_3       |

use std::fmt::{self, Display};

use crate::error::{Error, Result};

/// Number of generator indices a monomial can hold.
pub const MAX_BASIS_INDEX: usize = 32;

/// A set of basis-generator indices in `0..32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Monomial(u32);

impl Monomial {
    /// The empty blade (scalar part).
    #[inline]
    pub const fn empty() -> Self {
        Monomial(0)
    }

    /// Wrap a raw bit mask.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Monomial(bits)
    }

    /// Encode a set of indices. Duplicates collapse; order is irrelevant.
    ///
    /// Fails with [`Error::BasisIndexTooLarge`] for any index `>= 32`.
    pub fn from_indices(indices: &[u8]) -> Result<Self> {
        let mut bits = 0u32;
        for &i in indices {
            let i = i as usize;
            if i >= MAX_BASIS_INDEX {
                return Err(Error::BasisIndexTooLarge { index: i });
            }
            bits |= 1 << i;
        }
        Ok(Monomial(bits))
    }

    /// Single-generator blade `e_index`.
    pub fn single(index: u8) -> Result<Self> {
        Self::from_indices(&[index])
    }

    /// The raw mask.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Indices present in either blade.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Monomial(self.0 | other.0)
    }

    /// Indices present in both blades.
    #[inline]
    pub const fn intersect(self, other: Self) -> Self {
        Monomial(self.0 & other.0)
    }

    /// Number of generators (the grade of the blade).
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// True for the scalar blade.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// No shared index, i.e. the wedge of the two blades is non-zero.
    #[inline]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Whether `e_index` takes part. Indices `>= 32` are never contained.
    #[inline]
    pub fn contains(self, index: u8) -> bool {
        (index as usize) < MAX_BASIS_INDEX && self.0 & (1 << index) != 0
    }

    /// Iterate the indices in ascending order without allocating.
    #[inline]
    pub fn indices(self) -> Indices {
        Indices { rest: self.0 }
    }

    /// Indices in ascending order.
    pub fn ordered_indices(self) -> Vec<u8> {
        self.indices().collect()
    }

    /// Move every index up by `by`.
    ///
    /// Fails with [`Error::BasisIndexTooLarge`] if the highest index would
    /// leave the 32-bit range.
    pub fn shifted(self, by: usize) -> Result<Self> {
        if self.0 == 0 {
            return Ok(self);
        }
        let top = (31 - self.0.leading_zeros()) as usize;
        if top + by >= MAX_BASIS_INDEX {
            return Err(Error::BasisIndexTooLarge { index: top + by });
        }
        Ok(Monomial(self.0 << by))
    }

    /// Sign of `a ∧ b` for disjoint blades.
    ///
    /// Counts the inversions needed to sort the ascending indices of `a`
    /// followed by the ascending indices of `b`: two cursors walk both
    /// lists and every time the head of `b` is smaller than the head of `a`
    /// it must jump over all remaining indices of `a`. Even parity is `+1`,
    /// odd parity `-1`.
    ///
    /// Shared indices never produce an inversion, so `wedge_sign(x, x) == 1`;
    /// the product itself vanishes and is filtered out before the sign is used.
    pub fn wedge_sign(a: Self, b: Self) -> i64 {
        let mut ia = a.indices().peekable();
        let mut remaining_a = a.count();
        let mut inversions = 0u32;

        for jb in b.indices() {
            while let Some(&ja) = ia.peek() {
                if ja <= jb {
                    ia.next();
                    remaining_a -= 1;
                } else {
                    break;
                }
            }
            if remaining_a == 0 {
                break;
            }
            inversions += remaining_a;
        }

        if inversions % 2 == 0 {
            1
        } else {
            -1
        }
    }
}

impl Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        write!(f, "e_{{")?;
        for (n, i) in self.indices().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", i)?;
        }
        write!(f, "}}")
    }
}

/// Ascending iterator over the indices of a [`Monomial`].
#[derive(Clone, Debug)]
pub struct Indices {
    rest: u32,
}

impl Iterator for Indices {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.rest == 0 {
            return None;
        }
        let i = self.rest.trailing_zeros();
        self.rest &= self.rest - 1;
        Some(i as u8)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Indices {}
