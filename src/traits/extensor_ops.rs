//! Operator sugar over the checked extensor arithmetic.
//!
//! # Panics
//!
//! Every operator panics when a coefficient leaves `i64`. Use
//! [`Extensor::checked_add`], [`Extensor::wedge`] and [`Extensor::scale`]
//! directly to get [`Error::CoefficientOverflow`](crate::Error) instead.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::error::Result;
use crate::extensor::Extensor;

#[inline]
fn checked(res: Result<Extensor>) -> Extensor {
    match res {
        Ok(x) => x,
        Err(e) => panic!("extensor operator: {}", e),
    }
}

// ──────────────────────────────────────────────
//  Addition / subtraction
// ──────────────────────────────────────────────

impl Add for &Extensor {
    type Output = Extensor;
    #[inline]
    fn add(self, rhs: &Extensor) -> Extensor {
        checked(self.checked_add(rhs))
    }
}

impl Add for Extensor {
    type Output = Extensor;
    #[inline]
    fn add(self, rhs: Extensor) -> Extensor {
        checked(self.checked_add(&rhs))
    }
}

impl Add<&Extensor> for Extensor {
    type Output = Extensor;
    #[inline]
    fn add(self, rhs: &Extensor) -> Extensor {
        checked(self.checked_add(rhs))
    }
}

impl AddAssign<&Extensor> for Extensor {
    #[inline]
    fn add_assign(&mut self, rhs: &Extensor) {
        *self = checked(self.checked_add(rhs));
    }
}

impl AddAssign for Extensor {
    #[inline]
    fn add_assign(&mut self, rhs: Extensor) {
        *self = checked(self.checked_add(&rhs));
    }
}

impl Neg for &Extensor {
    type Output = Extensor;
    #[inline]
    fn neg(self) -> Extensor {
        checked(self.scale(-1))
    }
}

impl Neg for Extensor {
    type Output = Extensor;
    #[inline]
    fn neg(self) -> Extensor {
        checked(self.scale(-1))
    }
}

impl Sub for &Extensor {
    type Output = Extensor;
    #[inline]
    fn sub(self, rhs: &Extensor) -> Extensor {
        checked(rhs.scale(-1).and_then(|r| self.checked_add(&r)))
    }
}

impl Sub for Extensor {
    type Output = Extensor;
    #[inline]
    fn sub(self, rhs: Extensor) -> Extensor {
        &self - &rhs
    }
}

// ──────────────────────────────────────────────
//  Wedge product and scalar multiplication
// ──────────────────────────────────────────────

impl Mul for &Extensor {
    type Output = Extensor;
    #[inline]
    fn mul(self, rhs: &Extensor) -> Extensor {
        checked(self.wedge(rhs))
    }
}

impl Mul for Extensor {
    type Output = Extensor;
    #[inline]
    fn mul(self, rhs: Extensor) -> Extensor {
        checked(self.wedge(&rhs))
    }
}

impl Mul<&Extensor> for Extensor {
    type Output = Extensor;
    #[inline]
    fn mul(self, rhs: &Extensor) -> Extensor {
        checked(self.wedge(rhs))
    }
}

impl Mul<i64> for &Extensor {
    type Output = Extensor;
    #[inline]
    fn mul(self, c: i64) -> Extensor {
        checked(self.scale(c))
    }
}

impl Mul<&Extensor> for i64 {
    type Output = Extensor;
    #[inline]
    fn mul(self, t: &Extensor) -> Extensor {
        checked(t.scale(self))
    }
}
