use num_traits::{One, Zero};

use crate::extensor::Extensor;

impl Zero for Extensor {
    #[inline]
    fn zero() -> Self {
        Extensor::default()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Extensor::is_zero(self)
    }
}

impl One for Extensor {
    /// The scalar unit: coefficient 1 on the empty blade.
    #[inline]
    fn one() -> Self {
        Extensor::scalar(1)
    }
}
