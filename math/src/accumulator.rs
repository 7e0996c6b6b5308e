//! Kahan-compensated summation.

use core::ops::AddAssign;
use num_traits::Float;

/// Accumulates a sum while tracking the error of each addition and
/// reintroducing it in the next.
///
/// Drop-in replacement for a running `+=` chain read out at the end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompensatedAccumulator<T> {
    pub sum: T,
    pub compensation: T,
}

impl<T: Float> CompensatedAccumulator<T> {
    #[inline]
    pub fn value(self) -> T {
        self.sum + self.compensation
    }
}

impl<T: Float> AddAssign<T> for CompensatedAccumulator<T> {
    #[inline]
    fn add_assign(&mut self, value: T) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }
}
