//! Arg-min, arg-max, and their composition.
//!
//! Accumulators that retain the extremum of a `(arg, value)` stream together
//! with the abscissa that produced it.

use core::fmt;
use num_traits::{Bounded, Signed};

/// Tracks `min @ arg`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArgMin<A, V> {
    pub value: V,
    pub arg: A,
}

impl<A: Default, V: Bounded> Default for ArgMin<A, V> {
    fn default() -> Self {
        Self {
            value: V::max_value(),
            arg: A::default(),
        }
    }
}

impl<A: Copy, V: Copy + PartialOrd> ArgMin<A, V> {
    #[inline]
    pub fn sample(&mut self, arg: A, value: V) {
        if value < self.value {
            self.value = value;
            self.arg = arg;
        }
    }
}

impl<A: fmt::Display, V: fmt::Display> fmt::Display for ArgMin<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.arg)
    }
}

/// Tracks `max @ arg`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArgMax<A, V> {
    pub value: V,
    pub arg: A,
}

impl<A: Default, V: Bounded> Default for ArgMax<A, V> {
    fn default() -> Self {
        Self {
            value: V::min_value(),
            arg: A::default(),
        }
    }
}

impl<A: Copy, V: Copy + PartialOrd> ArgMax<A, V> {
    #[inline]
    pub fn sample(&mut self, arg: A, value: V) {
        if self.value < value {
            self.value = value;
            self.arg = arg;
        }
    }
}

impl<A: fmt::Display, V: fmt::Display> fmt::Display for ArgMax<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.arg)
    }
}

/// Tracks signed min and max together, plus the maximum magnitude.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MinMax<A, V> {
    pub min: ArgMin<A, V>,
    pub max: ArgMax<A, V>,
}

impl<A: Default, V: Bounded> Default for MinMax<A, V> {
    fn default() -> Self {
        Self {
            min: ArgMin::default(),
            max: ArgMax::default(),
        }
    }
}

impl<A: Copy, V: Copy + PartialOrd + Signed> MinMax<A, V> {
    #[inline]
    pub fn sample(&mut self, arg: A, value: V) {
        self.min.sample(arg, value);
        self.max.sample(arg, value);
    }

    pub fn max_mag(&self) -> V {
        let min_mag = self.min.value.abs();
        let max_mag = self.max.value.abs();
        if min_mag < max_mag {
            max_mag
        } else {
            min_mag
        }
    }

    pub fn arg_max_mag(&self) -> A {
        if self.min.value.abs() < self.max.value.abs() {
            self.max.arg
        } else {
            self.min.arg
        }
    }
}

impl<A: fmt::Display, V: fmt::Display> fmt::Display for MinMax<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min = {}\nmax = {}", self.min, self.max)
    }
}
