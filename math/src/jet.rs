//! Autodifferentiating 1-jets.
//!
//! A [`Jet`] carries a primal value together with the tangent of the
//! computation that produced it. Arithmetic propagates the chain rule
//! exactly at the primal precision, so a curve written once against the
//! [`Real`] interface evaluates plainly on `f64` and autodifferentiates on
//! jets. Nesting `Jet<Jet<f64>>` with the seed `((x, 1), (1, 0))` yields
//! second derivatives in `result.v.v`.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Scalar interface shared by `f64` and jets.
///
/// For a plain scalar, `primal` is the value itself and the derivative
/// structure is zero, so the same formula serves both exact evaluation and
/// autodifferentiation.
pub trait Real:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lifts a constant: the tangent of a constant is zero.
    fn from_f64(value: f64) -> Self;

    /// The innermost primal value, all derivative structure stripped.
    fn primal(self) -> f64;

    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn powf(self, exponent: f64) -> Self;
    fn tanh(self) -> Self;
    fn abs(self) -> Self;
    fn copysign(self, sign: Self) -> Self;
}

impl Real for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn primal(self) -> f64 {
        self
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }

    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }

    #[inline]
    fn powf(self, exponent: f64) -> Self {
        f64::powf(self, exponent)
    }

    #[inline]
    fn tanh(self) -> Self {
        f64::tanh(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn copysign(self, sign: Self) -> Self {
        f64::copysign(self, sign)
    }
}

/// An ordered pair `(a, v)`: primal and tangent.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "T: Clone"),
    Copy(bound = "T: Copy"),
    Debug(bound = "T: core::fmt::Debug"),
    Default(bound = "T: Default"),
    PartialEq(bound = "T: PartialEq")
)]
pub struct Jet<T> {
    /// Primal value.
    pub a: T,
    /// Tangent.
    pub v: T,
}

impl<T: Real> Jet<T> {
    #[inline]
    pub fn new(a: T, v: T) -> Self {
        Self { a, v }
    }

    /// A constant: zero tangent.
    #[inline]
    pub fn constant(a: T) -> Self {
        Self {
            a,
            v: T::from_f64(0.0),
        }
    }

    /// The variable of differentiation: unit tangent.
    #[inline]
    pub fn variable(a: T) -> Self {
        Self {
            a,
            v: T::from_f64(1.0),
        }
    }
}

impl Jet<Jet<f64>> {
    /// Seeds `((x, 1), (1, 0))` so `eval(seed).v.v` is the second
    /// derivative.
    #[inline]
    pub fn second_order_variable(x: f64) -> Self {
        Self {
            a: Jet::variable(x),
            v: Jet::constant(1.0),
        }
    }
}

impl<T: Real> Add for Jet<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            a: self.a + rhs.a,
            v: self.v + rhs.v,
        }
    }
}

impl<T: Real> Sub for Jet<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            a: self.a - rhs.a,
            v: self.v - rhs.v,
        }
    }
}

impl<T: Real> Mul for Jet<T> {
    type Output = Self;

    /// Product rule: `(a1*a2, a1*v2 + v1*a2)`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            a: self.a * rhs.a,
            v: self.a * rhs.v + self.v * rhs.a,
        }
    }
}

impl<T: Real> Div for Jet<T> {
    type Output = Self;

    /// Quotient rule: `(a1/a2, (v1*a2 - a1*v2) / a2^2)`.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self {
            a: self.a / rhs.a,
            v: (self.v * rhs.a - self.a * rhs.v) / (rhs.a * rhs.a),
        }
    }
}

impl<T: Real> Neg for Jet<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            a: -self.a,
            v: -self.v,
        }
    }
}

impl<T: Real> Real for Jet<T> {
    #[inline]
    fn from_f64(value: f64) -> Self {
        Self::constant(T::from_f64(value))
    }

    #[inline]
    fn primal(self) -> f64 {
        self.a.primal()
    }

    #[inline]
    fn exp(self) -> Self {
        let e = self.a.exp();
        Self {
            a: e,
            v: e * self.v,
        }
    }

    #[inline]
    fn ln(self) -> Self {
        Self {
            a: self.a.ln(),
            v: self.v / self.a,
        }
    }

    #[inline]
    fn powf(self, exponent: f64) -> Self {
        Self {
            a: self.a.powf(exponent),
            v: T::from_f64(exponent) * self.a.powf(exponent - 1.0) * self.v,
        }
    }

    #[inline]
    fn tanh(self) -> Self {
        let t = self.a.tanh();
        Self {
            a: t,
            v: (T::from_f64(1.0) - t * t) * self.v,
        }
    }

    #[inline]
    fn abs(self) -> Self {
        let flipped = self.a.abs();
        Self {
            a: flipped,
            v: if flipped == self.a { self.v } else { -self.v },
        }
    }

    #[inline]
    fn copysign(self, sign: Self) -> Self {
        let flipped = self.a.copysign(sign.a);
        Self {
            a: flipped,
            v: if flipped == self.a { self.v } else { -self.v },
        }
    }
}
