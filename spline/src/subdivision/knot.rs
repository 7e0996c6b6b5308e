//! Spline knots.

use curves_math::Jet;

/// A quantized position paired with the target function's jet there.
///
/// `v` lies on the Q8.24 knot grid; `y` carries `{T(v), T'(v)}`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knot {
    pub v: f64,
    pub y: Jet<f64>,
}

impl Knot {
    pub fn new(v: f64, y: Jet<f64>) -> Self {
        Self { v, y }
    }

    pub fn is_finite(&self) -> bool {
        self.v.is_finite() && self.y.a.is_finite() && self.y.v.is_finite()
    }
}
