//! Transfer function from a curve interpreted as sensitivity.

use super::TransferFunction;
use crate::curve::Curve;
use curves_math::Jet;

/// Computes `{T(x), G(x)}` where `T(x) = x * S(x)` and `G = T'`.
///
/// Near zero the product rule collapses: `S'` may diverge there (root-like
/// curves), but for this curve set the divergence is strictly slower than
/// `O(1/x)`, so `x * S'(x)` vanishes and `T'(0) = S(0)`. That limit comes
/// from the curve's `at_zero` hook instead of the closed form.
#[derive(Clone, Copy, Debug)]
pub struct FromSensitivity<C> {
    curve: C,
}

impl<C: Curve> FromSensitivity<C> {
    pub fn new(curve: C) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }
}

impl<C: Curve> TransferFunction for FromSensitivity<C> {
    fn eval(&self, x: f64) -> Jet<f64> {
        if x < f64::EPSILON {
            // Evaluate the curve indirectly.
            return self.curve.at_zero();
        }

        // By definition T(x) = x S(x); by the product rule G = S + x S'.
        let jet = self.curve.eval(Jet::variable(x));
        Jet::new(x * jet.a, jet.a + x * jet.v)
    }

    fn critical_points(&self, domain_max: f64) -> Vec<f64> {
        let mut points = self.curve.critical_points();
        points.retain(|point| *point <= domain_max);
        points
    }
}
