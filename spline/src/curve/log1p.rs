//! Logarithmic gain curve with a closed-form antiderivative.

use super::Curve;
use crate::transfer::GainCurve;
use curves_math::{Jet, Real};

/// `G(x) = 1 + scale * ln(1 + rate * x)`.
///
/// Monotone, smooth everywhere, and integrable in closed form, which makes
/// it the reference curve for the analytic path of the gain adapter and for
/// accuracy harnesses.
#[derive(Clone, Copy, Debug)]
pub struct Log1p {
    scale: f64,
    rate: f64,
}

impl Log1p {
    pub fn new(scale: f64, rate: f64) -> Self {
        debug_assert!(rate > 0.0);
        Self { scale, rate }
    }
}

impl Default for Log1p {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Curve for Log1p {
    fn eval<R: Real>(&self, x: R) -> R {
        let one = R::from_f64(1.0);
        one + R::from_f64(self.scale) * (one + R::from_f64(self.rate) * x).ln()
    }

    fn critical_points(&self) -> Vec<f64> {
        Vec::new()
    }

    fn at_zero(&self) -> Jet<f64> {
        Jet::new(0.0, 1.0)
    }
}

impl GainCurve for Log1p {
    fn value(&self, x: f64) -> f64 {
        self.eval(x)
    }

    fn antiderivative(&self, x: f64) -> Option<f64> {
        // int (1 + s ln(1 + rx)) dx = x + (s/r)((1 + rx) ln(1 + rx) - rx)
        let rx = self.rate * x;
        let inner = (1.0 + rx) * (1.0 + rx).ln() - rx;
        Some(x + self.scale / self.rate * inner)
    }

    fn critical_points(&self) -> Vec<f64> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antiderivative_differentiates_back_to_the_gain() {
        let curve = Log1p::new(0.7, 1.3);
        for x in [0.1, 1.0, 5.0, 50.0] {
            let h = 1e-6;
            let f0 = curve.antiderivative(x - h).unwrap();
            let f1 = curve.antiderivative(x + h).unwrap();
            let numeric = (f1 - f0) / (2.0 * h);
            let direct = curve.value(x);
            assert!(
                (numeric - direct).abs() < 1e-6 * direct.abs().max(1.0),
                "x = {x}: {numeric} vs {direct}"
            );
        }
    }

    #[test]
    fn antiderivative_vanishes_at_zero() {
        assert_eq!(Log1p::default().antiderivative(0.0), Some(0.0));
    }
}
