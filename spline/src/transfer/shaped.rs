//! Input shaping composed onto a transfer function.

use super::TransferFunction;
use crate::shaping::InputShaping;
use curves_math::Jet;

/// `T(U(v))`: shaping feeds the transfer function, and the chain rule
/// carries the derivative through: `d/dv T(U(v)) = T'(u) * U'(v)`.
///
/// This composition is what the spline builder approximates, so shaping
/// boundaries become knots alongside the curve's own critical points.
#[derive(Clone, Debug)]
pub struct ShapedTransfer<T> {
    shaping: InputShaping,
    transfer: T,
}

impl<T: TransferFunction> ShapedTransfer<T> {
    pub fn new(shaping: InputShaping, transfer: T) -> Self {
        Self { shaping, transfer }
    }

    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    pub fn shaping(&self) -> &InputShaping {
        &self.shaping
    }
}

impl<T: TransferFunction> TransferFunction for ShapedTransfer<T> {
    fn eval(&self, v: f64) -> Jet<f64> {
        let shaped = self.shaping.eval(Jet::variable(v));
        let inner = self.transfer.eval(shaped.a);
        Jet::new(inner.a, inner.v * shaped.v)
    }

    fn critical_points(&self, domain_max: f64) -> Vec<f64> {
        let mut points = self.shaping.critical_points();
        // The inner transfer's critical points live in shaped space; pull
        // them back to input velocity.
        for point in self.transfer.critical_points(f64::INFINITY) {
            points.push(self.shaping.inverse(point));
        }
        points.retain(|point| *point <= domain_max);
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }
}
