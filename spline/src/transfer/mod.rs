//! Adapters from user-interpreted curves to the transfer function `T(x)`.
//!
//! The subdivider approximates `T`; these adapters produce `{T(x), T'(x)}`
//! jets from a curve interpreted as sensitivity (`T = x * S(x)`) or as gain
//! (`T = integral of G`).

mod from_gain;
mod from_sensitivity;
mod shaped;

pub use self::from_gain::FromGain;
pub use self::from_sensitivity::FromSensitivity;
pub use self::shaped::ShapedTransfer;

use curves_math::Jet;

/// `{T(x), T'(x)}` over the spline's reference domain.
pub trait TransferFunction {
    fn eval(&self, x: f64) -> Jet<f64>;

    /// Domain points of reduced smoothness, filtered to `<= domain_max`.
    fn critical_points(&self, domain_max: f64) -> Vec<f64>;
}

/// A curve interpreted as gain.
pub trait GainCurve {
    fn value(&self, x: f64) -> f64;

    /// Closed-form antiderivative, when the family has one.
    fn antiderivative(&self, _x: f64) -> Option<f64> {
        None
    }

    fn critical_points(&self) -> Vec<f64> {
        Vec::new()
    }
}
