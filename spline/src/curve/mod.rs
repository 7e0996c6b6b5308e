//! Parametric curve families.

use curves_math::{Jet, Real};

mod log1p;
mod synchronous;

pub use self::log1p::Log1p;
pub use self::synchronous::{Synchronous, SynchronousConfig};

/// A parametric curve the transfer-function adapters consume.
///
/// `eval` is generic over [`Real`], so one body serves exact evaluation
/// (`f64`), first derivatives (`Jet<f64>`), and second derivatives
/// (`Jet<Jet<f64>>`).
pub trait Curve {
    fn eval<R: Real>(&self, x: R) -> R;

    /// Domain points of reduced smoothness. The subdivider honors each as a
    /// knot.
    fn critical_points(&self) -> Vec<f64>;

    /// `{T(0), T'(0)}` of the sensitivity interpretation, from the limit
    /// definition of the derivative: `T'(0) = S(0)`.
    fn at_zero(&self) -> Jet<f64>;
}
