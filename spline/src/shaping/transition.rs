//! Smooth transition segment between two linear segments.

use super::TransitionFunction;
use curves_math::{invert_by_bisection, Real};

const INVERSE_TOLERANCE: f64 = 1e-12;

/// A normalized transition function placed at `x0` with the given width.
///
/// The input is reduced to `[0, 1)`, passed through the function, and the
/// output rescaled uniformly by the width so the transition meets a unit
/// slope 1:1 on its right edge.
#[derive(Clone, Copy, Debug)]
pub struct Transition<F> {
    x0: f64,
    inv_width: f64,
    scale: f64,
    function: F,
}

impl<F: TransitionFunction> Transition<F> {
    pub fn new(x0: f64, width: f64, function: F) -> Self {
        debug_assert!(width > 0.0, "transition domain error");
        Self {
            x0,
            inv_width: 1.0 / width,
            scale: width,
            function,
        }
    }

    /// Value of the transition scaled to this segment.
    ///
    /// Callers keep `x` within `[x0, x0 + width)`.
    pub fn eval<R: Real>(&self, x: R) -> R {
        let normalized = (x - R::from_f64(self.x0)) * R::from_f64(self.inv_width);
        self.function.eval(normalized) * R::from_f64(self.scale)
    }

    pub fn inverse(&self, y: f64) -> f64 {
        let normalized = y * self.inv_width;
        let t = invert_by_bisection(
            |t| self.function.eval(t),
            normalized,
            INVERSE_TOLERANCE,
        );
        t * self.scale + self.x0
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn width(&self) -> f64 {
        // Scale is uniform in width and height.
        self.scale
    }

    pub fn height(&self) -> f64 {
        self.scale * self.function.at_1()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaping::SmootherStepIntegral;

    #[test]
    fn scales_the_normalized_function_uniformly() {
        let transition = Transition::new(2.0, 4.0, SmootherStepIntegral);
        assert_eq!(transition.eval(2.0), 0.0);
        assert!((transition.eval(6.0) - 2.0).abs() < 1e-12); // 4 * P(1) = 2
        assert_eq!(transition.height(), 2.0);
        assert_eq!(transition.width(), 4.0);
    }

    #[test]
    fn inverse_undoes_eval_inside_the_segment() {
        let transition = Transition::new(2.0, 4.0, SmootherStepIntegral);
        for x in [2.5, 3.0, 4.0, 5.5] {
            let y = transition.eval(x);
            assert!(
                (transition.inverse(y) - x).abs() < 1e-9,
                "x = {x}"
            );
        }
    }
}
