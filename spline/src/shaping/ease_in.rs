//! Piecewise ease-in function.

use super::{Transition, TransitionFunction};
use curves_math::Real;

//
//                        /
//                      /
//                    /
//                  /
//    _________..-'
//       flat |----| linear
//          transition
//
#[derive(Clone, Copy, Debug)]
pub struct EaseIn<F> {
    lag: f64,
    transition: Transition<F>,
}

impl<F: TransitionFunction> EaseIn<F> {
    pub fn new(transition: Transition<F>) -> Self {
        Self {
            lag: transition.x0() + transition.width() - transition.height(),
            transition,
        }
    }

    pub fn eval<R: Real>(&self, x: R) -> R {
        // Flat segment.
        let x0 = self.transition.x0();
        if x.primal() < x0 {
            return R::from_f64(0.0);
        }

        // Linear segment.
        if x.primal() >= x0 + self.transition.width() {
            return x - R::from_f64(self.lag);
        }

        // Transition segment.
        self.transition.eval(x)
    }

    pub fn inverse(&self, y: f64) -> f64 {
        // Flat segment.
        if y <= 0.0 {
            return self.transition.x0();
        }

        // Linear segment.
        if y >= self.transition.height() {
            return y + self.lag;
        }

        // Transition segment.
        self.transition.inverse(y)
    }

    pub fn critical_points(&self) -> [f64; 2] {
        let x0 = self.transition.x0();
        [x0, x0 + self.transition.width()]
    }
}
