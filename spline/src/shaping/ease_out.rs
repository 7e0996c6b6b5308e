//! Piecewise ease-out function.

use super::{Transition, TransitionFunction};
use curves_math::Real;

//
//                ________
//            .-''
//          /
//        /
//      /
//    /
//    linear |----| flat
//         transition
//
#[derive(Clone, Copy, Debug)]
pub struct EaseOut<F> {
    ceiling: f64,
    transition: Transition<F>,
}

impl<F: TransitionFunction> EaseOut<F> {
    pub fn new(transition: Transition<F>) -> Self {
        Self {
            ceiling: transition.x0() + transition.height(),
            transition,
        }
    }

    pub fn eval<R: Real>(&self, x: R) -> R {
        // Linear segment through the origin.
        let x0 = self.transition.x0();
        if x.primal() < x0 {
            return x;
        }

        // Flat segment.
        if x.primal() >= x0 + self.transition.width() {
            return R::from_f64(self.ceiling);
        }

        // Transition segment.
        self.transition.eval(x) + R::from_f64(x0)
    }

    pub fn inverse(&self, y: f64) -> f64 {
        // Linear segment.
        if y <= self.transition.x0() {
            return y;
        }

        // Flat segment.
        if y >= self.ceiling {
            return self.transition.x0() + self.transition.width();
        }

        // Transition segment.
        self.transition.inverse(y - self.transition.x0())
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn critical_points(&self) -> [f64; 2] {
        let x0 = self.transition.x0();
        [x0, x0 + self.transition.width()]
    }
}
