//! Composition of ease-in and ease-out into the shaping function `U(v)`.

use super::{EaseIn, EaseOut, Reflected, SmootherStepIntegral, Transition};
use curves_math::{Jet, Real};

/// `U(v)` with its first two derivatives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapingResult {
    pub u: f64,
    pub du: f64,
    pub d2u: f64,
}

/// Shaping applied to raw velocity before the transfer function.
///
/// Ease-in carves a flat floor with a smooth ramp back up to a linear
/// `v - lag`; ease-out caps the result at a ceiling. Either side may be
/// absent. Both use the smootherstep-integral transition (the ease-out side
/// reflected), so every join is C^3.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputShaping {
    ease_in: Option<EaseIn<SmootherStepIntegral>>,
    ease_out: Option<EaseOut<Reflected<SmootherStepIntegral>>>,
}

impl InputShaping {
    pub fn new(ease_in: Option<(f64, f64)>, ease_out: Option<(f64, f64)>) -> Self {
        Self {
            ease_in: ease_in.map(|(v_begin, width)| {
                EaseIn::new(Transition::new(v_begin, width, SmootherStepIntegral))
            }),
            ease_out: ease_out.map(|(v_begin, width)| {
                EaseOut::new(Transition::new(
                    v_begin,
                    width,
                    Reflected(SmootherStepIntegral),
                ))
            }),
        }
    }

    pub fn eval<R: Real>(&self, v: R) -> R {
        let eased = match &self.ease_in {
            Some(ease_in) => ease_in.eval(v),
            None => v,
        };
        match &self.ease_out {
            Some(ease_out) => ease_out.eval(eased),
            None => eased,
        }
    }

    /// `(U(v), U'(v), U''(v))`, exact through nested jets.
    pub fn eval_with_derivatives(&self, v: f64) -> ShapingResult {
        let result = self.eval(Jet::second_order_variable(v));
        ShapingResult {
            u: result.a.a,
            du: result.a.v,
            d2u: result.v.v,
        }
    }

    /// Shaping boundaries in input-velocity units, sorted.
    ///
    /// The ease-out boundaries live in the ease-in's output space and are
    /// pulled back through its inverse.
    pub fn critical_points(&self) -> Vec<f64> {
        let mut points = Vec::with_capacity(4);
        if let Some(ease_in) = &self.ease_in {
            points.extend(ease_in.critical_points());
        }
        if let Some(ease_out) = &self.ease_out {
            for boundary in ease_out.critical_points() {
                match &self.ease_in {
                    Some(ease_in) => points.push(ease_in.inverse(boundary)),
                    None => points.push(boundary),
                }
            }
        }
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }

    /// Pulls a point in shaped-output space back to input velocity:
    /// `U^-1 = ease_in^-1 . ease_out^-1`.
    ///
    /// Flat regions are not invertible; their points pin to the region
    /// edge, which is where the interesting knot sits anyway.
    pub fn inverse(&self, u: f64) -> f64 {
        let eased = match &self.ease_out {
            Some(ease_out) => ease_out.inverse(u),
            None => u,
        };
        match &self.ease_in {
            Some(ease_in) => ease_in.inverse(eased),
            None => eased,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.ease_in.is_none() && self.ease_out.is_none()
    }
}
