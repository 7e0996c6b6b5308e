//! Sampled error estimation for candidate segments.

use crate::cubic::Monomial;
use crate::transfer::TransferFunction;
use curves_math::ArgMax;

/// Estimates a segment's approximation error by sampling.
///
/// `|T(v) - hermite(t)|` is evaluated on a fixed grid interior to the
/// segment, plus the cubic's stationary points, where the difference tends
/// to peak. The returned abscissa of the maximum doubles as the split hint.
#[derive(Clone, Copy, Debug)]
pub struct SampledErrorEstimator {
    samples: u32,
}

impl Default for SampledErrorEstimator {
    fn default() -> Self {
        Self { samples: 9 }
    }
}

impl SampledErrorEstimator {
    pub fn new(samples: u32) -> Self {
        debug_assert!(samples >= 1);
        Self { samples }
    }

    /// Returns `(v_split, max_error)` for the segment `[start, start + width)`.
    pub fn estimate<T: TransferFunction>(
        &self,
        target: &T,
        poly: &Monomial,
        start: f64,
        width: f64,
    ) -> (f64, f64) {
        let mut tracker = ArgMax::<f64, f64> {
            value: 0.0,
            arg: start + 0.5 * width,
        };

        for i in 1..=self.samples {
            let t = f64::from(i) / f64::from(self.samples + 1);
            self.sample(target, poly, start, width, t, &mut tracker);
        }
        for t in poly.stationary_points() {
            self.sample(target, poly, start, width, t, &mut tracker);
        }

        (tracker.arg, tracker.value)
    }

    fn sample<T: TransferFunction>(
        &self,
        target: &T,
        poly: &Monomial,
        start: f64,
        width: f64,
        t: f64,
        tracker: &mut ArgMax<f64, f64>,
    ) {
        let v = start + t * width;
        let error = (target.eval(v).a - poly.eval(t)).abs();
        tracker.sample(v, error);
    }
}
