//! Transfer function from a curve interpreted as gain.

use super::{GainCurve, TransferFunction};
use curves_math::{gauss5, CompensatedAccumulator, Jet};

/// Grid resolution of the cached numeric integral.
const CACHE_INTERVALS: usize = 4096;

/// Computes `{T(x), G(x)}` where `T(x) = integral of G over [0, x]`.
///
/// Families with a closed-form antiderivative `F` evaluate
/// `T(x) = F(x) - F(0)` analytically. The rest integrate numerically:
/// construction sweeps the domain once with Gauss-5 quadrature over
/// consecutive monotonic advances, compensating the running sum, and caches
/// prefix integrals on a uniform grid so later queries are random-access.
#[derive(Clone, Debug)]
pub struct FromGain<C> {
    curve: C,
    cache: Option<IntegralCache>,
}

#[derive(Clone, Debug)]
struct IntegralCache {
    step: f64,
    prefix: Vec<f64>,
}

impl<C: GainCurve> FromGain<C> {
    pub fn new(curve: C, domain_max: f64) -> Self {
        let cache = match curve.antiderivative(0.0) {
            Some(_) => None,
            None => Some(IntegralCache::build(&curve, domain_max)),
        };
        Self { curve, cache }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }
}

impl IntegralCache {
    fn build<C: GainCurve>(curve: &C, domain_max: f64) -> Self {
        debug_assert!(domain_max > 0.0);
        let step = domain_max / CACHE_INTERVALS as f64;
        let mut prefix = Vec::with_capacity(CACHE_INTERVALS + 1);
        let mut sum = CompensatedAccumulator::<f64>::default();
        prefix.push(0.0);
        for interval in 0..CACHE_INTERVALS {
            let a = interval as f64 * step;
            sum += gauss5(|t| curve.value(t), a, a + step);
            prefix.push(sum.value());
        }
        Self { step, prefix }
    }

    fn eval<C: GainCurve>(&self, curve: &C, x: f64) -> f64 {
        debug_assert!(x >= 0.0);
        let index = ((x / self.step) as usize).min(self.prefix.len() - 2);
        let grid_x = index as f64 * self.step;
        self.prefix[index] + gauss5(|t| curve.value(t), grid_x, x)
    }
}

impl<C: GainCurve> TransferFunction for FromGain<C> {
    fn eval(&self, x: f64) -> Jet<f64> {
        let transfer = match &self.cache {
            Some(cache) => cache.eval(&self.curve, x),
            // T(x) = F(x) - F(0) where F' = G. The cache is only absent
            // when the constructor saw an antiderivative.
            None => {
                let at_x = self.curve.antiderivative(x).unwrap_or(0.0);
                let at_origin = self.curve.antiderivative(0.0).unwrap_or(0.0);
                at_x - at_origin
            }
        };
        Jet::new(transfer, self.curve.value(x))
    }

    fn critical_points(&self, domain_max: f64) -> Vec<f64> {
        let mut points = self.curve.critical_points();
        points.retain(|point| *point <= domain_max);
        points
    }
}
