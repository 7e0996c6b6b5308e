//! The synchronous curve family.

use super::Curve;
use crate::param::{Param, Reporter};
use curves_math::{Jet, Real};

/// Synchronous sensitivity curve:
///
/// `f(x) = exp(copysign(L, u) * tanh(|u|^k)^r)` for `u = g * log(x / p)`,
/// with `L = ln(motivity)`, `g = gamma / L`, `k = min(0.5 / smooth, 32)`,
/// `r = 1 / k`.
///
/// `f` crosses 1 exactly at the sync speed `p`, approaching `1/motivity`
/// at zero and `motivity` at infinity. The cusp at `p` is the curve's only
/// critical point.
#[derive(Clone, Copy, Debug)]
pub struct Synchronous {
    motivity: f64,
    l: f64,
    g: f64,
    p: f64,
    k: f64,
    r: f64,
}

impl Synchronous {
    /// Inside this distance of the cusp, a linear Taylor branch replaces
    /// the closed form, which degenerates numerically as `u -> 0`.
    const CUSP_APPROXIMATION_DISTANCE: f64 = 1e-7;

    /// `smooth` is interpreted on `(0, 0.5]`; the sharpness `k = 0.5/smooth`
    /// is capped at 32, and `smooth == 0` falls back to the cap.
    pub fn new(motivity: f64, gamma: f64, sync_speed: f64, smooth: f64) -> Self {
        let l = motivity.ln();
        // motivity == 1 collapses the curve to the constant 1; the limit of
        // g = gamma / L there is irrelevant because L scales it back out.
        let g = if l == 0.0 { 0.0 } else { gamma / l };
        let k = if smooth == 0.0 {
            32.0
        } else {
            (0.5 / smooth).min(32.0)
        };
        Self {
            motivity,
            l,
            g,
            p: sync_speed,
            k,
            r: 1.0 / k,
        }
    }

    pub fn sync_speed(&self) -> f64 {
        self.p
    }

    pub fn motivity(&self) -> f64 {
        self.motivity
    }
}

impl Default for Synchronous {
    fn default() -> Self {
        Self::new(1.5, 1.0, 5.0, 0.5)
    }
}

impl Curve for Synchronous {
    fn eval<R: Real>(&self, x: R) -> R {
        // Limit definition near 0.
        if x.primal() < f64::EPSILON {
            return R::from_f64(1.0 / self.motivity);
        }

        // Linear Taylor approximation (very) near the cusp.
        let displacement = x - R::from_f64(self.p);
        if displacement.primal().abs() <= Self::CUSP_APPROXIMATION_DISTANCE {
            let slope = self.l * self.g / self.p;
            return R::from_f64(1.0) + R::from_f64(slope) * displacement;
        }

        let u = R::from_f64(self.g) * (x / R::from_f64(self.p)).ln();
        let w = u.abs().powf(self.k).tanh();
        (R::from_f64(self.l).copysign(u) * w.powf(self.r)).exp()
    }

    fn critical_points(&self) -> Vec<f64> {
        vec![self.p]
    }

    fn at_zero(&self) -> Jet<f64> {
        Jet::new(0.0, 1.0 / self.motivity)
    }
}

/// Parameter block for the synchronous family.
#[derive(Clone, Debug)]
pub struct SynchronousConfig {
    pub motivity: Param<f64>,
    pub gamma: Param<f64>,
    pub smooth: Param<f64>,
    pub sync_speed: Param<f64>,
}

impl Default for SynchronousConfig {
    fn default() -> Self {
        Self {
            motivity: Param::new("Motivity", 1.5, 1.0, 1.0e3),
            gamma: Param::new("Gamma", 1.0, 1e-3, 1.0e3),
            smooth: Param::new("Smooth", 0.5, 1.0 / 32.0, 1.0),
            sync_speed: Param::new("Sync Speed", 5.0, 1.0e-3, 1.0e3),
        }
    }
}

impl SynchronousConfig {
    pub fn reflect(&self, visitor: &mut impl FnMut(&str, f64)) {
        self.motivity.reflect(visitor);
        self.gamma.reflect(visitor);
        self.smooth.reflect(visitor);
        self.sync_speed.reflect(visitor);
    }

    pub fn validate<R: Reporter>(&mut self, reporter: &mut R) {
        self.motivity.validate(reporter);
        self.gamma.validate(reporter);
        self.smooth.validate(reporter);
        self.sync_speed.validate(reporter);
    }

    pub fn create(&self) -> Synchronous {
        Synchronous::new(
            self.motivity.value(),
            self.gamma.value(),
            self.sync_speed.value(),
            self.smooth.value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosses_one_at_the_sync_speed() {
        let curve = Synchronous::new(10.0, 1.0, 8.3, 0.5);
        assert_eq!(curve.eval(8.3), 1.0);
    }

    #[test]
    fn approaches_the_motivity_limits() {
        let curve = Synchronous::new(10.0, 1.0, 5.0, 0.5);
        assert!((curve.eval(0.0) - 0.1).abs() < 1e-12);
        // Far above the sync speed, f approaches motivity.
        assert!((curve.eval(1e6) - 10.0).abs() < 0.2);
        // Far below, f approaches 1/motivity.
        assert!((curve.eval(1e-5) - 0.1).abs() < 0.01);
    }

    #[test]
    fn taylor_branch_is_continuous_with_the_closed_form() {
        let curve = Synchronous::new(10.0, 1.0, 8.3, 0.5);
        let inside = curve.eval(8.3 + 0.9e-7);
        let outside = curve.eval(8.3 + 1.1e-7);
        assert!((inside - outside).abs() < 1e-6);

        // One-sided slopes around the cusp agree through the Taylor branch.
        let left = curve.eval(Jet::variable(8.3 - 0.5e-7));
        let right = curve.eval(Jet::variable(8.3 + 0.5e-7));
        assert!((left.v - right.v).abs() < 1e-12);
    }

    #[test]
    fn jets_and_finite_differences_agree() {
        let curve = Synchronous::new(1.5, 1.0, 5.0, 0.5);
        for x in [0.5, 2.0, 4.0, 6.0, 20.0] {
            let jet = curve.eval(Jet::variable(x));
            let h = 1e-6;
            let numeric = (curve.eval(x + h) - curve.eval(x - h)) / (2.0 * h);
            assert!(
                (jet.v - numeric).abs() < 1e-5 * numeric.abs().max(1.0),
                "x = {x}: {} vs {numeric}",
                jet.v
            );
        }
    }

    #[test]
    fn unit_motivity_collapses_to_the_identity_sensitivity() {
        let curve = Synchronous::new(1.0, 1.0, 1.0, 0.5);
        for x in [0.0, 0.5, 1.0, 2.0, 100.0] {
            assert_eq!(curve.eval(x), 1.0, "x = {x}");
            let jet = curve.eval(Jet::variable(x.max(f64::EPSILON * 2.0)));
            assert_eq!(jet.v, 0.0);
        }
    }

    #[test]
    fn config_round_trips_through_validation() {
        let mut config = SynchronousConfig::default();
        config.motivity.set_value(0.5);
        let mut reporter = crate::param::NullReporter;
        config.validate(&mut reporter);
        assert_eq!(config.motivity.value(), 1.0);

        let curve = config.create();
        assert_eq!(curve.eval(config.sync_speed.value()), 1.0);
    }
}
