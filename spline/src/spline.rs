//! The built spline and its fixed-point evaluator.

use crate::segment::{
    create_segment, eval_poly, unpack, x_to_t, PackedSegment, SegmentParams,
};
use crate::subdivision::quantization::KNOT_FRAC_BITS;
use crate::subdivision::{AdaptiveSubdivider, SubdivisionConfig};
use crate::transfer::TransferFunction;
use curves_math::{FixedQ32_32, Jet, RoundingMode, Zero};
use tracing::debug;

/// End of the mapped spline domain in reference units.
pub const X_END_MAX: f64 = 256.0;

/// Hard cap on segments per spline.
pub const SEGMENTS_MAX: usize = 256;

/// Immutable piecewise cubic over `[0, X_END_MAX]`.
///
/// Build once, read many: evaluation is pure, allocation-free, and
/// bit-exact for identical inputs, so a built spline may be shared freely
/// across threads.
#[derive(Derivative)]
#[derivative(Clone, Debug)]
pub struct Spline {
    pub(crate) v_to_x: FixedQ32_32,
    pub(crate) x_end_max: FixedQ32_32,
    /// Q8.24 knot positions, strictly increasing, one more than segments.
    pub(crate) knot_positions: Vec<i64>,
    #[derivative(Debug(format_with = "format_segment_count"))]
    pub(crate) segments: Vec<PackedSegment>,
    /// Residual estimator error per segment, in logical order.
    pub(crate) residual_errors: Vec<f64>,
    pub(crate) capacity_limited: bool,
}

fn format_segment_count(
    segments: &[PackedSegment],
    formatter: &mut core::fmt::Formatter<'_>,
) -> Result<(), core::fmt::Error> {
    write!(formatter, "<{} packed segments>", segments.len())
}

impl Spline {
    /// Transfer value `T(v * v_to_x)`, clamped to the mapped domain.
    pub fn eval(&self, v: FixedQ32_32) -> FixedQ32_32 {
        let x = v.mul_round(self.v_to_x, RoundingMode::NearestEven);
        let x = x.clamp(FixedQ32_32::zero(), self.x_end_max);
        let x_raw = x.raw.max(self.knot_positions[0] << (32 - KNOT_FRAC_BITS));

        // Knots are Q8.24; the truncated compare is exact because knot
        // positions are whole grid multiples.
        let x_q24 = x_raw >> (32 - KNOT_FRAC_BITS);
        let index = self
            .knot_positions
            .partition_point(|&knot| knot <= x_q24)
            .saturating_sub(1)
            .min(self.segments.len() - 1);

        let segment = unpack(&self.segments[index]);
        let x0 = self.knot_positions[index] << (32 - KNOT_FRAC_BITS);
        let t = x_to_t(&segment.inv_width, x_raw, x0, 32);

        FixedQ32_32::from_raw(eval_poly(&segment.poly, t))
    }

    pub fn v_to_x(&self) -> FixedQ32_32 {
        self.v_to_x
    }

    pub fn x_end_max(&self) -> FixedQ32_32 {
        self.x_end_max
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Q8.24 knot positions, one more than the segment count.
    pub fn knot_positions(&self) -> &[i64] {
        &self.knot_positions
    }

    /// Estimator residual per segment; entries above the build tolerance
    /// mark capacity-limited segments.
    pub fn residual_errors(&self) -> &[f64] {
        &self.residual_errors
    }

    /// True when the builder ran out of segments (or splittable width)
    /// before meeting its tolerance everywhere.
    pub fn capacity_limited(&self) -> bool {
        self.capacity_limited
    }
}

/// Runs the build pipeline: critical points, adaptive subdivision, packing.
#[derive(Clone, Copy, Debug)]
pub struct SplineBuilder {
    config: SubdivisionConfig,
    /// Input-velocity value mapped onto the end of the reference domain.
    v_max: f64,
}

impl Default for SplineBuilder {
    fn default() -> Self {
        Self {
            config: SubdivisionConfig::default(),
            v_max: X_END_MAX,
        }
    }
}

impl SplineBuilder {
    pub fn new(config: SubdivisionConfig, v_max: f64) -> Self {
        debug_assert!(v_max > 0.0);
        Self { config, v_max }
    }

    pub fn tolerance(mut self, error_tolerance: f64) -> Self {
        self.config.error_tolerance = error_tolerance;
        self
    }

    pub fn v_max(mut self, v_max: f64) -> Self {
        debug_assert!(v_max > 0.0);
        self.v_max = v_max;
        self
    }

    #[tracing::instrument(skip_all, level = "debug")]
    pub fn build<T: TransferFunction>(&self, transfer: &T) -> Spline {
        let v_to_x = X_END_MAX / self.v_max;
        let rescaled = Rescaled {
            inner: transfer,
            x_to_v: self.v_max / X_END_MAX,
        };

        let mut critical_points = vec![0.0, X_END_MAX];
        for point in transfer.critical_points(self.v_max) {
            critical_points.push(point * v_to_x);
        }
        critical_points.sort_by(f64::total_cmp);
        critical_points.dedup();

        let subdivider = AdaptiveSubdivider::new(self.config);
        let outcome = subdivider.subdivide(&rescaled, &critical_points);
        debug!(
            segments = outcome.records.len(),
            capacity_limited = outcome.capacity_limited,
            "built spline"
        );

        let knot_scale = f64::from(KNOT_FRAC_BITS).exp2();
        let mut knot_positions = Vec::with_capacity(outcome.records.len() + 1);
        let mut segments = Vec::with_capacity(outcome.records.len());
        let mut residual_errors = Vec::with_capacity(outcome.records.len());

        if let Some(first) = outcome.records.first() {
            knot_positions.push((first.start.v * knot_scale).round() as i64);
        }
        for record in &outcome.records {
            knot_positions.push((record.end.v * knot_scale).round() as i64);
            segments.push(crate::segment::pack(&create_segment(SegmentParams {
                coeffs: record.poly.coeffs,
                width: record.width(),
            })));
            residual_errors.push(record.max_error);
        }

        Spline {
            v_to_x: FixedQ32_32::from_f64(v_to_x),
            x_end_max: FixedQ32_32::from_f64(X_END_MAX),
            knot_positions,
            segments,
            residual_errors,
            capacity_limited: outcome.capacity_limited,
        }
    }
}

/// Maps the subdivider's reference domain back onto the transfer
/// function's own input by the chain rule.
struct Rescaled<'a, T> {
    inner: &'a T,
    x_to_v: f64,
}

impl<T: TransferFunction> TransferFunction for Rescaled<'_, T> {
    fn eval(&self, x: f64) -> Jet<f64> {
        let jet = self.inner.eval(x * self.x_to_v);
        Jet::new(jet.a, jet.v * self.x_to_v)
    }

    fn critical_points(&self, domain_max: f64) -> Vec<f64> {
        let mut points = self.inner.critical_points(domain_max * self.x_to_v);
        for point in &mut points {
            *point /= self.x_to_v;
        }
        points
    }
}
