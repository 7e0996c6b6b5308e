//! End-to-end pipeline tests: curve through subdivision, packing, and the
//! fixed-point evaluator.

use curves_math::{ErrorMetrics, FixedQ32_32 as Fixed, Jet};
use curves_spline::curve::{Curve, Synchronous};
use curves_spline::shaping::InputShaping;
use curves_spline::spline::{Spline, SplineBuilder, X_END_MAX};
use curves_spline::subdivision::{AdaptiveSubdivider, SubdivisionConfig};
use curves_spline::transfer::{FromSensitivity, ShapedTransfer, TransferFunction};

fn sensitivity(motivity: f64, gamma: f64, sync_speed: f64, smooth: f64) -> FromSensitivity<Synchronous> {
    FromSensitivity::new(Synchronous::new(motivity, gamma, sync_speed, smooth))
}

#[test]
fn synchronous_identity_evaluates_to_x() {
    // Unit motivity makes S(x) = 1 everywhere, so T(x) = x.
    let transfer = sensitivity(1.0, 1.0, 1.0, 0.5);
    let spline = SplineBuilder::default().build(&transfer);

    let actual = spline.eval(Fixed::from_f64(0.5)).to_f64();
    assert!(
        (actual - 0.5).abs() < 1e-6,
        "identity at 0.5: {actual}"
    );
}

#[test]
fn cusp_continuity() {
    let transfer = sensitivity(10.0, 1.0, 8.3, 0.5);
    let spline = SplineBuilder::default().build(&transfer);

    // S(p) = 1, so T(p) = p.
    let at_cusp = spline.eval(Fixed::from_f64(8.3)).to_f64();
    assert!(
        (at_cusp - 8.3).abs() < 1e-5,
        "value at the cusp: {at_cusp}"
    );

    // One-sided slopes around the cusp agree.
    let h = 1e-3;
    let below = spline.eval(Fixed::from_f64(8.3 - h)).to_f64();
    let above = spline.eval(Fixed::from_f64(8.3 + h)).to_f64();
    let left_slope = (at_cusp - below) / h;
    let right_slope = (above - at_cusp) / h;
    assert!(
        (left_slope - right_slope).abs() < 1e-3,
        "slopes: {left_slope} vs {right_slope}"
    );
}

#[test]
fn built_spline_meets_the_error_tolerance() {
    let tolerance = 1e-6;
    let transfer = sensitivity(1.5, 1.0, 5.0, 0.5);
    let spline = SplineBuilder::default().tolerance(tolerance).build(&transfer);
    assert!(!spline.capacity_limited());

    let mut metrics = ErrorMetrics::default();
    let mut x = 0.0f64;
    while x < X_END_MAX {
        let actual = spline.eval(Fixed::from_f64(x)).to_f64();
        let expected = transfer.eval(x).a;
        metrics.sample(x, actual, expected);
        x += 0.05;
    }

    // The estimator samples, the coefficients quantize, and tiny
    // coefficients flush, so the observed maximum may exceed the nominal
    // tolerance by a small factor but not by orders of magnitude.
    assert!(
        metrics.max_abs.value < 50.0 * tolerance,
        "{metrics}"
    );
}

#[test]
fn impossible_tolerance_flags_capacity_and_localizes_error() {
    // Surface the builder's capacity warning when run with --nocapture.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();

    let tolerance = 1e-12;
    let transfer = sensitivity(10.0, 1.0, 0.3, 1.0 / 32.0);
    let spline = SplineBuilder::default().tolerance(tolerance).build(&transfer);

    assert!(spline.segment_count() <= 256);
    assert!(spline.capacity_limited());
    assert!(spline
        .residual_errors()
        .iter()
        .any(|residual| *residual > tolerance));
}

#[test]
fn evaluator_is_monotone_for_a_monotone_transfer() {
    let transfer = sensitivity(3.0, 1.0, 5.0, 0.5);
    let spline = SplineBuilder::default().build(&transfer);

    let samples = [0.0, 1e-3, 1.0, 10.0, 100.0, 1000.0];
    let outputs: Vec<Fixed> = samples
        .iter()
        .map(|v| spline.eval(Fixed::from_f64(*v)))
        .collect();

    for pair in outputs.windows(2) {
        assert!(pair[0] <= pair[1], "outputs must be non-decreasing");
    }
    // Strictly increasing inside the mapped domain.
    for pair in outputs[..5].windows(2) {
        assert!(pair[0] < pair[1], "outputs must grow inside the domain");
    }

    // A denser sweep over the domain.
    let mut previous = spline.eval(Fixed::from_f64(0.0));
    let mut v = 0.01;
    while v < X_END_MAX {
        let current = spline.eval(Fixed::from_f64(v));
        assert!(previous <= current, "v = {v}");
        previous = current;
        v += 0.25;
    }
}

#[test]
fn segments_interpolate_their_end_knots() {
    let transfer = sensitivity(1.5, 1.0, 5.0, 0.5);
    let subdivider = AdaptiveSubdivider::new(SubdivisionConfig::default());
    let outcome = subdivider.subdivide(&transfer, &[0.0, 5.0, X_END_MAX]);

    for record in &outcome.records {
        let width = record.width();
        let poly = &record.poly;

        // Values at the ends; tangents scaled back from t-space. The
        // coefficients are quantized to 45/46 bits, so the checks are
        // tight but not exact.
        let value_tolerance = 1e-9 * record.end.y.a.abs().max(1.0);
        assert!((poly.eval(0.0) - record.start.y.a).abs() <= value_tolerance);
        assert!((poly.eval(1.0) - record.end.y.a).abs() <= 4.0 * value_tolerance);

        let slope_tolerance = 1e-8 * record.end.y.v.abs().max(1.0);
        assert!((poly.eval_derivative(0.0) / width - record.start.y.v).abs() <= slope_tolerance);
        assert!((poly.eval_derivative(1.0) / width - record.end.y.v).abs() <= 4.0 * slope_tolerance);
    }
}

#[test]
fn knot_positions_sit_on_the_q8_24_grid() {
    let transfer = sensitivity(1.5, 1.0, 5.0, 0.5);
    let spline = SplineBuilder::default().build(&transfer);

    // Positions are stored as Q8.24 integers, so the grid property shows
    // up as every segment spanning at least one grid step.
    for pair in spline.knot_positions().windows(2) {
        assert!(pair[1] - pair[0] >= 1, "zero-width segment");
    }

    let bytes = spline.to_packed();
    let decoded = Spline::from_packed(&bytes).unwrap();
    assert_eq!(decoded.segment_count(), spline.segment_count());
    assert_eq!(decoded.knot_positions(), spline.knot_positions());
}

#[test]
fn shaped_pipeline_builds_and_caps() {
    let shaping = InputShaping::new(Some((0.5, 1.0)), Some((100.0, 20.0)));
    let transfer = ShapedTransfer::new(shaping, sensitivity(1.5, 1.0, 5.0, 0.5));
    let spline = SplineBuilder::default().build(&transfer);

    // The floor region maps to zero.
    assert_eq!(spline.eval(Fixed::from_f64(0.25)).raw, 0);

    // Beyond the ceiling the output is flat.
    let at_ceiling = spline.eval(Fixed::from_f64(125.0));
    let beyond = spline.eval(Fixed::from_f64(200.0));
    let delta = (at_ceiling.to_f64() - beyond.to_f64()).abs();
    assert!(delta < 1e-6, "flat beyond the ceiling: {delta}");

    // Reference comparison across the shaped domain.
    let mut metrics = ErrorMetrics::default();
    let mut v = 0.0f64;
    while v < X_END_MAX {
        let actual = spline.eval(Fixed::from_f64(v)).to_f64();
        let expected = transfer.eval(v).a;
        metrics.sample(v, actual, expected);
        v += 0.1;
    }
    assert!(metrics.max_abs.value < 1e-4, "{metrics}");
}

#[test]
fn second_derivatives_flow_through_the_whole_transfer() {
    // The nested-jet seed propagates end to end: T'' of the identity
    // transfer is zero.
    let transfer = sensitivity(1.0, 1.0, 1.0, 0.5);
    let x = Jet::second_order_variable(3.0);
    let curve = Synchronous::new(1.0, 1.0, 1.0, 0.5);
    let jet = x * curve.eval(x);
    let t = transfer.eval(3.0);
    assert!((jet.a.a - t.a).abs() < 1e-12);
    assert!(jet.v.v.abs() < 1e-9);
}
