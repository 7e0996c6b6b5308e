//! Floating-point coefficients to math-format segments.

use super::{
    NormalizedInvWidth, NormalizedPoly, NormalizedSegment, COEFF_COUNT, DENORMAL_SHIFT,
    INV_WIDTH_IMPLICIT_BIT, SIGNED_IMPLICIT_BIT, UNSIGNED_IMPLICIT_BIT,
};
use crate::subdivision::quantization::{frexp_exponent, ldexp};

/// Floating-point segment description: monomial coefficients over
/// `t in [0, 1)` plus the segment width in domain units.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentParams {
    pub coeffs: [f64; COEFF_COUNT],
    pub width: f64,
}

/// Normalizes one coefficient: the mantissa is scaled so its leading 1
/// lands on `implicit_bit`, and the scale becomes the stored shift.
///
/// Values too small to place the leading 1 within the 0..=61 shift range
/// flush to the distinguished zero state; the shift 62 is the zero
/// sentinel and never carries a live mantissa.
fn encode(value: f64, implicit_bit: u32) -> (u64, u8) {
    if value == 0.0 {
        return (0, DENORMAL_SHIFT);
    }

    let magnitude = value.abs();
    let exponent = frexp_exponent(magnitude);
    let ideal_shift = i64::from(implicit_bit) - (i64::from(exponent) - 1);
    debug_assert!(ideal_shift >= 0, "coefficient too large to normalize");
    if ideal_shift >= i64::from(DENORMAL_SHIFT) {
        return (0, DENORMAL_SHIFT);
    }

    let mut shift = ideal_shift as u8;
    let mut mantissa = ldexp(magnitude, i32::from(shift)).round() as u64;
    if mantissa == 0 {
        return (0, DENORMAL_SHIFT);
    }
    // Rounding can carry into the next binade.
    if mantissa == 1 << (implicit_bit + 1) {
        mantissa >>= 1;
        shift -= 1;
    }
    debug_assert!(mantissa >> implicit_bit == 1, "implicit bit misplaced");

    (mantissa, shift)
}

/// Builds a normalized segment from floating-point parameters.
///
/// Coefficients `a, b` are signed (implicit 1 at bit 44), `c, d` unsigned
/// (bit 45), and the inverse width carries its implicit 1 at bit 46.
pub fn create_segment(params: SegmentParams) -> NormalizedSegment {
    let mut poly = NormalizedPoly::default();

    for i in 0..2 {
        let (mantissa, shift) = encode(params.coeffs[i], SIGNED_IMPLICIT_BIT);
        poly.coeffs[i] = if params.coeffs[i] < 0.0 {
            -(mantissa as i64)
        } else {
            mantissa as i64
        };
        poly.shifts[i] = shift;
    }

    for i in 2..COEFF_COUNT {
        let value = if params.coeffs[i] <= 0.0 {
            0.0
        } else {
            params.coeffs[i]
        };
        let (mantissa, shift) = encode(value, UNSIGNED_IMPLICIT_BIT);
        poly.coeffs[i] = mantissa as i64;
        poly.shifts[i] = shift;
    }

    debug_assert!(params.width > 0.0, "segment width must be positive");
    let (value, shift) = encode(1.0 / params.width, INV_WIDTH_IMPLICIT_BIT);
    let inv_width = NormalizedInvWidth {
        value,
        shift,
    };

    NormalizedSegment { poly, inv_width }
}
