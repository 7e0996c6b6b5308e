//! Fixed-point evaluation of a normalized segment.

use super::{NormalizedInvWidth, NormalizedPoly, OUT_FRAC_BITS, T_FRAC_BITS};
use curves_math::{narrow_i128_i64, shr_round_i128, shr_round_u128, RoundingMode};

/// Maps a spline-domain position to the segment-local parameter
/// `t = (x - x0) * inv_width` at [`T_FRAC_BITS`], clamped to `[0, 1]`.
pub fn x_to_t(inv_width: &NormalizedInvWidth, x: i64, x0: i64, x_frac_bits: u32) -> u64 {
    debug_assert!(x >= x0);
    let offset = (x - x0) as u64;

    // offset @ x_frac_bits times inv_width @ shift.
    let product = u128::from(offset) * u128::from(inv_width.value);
    let current_frac_bits = x_frac_bits + u32::from(inv_width.shift);

    let t = if current_frac_bits >= T_FRAC_BITS {
        shr_round_u128(
            product,
            current_frac_bits - T_FRAC_BITS,
            RoundingMode::NearestEven,
        )
    } else {
        product << (T_FRAC_BITS - current_frac_bits)
    };

    // Rounding in the reciprocal can push the far edge a hair past 1.
    (t.min(1 << T_FRAC_BITS)) as u64
}

/// Horner-evaluates the cubic at `t` (Q0.48), producing Q32.32.
///
/// Each product stays within 128 bits: coefficients carry at most 46
/// mantissa bits and `t` at most 49, and the shift chain realigns the
/// accumulator to each coefficient's Q-format before the add. Zero
/// coefficients sit at the denormal shift, which is just another valid
/// exponent for the value 0, so no special case is needed here.
pub fn eval_poly(poly: &NormalizedPoly, t: u64) -> i64 {
    let t = i128::from(t);

    let mut acc = i128::from(poly.coeffs[0]);
    let mut frac_bits = u32::from(poly.shifts[0]);

    for i in 1..4 {
        acc = shr_round_i128(acc * t, T_FRAC_BITS, RoundingMode::NearestEven);

        let target = u32::from(poly.shifts[i]);
        acc = realign(acc, frac_bits, target);
        acc += i128::from(poly.coeffs[i]);
        frac_bits = target;
    }

    narrow_i128_i64(realign(acc, frac_bits, OUT_FRAC_BITS))
}

#[inline]
fn realign(acc: i128, from_frac_bits: u32, to_frac_bits: u32) -> i128 {
    if from_frac_bits > to_frac_bits {
        shr_round_i128(acc, from_frac_bits - to_frac_bits, RoundingMode::NearestEven)
    } else {
        acc << (to_frac_bits - from_frac_bits)
    }
}
