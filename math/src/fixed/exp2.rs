//! Fixed-point `2^x` with caller-selected input and output precision.

use super::exp2m1::exp2m1_q0_64;
use super::FixedQ0_64;
use crate::rounding::{shr_round_u64, RoundingMode};

/// Fixed-point `2^x`.
///
/// `x` is a signed value with `x_frac_bits` fractional bits; the result is
/// unsigned with `out_frac_bits` fractional bits. Overflow saturates at
/// `u64::MAX`; results below `2^-65` flush to zero. The fraction kernel is
/// the [`exp2m1_q0_64`] polynomial, so the error budget is exact on integer
/// inputs, at most 1 ulp for `out_frac_bits <= 32`, and at most
/// `2^(out_frac_bits - 39)` ulp above that.
pub fn exp2_q(x: i64, x_frac_bits: u32, out_frac_bits: u32) -> u64 {
    debug_assert!(x_frac_bits < 64);
    debug_assert!(out_frac_bits <= 64);

    // Split into integer part and fraction in [0, 1).
    let (int_part, frac_q64) = if x_frac_bits == 0 {
        (x, 0u64)
    } else {
        let int_part = x >> x_frac_bits;
        let frac = (x as u64) & ((1u64 << x_frac_bits) - 1);
        (int_part, frac << (64 - x_frac_bits))
    };

    // 2^f in [1, 2) at Q2.62, through 2^f = 2 * (1 + (2^-(1-f) - 1)).
    let y_q62: u64 = if frac_q64 == 0 {
        1u64 << 62
    } else {
        let one_minus_f = 0u64.wrapping_sub(frac_q64);
        let p = exp2m1_q0_64(FixedQ0_64::from_raw(one_minus_f));
        (1u64 << 63).wrapping_add(p.raw as u64)
    };

    // Scale by 2^int_part and align Q2.62 to the requested output format.
    let total_shift = int_part + i64::from(out_frac_bits) - 62;
    if total_shift >= 64 {
        u64::MAX
    } else if total_shift > 0 {
        let shift = total_shift as u32;
        if y_q62 >> (64 - shift) != 0 {
            u64::MAX
        } else {
            y_q62 << shift
        }
    } else if total_shift == 0 {
        y_q62
    } else {
        let shift = -total_shift;
        if shift >= 64 {
            0
        } else {
            shr_round_u64(y_q62, shift as u32, RoundingMode::NearestEven)
        }
    }
}
