//! Fixed-point `log2` with caller-selected input and output precision.

use crate::integer::{log2_u64, narrow_i128_i64};
use crate::rounding::{shr_round_u128, shr_round_u64, RoundingMode};

/// Fixed-point `log2(x)`.
///
/// `x` is unsigned with `x_frac_bits` fractional bits and must be nonzero;
/// the result is signed with `out_frac_bits` fractional bits, rounded to
/// nearest even and saturated at the `i64` rails. The integer part falls out
/// of the exponent; the fractional part is produced one bit per mantissa
/// squaring, each squared product re-rounded to nearest even, which keeps
/// the total error within 1 ulp for `out_frac_bits <= 48` and 2 ulp up to
/// `out_frac_bits = 62`.
pub fn log2_q(x: u64, x_frac_bits: u32, out_frac_bits: u32) -> i64 {
    debug_assert!(x > 0, "log2 domain error");
    debug_assert!(out_frac_bits <= 63);

    let msb = log2_u64(x);
    let int_part = i64::from(msb) - i64::from(x_frac_bits);

    // Mantissa in [1, 2) at Q1.63.
    let mut mantissa = x << (63 - msb);

    // Each squaring doubles the mantissa's exponent; the carry bit out of
    // [1, 2) is the next fractional bit of the logarithm.
    let mut frac_q63: u64 = 0;
    for _ in 0..63 {
        frac_q63 <<= 1;
        let squared = u128::from(mantissa) * u128::from(mantissa);
        let renormalized = if squared >= 1u128 << 127 {
            frac_q63 |= 1;
            shr_round_u128(squared, 64, RoundingMode::NearestEven)
        } else {
            shr_round_u128(squared, 63, RoundingMode::NearestEven)
        };
        // The round-up can graze 2^64; clamping costs at most half an ulp.
        mantissa = if renormalized >> 64 != 0 {
            u64::MAX
        } else {
            renormalized as u64
        };
    }

    let frac_out = if out_frac_bits == 63 {
        frac_q63
    } else {
        shr_round_u64(frac_q63, 63 - out_frac_bits, RoundingMode::NearestEven)
    };

    let wide = (i128::from(int_part) << out_frac_bits) + i128::from(frac_out);
    narrow_i128_i64(wide)
}
