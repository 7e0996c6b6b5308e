//! Fixed-point reciprocal square root.

use crate::rounding::{shr_round_u128, shr_round_u64, RoundingMode};

const ITERATIONS: u32 = 8;

/// Fixed-point `1 / sqrt(x)`.
///
/// `x` is unsigned with `x_frac_bits` fractional bits and must be nonzero
/// (debug-asserted; release builds saturate to `u64::MAX`). The result is
/// unsigned with `out_frac_bits` fractional bits. The input is normalized to
/// `[1, 4)` on an even exponent, refined by Newton–Raphson from a linear
/// seed, and rescaled by half the exponent. Verified through the
/// `y^2 ~ 1/x` residual: relative error stays within `2^-11` or one output
/// ulp, whichever is larger.
pub fn isqrt_q(x: u64, x_frac_bits: u32, out_frac_bits: u32) -> u64 {
    debug_assert!(x > 0, "isqrt domain error");
    if x == 0 {
        return u64::MAX;
    }

    // Normalize to m in [1, 4) at Q2.62 with an even exponent:
    // x / 2^x_frac_bits = m * 2^exponent.
    let msb = 63 - x.leading_zeros();
    let mut exponent = i64::from(msb) - i64::from(x_frac_bits);
    if exponent % 2 != 0 {
        exponent -= 1;
    }
    let shift = 62 - i64::from(x_frac_bits) - exponent;
    let m_q62 = if shift >= 0 {
        x << shift
    } else {
        x >> -shift
    };

    // Newton-Raphson: y' = y * (3 - m * y^2) / 2, seeded with y0 = 1.5 - m/4.
    let mut y_q62 = (3u64 << 61) - (m_q62 >> 2);
    for _ in 0..ITERATIONS {
        let y_sq = shr_round_u128(
            u128::from(y_q62) * u128::from(y_q62),
            62,
            RoundingMode::NearestEven,
        );
        let m_y_sq = shr_round_u128(
            u128::from(m_q62) * y_sq,
            62,
            RoundingMode::NearestEven,
        ) as u64;
        let residual = (3u64 << 62) - m_y_sq;
        y_q62 = shr_round_u128(
            u128::from(y_q62) * u128::from(residual),
            63,
            RoundingMode::NearestEven,
        ) as u64;
    }

    // 1/sqrt(x) = y * 2^(-exponent/2); align Q2.62 to the output format.
    let total_shift = i64::from(out_frac_bits) - 62 - exponent / 2;
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    /// Verifies `y = 1/sqrt(x)` through `y^2 ~ 1/x`.
    ///
    /// Squaring the quantized `y` doubles its error through the binomial
    /// expansion, so the check tolerance must be at least `y` itself; on top
    /// of that a relative `2^-11` bound absorbs the Newton residual.
    fn verify(x: u64, x_frac_bits: u32, out_frac_bits: u32) {
        let y = isqrt_q(x, x_frac_bits, out_frac_bits);

        let actual = u128::from(y) * u128::from(y);
        let actual_frac_bits = 2 * out_frac_bits;

        let expected = (1u128 << 127) / u128::from(x);
        let expected_frac_bits = 127 - x_frac_bits;

        let mut max_error = u128::from(y);
        let (actual, expected) = if actual_frac_bits > expected_frac_bits {
            let shift = actual_frac_bits - expected_frac_bits;
            max_error >>= shift;
            (
                shr_round_u128(actual, shift, RoundingMode::NearestEven),
                expected,
            )
        } else {
            let shift = expected_frac_bits - actual_frac_bits;
            (
                actual,
                shr_round_u128(expected, shift, RoundingMode::NearestEven),
            )
        };

        let tolerance = (expected >> 11).max(max_error).max(1);
        let diff = expected.abs_diff(actual);
        assert!(
            diff <= tolerance,
            "x = {}@Q{}, y = {}@Q{}: diff {} exceeds tolerance {}",
            x,
            x_frac_bits,
            y,
            out_frac_bits,
            diff,
            tolerance
        );
    }

    #[test]
    fn exact_powers_of_two() {
        // 1/sqrt(4) = 0.5
        assert_eq!(isqrt_q(4, 0, 32), 1u64 << 31);
        // 1/sqrt(1) = 1
        assert_eq!(isqrt_q(1, 0, 32), 1u64 << 32);
        // 1/sqrt(0.25) = 2
        assert_eq!(isqrt_q(1 << 30, 32, 32), 1u64 << 33);
        // 1/sqrt(2^-32) = 2^16
        assert_eq!(isqrt_q(1, 32, 32), 1u64 << 48);
    }

    #[test]
    fn residual_check_across_formats() {
        verify(2, 0, 32);
        verify(3, 0, 32);
        verify(10, 0, 48);
        verify(1000, 0, 32);
        verify(u64::MAX, 0, 32);
        verify(u64::MAX, 32, 32);
        verify(1, 48, 16);
        verify((1 << 32) + (1 << 31), 32, 32); // 1.5
        verify(123456789, 16, 24);
    }

    #[test]
    fn residual_check_random_sweep() {
        let mut rng = XorShiftRng::seed_from_u64(1231275789u64);
        for _ in 0..2_000 {
            let x: u64 = rng.gen_range(1..u64::MAX);
            verify(x, 32, 32);
            verify(x, 0, 16);
        }
    }
}
