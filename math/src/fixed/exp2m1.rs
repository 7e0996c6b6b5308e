//! `2^-x - 1` on `[0, 1)`, Q0.64 in, Q1.63 out.
//!
//! Degree-8 minimax polynomial evaluated by Horner's method in mixed
//! Q-formats. Each stage multiplies by the Q0.64 input, shifts back by the
//! stage's relative exponent with a round-half-up correction, and adds the
//! next coefficient. The final stage realigns from Q-0.127 to Q1.63.
//!
//! Used by the speed-filter halflife mapping and as the fraction kernel of
//! [`exp2_q`](super::exp2_q).

use super::{FixedQ0_64, FixedQ1_63};

const IN_FRAC_BITS: u32 = 64;
const OUT_FRAC_BITS: u32 = 63;

// approx error: 5.913e-13 over [0, 1)
#[rustfmt::skip]
const POLY_COEFFS: [i64; 8] = [
    9095336410655506548,  // 9.40435742942734746862840772884729e-7*x^8 (Q-20.83)
    -8818019289740466690, // -1.45881891951838665251524305863312e-5*x^7 (Q-16.79)
    5795025834175902226,  // 1.53393056616775775419164387506146e-4*x^6 (Q-12.75)
    -6294873603319405290, // -1.33299133520323333419811185664161e-3*x^5 (Q-9.72)
    5677469737884917072,  // 9.61800785005552266748209133684355e-3*x^4 (Q-6.69)
    -8190957396465878113, // -5.55040862749032269297011672748443e-2*x^3 (Q-4.67)
    8862793713294503620,  // 0.24022650495611929364909303830089*x^2 (Q-2.65)
    -6393154322035900772, // -0.69314718049864158496212174220829*x^1 (Q0.63)
];

// Relative shift from each stage's Q-format to the next.
const POLY_SHIFTS: [u32; 7] = [4, 4, 3, 3, 2, 2, 2];

const FINAL_POLY_SHIFT: u32 = 63;

/// Evaluates `2^-x - 1` for `x` in `[0, 1)`.
///
/// The result lies in `(-0.5, 0]`. Bit-exact: the coefficient table, the
/// shift schedule, and the per-stage round-half-up corrections fully
/// determine every output bit.
pub fn exp2m1_q0_64(x: FixedQ0_64) -> FixedQ1_63 {
    let input = i128::from(x.raw);

    let mut acc = i128::from(POLY_COEFFS[0]);
    for i in 0..POLY_COEFFS.len() - 1 {
        acc *= input;

        let shift = IN_FRAC_BITS + POLY_SHIFTS[i];
        acc = (acc >> shift) + ((acc >> (shift - 1)) & 1);
        acc += i128::from(POLY_COEFFS[i + 1]);
    }

    acc *= input;

    let rshift = FINAL_POLY_SHIFT + IN_FRAC_BITS - OUT_FRAC_BITS;
    let shifted = (acc >> rshift) + ((acc >> (rshift - 1)) & 1);
    FixedQ1_63::from_raw(shifted as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Vector {
        input: u64,
        expected: i64,
    }

    #[rustfmt::skip]
    const VECTORS: &[Vector] = &[
        Vector { input: 0x0000_0000_0000_0000, expected: 0x0000_0000_0000_0000 }, // 2^0 - 1 = 0
        Vector { input: 0x0000_0000_0000_0001, expected: 0x0000_0000_0000_0000 },

        Vector { input: 0x3fff_ffff_ffff_ffff, expected: -0x145d_819a_9458_d280 },
        Vector { input: 0x4000_0000_0000_0000, expected: -0x145d_819a_9458_d280 }, // 2^-0.25 - 1
        Vector { input: 0x4000_0000_0000_0001, expected: -0x145d_819a_9458_d281 },

        Vector { input: 0x7fff_ffff_ffff_ffff, expected: -0x257d_8666_030d_c49f },
        Vector { input: 0x8000_0000_0000_0000, expected: -0x257d_8666_030d_c49f }, // 2^-0.5 - 1
        Vector { input: 0x8000_0000_0000_0001, expected: -0x257d_8666_030d_c4a0 },

        Vector { input: 0xbfff_ffff_ffff_ffff, expected: -0x33e4_07d7_397c_8cf3 },
        Vector { input: 0xc000_0000_0000_0000, expected: -0x33e4_07d7_397c_8cf3 }, // 2^-0.75 - 1
        Vector { input: 0xc000_0000_0000_0001, expected: -0x33e4_07d7_397c_8cf3 },

        Vector { input: 0xffff_ffff_ffff_fffe, expected: -0x4000_0000_0000_0000 },
        Vector { input: 0xffff_ffff_ffff_ffff, expected: -0x4000_0000_0000_0001 }, // 2^-1 - 1
    ];

    #[test]
    fn known_vectors_are_bit_exact() {
        for vector in VECTORS {
            let actual = exp2m1_q0_64(FixedQ0_64::from_raw(vector.input));
            assert_eq!(
                actual.raw, vector.expected,
                "input = {:#x}",
                vector.input
            );
        }
    }

    #[test]
    fn matches_the_float_reference_within_budget() {
        // Documented approximation error is 5.92e-13; the slack on top
        // covers the f64 reference's own rounding at this scale.
        let budget = (7e-13 * super::super::pow2(63)) as i64;
        for i in 0..=1_000u64 {
            let x = i.wrapping_mul(0x0041_8937_4BC6_A7EF); // ~ i / 1000 in Q0.64
            let actual = exp2m1_q0_64(FixedQ0_64::from_raw(x));
            let x_real = x as f64 * super::super::pow2(-64);
            let expected = ((-x_real).exp2() - 1.0) * super::super::pow2(63);
            let diff = (actual.raw as f64 - expected).abs() as i64;
            assert!(
                diff <= budget,
                "x = {:#x}: diff {} exceeds {}",
                x,
                diff,
                budget
            );
        }
    }
}
