//! Fixed-point numbers with compile-time fractional precision.
//!
//! A value is a plain integer interpreted as a rational with `FRAC_BITS`
//! fractional bits. Addition and subtraction work on the raw integers;
//! multiplication widens to 128 bits and shifts back under a caller-selected
//! [`RoundingMode`]; division widens the numerator before the shift so no
//! precision is lost up front.

use crate::rounding::{
    div_round_u128, shr_round_i128, shr_round_u128, RoundingMode,
};
use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use num_traits::{One, Zero};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

mod exp2;
mod exp2m1;
mod isqrt;
mod log2;

pub use self::exp2::exp2_q;
pub use self::exp2m1::exp2m1_q0_64;
pub use self::isqrt::isqrt_q;
pub use self::log2::log2_q;

/// `2^exponent` as an `f64`; exact for every in-range power of two.
#[inline]
pub(crate) fn pow2(exponent: i32) -> f64 {
    f64::from(exponent).exp2()
}

macro_rules! fixed_impl_common {
    ($name:ident, $t:ty) => {
        impl<const FRAC_BITS: u32> $name<FRAC_BITS> {
            pub const BITS: u32 = <$t>::BITS;

            /// Fractional-bit count, mirrored from the type parameter.
            pub const fn frac_bits() -> u32 {
                FRAC_BITS
            }

            /// Wraps an already-scaled raw value; it is not rescaled.
            #[inline]
            pub const fn from_raw(raw: $t) -> Self {
                Self { raw }
            }

            /// Converts back to floating point: `raw / 2^FRAC_BITS`.
            #[inline]
            pub fn to_f64(self) -> f64 {
                self.raw as f64 * pow2(-(FRAC_BITS as i32))
            }

            /// Integer part, floored.
            #[inline]
            pub fn to_int(self) -> $t {
                self.raw >> FRAC_BITS
            }
        }

        impl<const FRAC_BITS: u32> Add for $name<FRAC_BITS> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self {
                    raw: self.raw + rhs.raw,
                }
            }
        }

        impl<const FRAC_BITS: u32> Sub for $name<FRAC_BITS> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self {
                    raw: self.raw - rhs.raw,
                }
            }
        }

        impl<const FRAC_BITS: u32> AddAssign for $name<FRAC_BITS> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.raw += rhs.raw;
            }
        }

        impl<const FRAC_BITS: u32> SubAssign for $name<FRAC_BITS> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                self.raw -= rhs.raw;
            }
        }

        impl<const FRAC_BITS: u32> Mul for $name<FRAC_BITS> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.mul_round(rhs, RoundingMode::NearestEven)
            }
        }

        impl<const FRAC_BITS: u32> Div for $name<FRAC_BITS> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: Self) -> Self {
                self.div_round(rhs, RoundingMode::NearestEven)
            }
        }

        impl<const FRAC_BITS: u32> Zero for $name<FRAC_BITS> {
            #[inline]
            fn zero() -> Self {
                Self::from_raw(0)
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.raw == 0
            }
        }

        impl<const FRAC_BITS: u32> One for $name<FRAC_BITS> {
            #[inline]
            fn one() -> Self {
                Self::from_int(1)
            }
        }

        impl<const FRAC_BITS: u32> fmt::Display for $name<FRAC_BITS> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_f64())
            }
        }

        impl<const FRAC_BITS: u32> Distribution<$name<FRAC_BITS>> for Standard {
            #[inline]
            fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> $name<FRAC_BITS> {
                $name::from_raw(rng.gen())
            }
        }
    };
}

macro_rules! fixed_impl_signed {
    ($name:ident, $t:ty) => {
        /// Signed fixed-point value with `FRAC_BITS` fractional bits.
        #[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
        pub struct $name<const FRAC_BITS: u32> {
            pub raw: $t,
        }

        fixed_impl_common!($name, $t);

        impl<const FRAC_BITS: u32> $name<FRAC_BITS> {
            /// Scales an integer up by `2^FRAC_BITS`.
            #[inline]
            pub fn from_int(value: $t) -> Self {
                let wide = i128::from(value) << FRAC_BITS;
                let raw = wide as $t;
                debug_assert!(i128::from(raw) == wide, "fixed: integer out of range");
                Self { raw }
            }

            /// Scales a float by `2^FRAC_BITS` and rounds to nearest even.
            ///
            /// Debug builds assert that the scaled value is representable;
            /// release builds saturate through the float-to-integer cast.
            #[inline]
            pub fn from_f64(value: f64) -> Self {
                let scaled = value * pow2(FRAC_BITS as i32);
                let limit = pow2(Self::BITS as i32 - 1);
                debug_assert!(
                    scaled >= -limit && scaled < limit,
                    "fixed: float input out of range"
                );
                Self {
                    raw: scaled.round_ties_even() as $t,
                }
            }

            /// `(self * rhs) >> FRAC_BITS` through a 128-bit product.
            #[inline]
            pub fn mul_round(self, rhs: Self, mode: RoundingMode) -> Self {
                let wide = i128::from(self.raw) * i128::from(rhs.raw);
                let shifted = shr_round_i128(wide, FRAC_BITS, mode);
                debug_assert!(
                    shifted >= i128::from(<$t>::MIN) && shifted <= i128::from(<$t>::MAX),
                    "fixed: product out of range"
                );
                Self {
                    raw: shifted as $t,
                }
            }

            /// `(self << FRAC_BITS) / rhs` with the mode's correction.
            ///
            /// Rounding is applied to the magnitude, so `NearestEven` and
            /// `AwayFromZero` stay symmetric around zero.
            #[inline]
            pub fn div_round(self, rhs: Self, mode: RoundingMode) -> Self {
                debug_assert!(rhs.raw != 0, "fixed: division by zero");
                let numerator = i128::from(self.raw) << FRAC_BITS;
                let denominator = i128::from(rhs.raw);
                let negative = (numerator < 0) != (denominator < 0);
                let n = numerator.unsigned_abs();
                let d = denominator.unsigned_abs();
                let q = div_round_u128(n / d, n % d, d, mode);
                let signed = if negative { -(q as i128) } else { q as i128 };
                debug_assert!(
                    signed >= i128::from(<$t>::MIN) && signed <= i128::from(<$t>::MAX),
                    "fixed: quotient out of range"
                );
                Self {
                    raw: signed as $t,
                }
            }
        }

        impl<const FRAC_BITS: u32> Neg for $name<FRAC_BITS> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { raw: -self.raw }
            }
        }
    };
}

macro_rules! fixed_impl_unsigned {
    ($name:ident, $t:ty) => {
        /// Unsigned fixed-point value with `FRAC_BITS` fractional bits.
        #[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
        pub struct $name<const FRAC_BITS: u32> {
            pub raw: $t,
        }

        fixed_impl_common!($name, $t);

        impl<const FRAC_BITS: u32> $name<FRAC_BITS> {
            /// Scales an integer up by `2^FRAC_BITS`.
            #[inline]
            pub fn from_int(value: $t) -> Self {
                let wide = u128::from(value) << FRAC_BITS;
                let raw = wide as $t;
                debug_assert!(u128::from(raw) == wide, "fixed: integer out of range");
                Self { raw }
            }

            /// Scales a float by `2^FRAC_BITS` and rounds to nearest even.
            #[inline]
            pub fn from_f64(value: f64) -> Self {
                let scaled = value * pow2(FRAC_BITS as i32);
                let limit = pow2(Self::BITS as i32);
                debug_assert!(
                    scaled >= 0.0 && scaled < limit,
                    "fixed: float input out of range"
                );
                Self {
                    raw: scaled.round_ties_even() as $t,
                }
            }

            /// `(self * rhs) >> FRAC_BITS` through a 128-bit product.
            #[inline]
            pub fn mul_round(self, rhs: Self, mode: RoundingMode) -> Self {
                let wide = u128::from(self.raw) * u128::from(rhs.raw);
                let shifted = shr_round_u128(wide, FRAC_BITS, mode);
                debug_assert!(
                    shifted <= u128::from(<$t>::MAX),
                    "fixed: product out of range"
                );
                Self {
                    raw: shifted as $t,
                }
            }

            /// `(self << FRAC_BITS) / rhs` with the mode's correction.
            #[inline]
            pub fn div_round(self, rhs: Self, mode: RoundingMode) -> Self {
                debug_assert!(rhs.raw != 0, "fixed: division by zero");
                let n = u128::from(self.raw) << FRAC_BITS;
                let d = u128::from(rhs.raw);
                let q = div_round_u128(n / d, n % d, d, mode);
                debug_assert!(q <= u128::from(<$t>::MAX), "fixed: quotient out of range");
                Self { raw: q as $t }
            }
        }
    };
}

fixed_impl_signed!(FixedI16, i16);
fixed_impl_signed!(FixedI32, i32);
fixed_impl_signed!(FixedI64, i64);
fixed_impl_unsigned!(FixedU16, u16);
fixed_impl_unsigned!(FixedU32, u32);
fixed_impl_unsigned!(FixedU64, u64);

pub type FixedQ15_0 = FixedI16<0>;
pub type FixedQ8_24 = FixedI64<24>;
pub type FixedQ32_32 = FixedI64<32>;
pub type FixedQ16_48 = FixedI64<48>;
pub type FixedQ1_63 = FixedI64<63>;
pub type FixedQ0_64 = FixedU64<64>;

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    macro_rules! identity_tests {
        ($($alias:ident: $fixed:ty,)*) => {
            paste::paste! {
                $(
                    #[test]
                    fn [<$alias _identities>]() {
                        let one = <$fixed>::one();
                        let zero = <$fixed>::zero();
                        let x = <$fixed>::from_f64(1.25);
                        assert_eq!(x + zero, x);
                        assert_eq!(x - x, zero);
                        assert_eq!(x.mul_round(one, RoundingMode::NearestEven), x);
                        assert_eq!(x.div_round(one, RoundingMode::NearestEven), x);
                    }
                )*
            }
        };
    }

    identity_tests! {
        q7_8: FixedI16<8>,
        q15_16: FixedI32<16>,
        q31_32: FixedI64<32>,
        uq8_8: FixedU16<8>,
        uq16_16: FixedU32<16>,
        uq32_32: FixedU64<32>,
    }

    #[test]
    fn integer_conversions_scale_by_frac_bits() {
        assert_eq!(FixedQ32_32::from_int(3).raw, 3i64 << 32);
        assert_eq!(FixedQ32_32::from_int(-3).raw, -3i64 << 32);
        assert_eq!(FixedQ32_32::from_int(3).to_int(), 3);
        assert_eq!(FixedQ15_0::from_int(-7).raw, -7);
    }

    #[test]
    fn float_conversions_round_to_nearest_even() {
        assert_eq!(FixedQ32_32::from_f64(1.5).raw, 3i64 << 31);
        assert_eq!(FixedQ32_32::from_f64(1.5).to_f64(), 1.5);
        // Exactly half an ulp rounds to the even raw value.
        let half_ulp = pow2(-33);
        assert_eq!(FixedQ32_32::from_f64(half_ulp).raw, 0);
        assert_eq!(FixedQ32_32::from_f64(3.0 * half_ulp).raw, 2);
        assert_eq!(FixedQ32_32::from_f64(-half_ulp).raw, 0);
    }

    #[test]
    fn zero_has_a_single_representation() {
        assert_eq!(FixedQ32_32::from_f64(0.0).raw, 0);
        assert_eq!(FixedQ32_32::from_f64(-0.0).raw, 0);
        assert_eq!(FixedQ32_32::zero().raw, 0);
        assert!(FixedQ32_32::from_int(0).is_zero());
    }

    #[test]
    fn conversion_is_exact_at_the_boundary() {
        // -2^(W-1-F) is the most negative representable value.
        let boundary = -pow2(31);
        assert_eq!(FixedQ32_32::from_f64(boundary).raw, i64::MIN);
        assert_eq!(FixedQ32_32::from_f64(boundary).to_f64(), boundary);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn conversion_past_the_boundary_asserts() {
        // One representable float step past -2^31.
        let _ = FixedQ32_32::from_f64(-pow2(31) * (1.0 + f64::EPSILON));
    }

    #[test]
    fn addition_and_subtraction_are_raw() {
        let a = FixedQ32_32::from_f64(1.25);
        let b = FixedQ32_32::from_f64(0.75);
        assert_eq!((a + b).to_f64(), 2.0);
        assert_eq!((a - b).to_f64(), 0.5);
        assert_eq!((-a).to_f64(), -1.25);
    }

    #[test]
    fn multiplication_widens_and_rescales() {
        let a = FixedQ32_32::from_f64(1.5);
        let b = FixedQ32_32::from_f64(2.5);
        assert_eq!((a * b).to_f64(), 3.75);
        assert_eq!((a * -b).to_f64(), -3.75);
    }

    #[test]
    fn multiplication_rounding_modes_differ_on_ties() {
        // 8/16 * 9/16 = 72/256 = 4.5/16: a tie at Q4.
        let a = FixedI64::<4>::from_raw(8);
        let b = FixedI64::<4>::from_raw(9);
        assert_eq!(a.mul_round(b, RoundingMode::Truncate).raw, 4);
        assert_eq!(a.mul_round(b, RoundingMode::NearestEven).raw, 4);
        assert_eq!(a.mul_round(b, RoundingMode::AwayFromZero).raw, 5);
        assert_eq!((-a).mul_round(b, RoundingMode::NearestEven).raw, -4);
        assert_eq!((-a).mul_round(b, RoundingMode::AwayFromZero).raw, -5);
    }

    #[test]
    fn division_widens_the_numerator() {
        let a = FixedQ32_32::from_int(1);
        let b = FixedQ32_32::from_int(3);
        let third = a.div_round(b, RoundingMode::NearestEven);
        assert!((third.to_f64() - 1.0 / 3.0).abs() < pow2(-32));
        // Symmetry of the rounded quotient.
        assert_eq!((-a).div_round(b, RoundingMode::NearestEven).raw, -third.raw);
    }

    #[test]
    fn division_rounding_modes_differ_on_ties() {
        // (3 << 4) / 8 = 6 exactly at Q4; (3 << 4) / 32 = 1.5 raw.
        let n = FixedI64::<4>::from_raw(3);
        let d = FixedI64::<4>::from_raw(32);
        assert_eq!(n.div_round(d, RoundingMode::Truncate).raw, 1);
        assert_eq!(n.div_round(d, RoundingMode::NearestEven).raw, 2);
        assert_eq!(n.div_round(d, RoundingMode::AwayFromZero).raw, 2);
        assert_eq!((-n).div_round(d, RoundingMode::NearestEven).raw, -2);
        assert_eq!((-n).div_round(d, RoundingMode::Truncate).raw, -1);
    }

    #[test]
    fn standard_distribution_samples_full_range_raw_bits() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand_xorshift::XorShiftRng::seed_from_u64(1231275789);
        let a: FixedQ32_32 = rng.gen();
        let b: FixedQ32_32 = rng.gen();
        assert_ne!(a, b);
        let c: FixedQ0_64 = rng.gen();
        assert_eq!(FixedQ0_64::from_raw(c.raw), c);
    }

    #[test]
    fn unsigned_q0_64_covers_the_unit_interval() {
        let half = FixedQ0_64::from_f64(0.5);
        assert_eq!(half.raw, 1u64 << 63);
        assert_eq!(half.to_f64(), 0.5);
        let quarter = half.mul_round(half, RoundingMode::NearestEven);
        assert_eq!(quarter.raw, 1u64 << 62);
    }
}
