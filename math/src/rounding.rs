//! Integer rounding modes applied after right shifts and divisions.
//!
//! A native shift or division truncates. These helpers take the truncated
//! result and conditionally correct it by `+1` ulp, without double rounding
//! and without widening past the operand type. The more-than-half check on
//! divisions uses `rem > divisor - rem`, so the doubled remainder never
//! overflows.

/// Rounding applied to the bits discarded by a right shift or division.
///
/// The mode is selected per operation, not per type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundingMode {
    /// Native integer behavior: division truncates toward zero and shifts
    /// floor toward negative infinity. Fastest, most biased. Not suitable
    /// for signal paths.
    Truncate,
    /// Round half to even (banker's rounding). The default: zero bias over
    /// long runs.
    NearestEven,
    /// Round half away from zero. Symmetric around zero, slightly biased.
    AwayFromZero,
}

macro_rules! impl_shr_round_unsigned {
    ($fn_name:ident, $t:ty) => {
        /// `value >> shift` corrected per `mode`.
        #[inline]
        pub fn $fn_name(value: $t, shift: u32, mode: RoundingMode) -> $t {
            debug_assert!(shift < <$t>::BITS);
            if shift == 0 {
                return value;
            }
            let shifted = value >> shift;
            let rem = value & ((1 << shift) - 1);
            let half = 1 << (shift - 1);
            let round_up = match mode {
                RoundingMode::Truncate => false,
                RoundingMode::NearestEven => rem > half || (rem == half && shifted & 1 == 1),
                RoundingMode::AwayFromZero => rem >= half,
            };
            if round_up {
                shifted + 1
            } else {
                shifted
            }
        }
    };
}

macro_rules! impl_shr_round_signed {
    ($fn_name:ident, $t:ty, $ut:ty) => {
        /// `value >> shift` corrected per `mode`.
        ///
        /// The arithmetic shift floors toward negative infinity; the
        /// remainder is therefore non-negative and the correction is always
        /// `+1`.
        #[inline]
        pub fn $fn_name(value: $t, shift: u32, mode: RoundingMode) -> $t {
            debug_assert!(shift < <$t>::BITS);
            if shift == 0 {
                return value;
            }
            let shifted = value >> shift;
            let rem = (value as $ut) & ((1 << shift) - 1);
            let half: $ut = 1 << (shift - 1);
            let round_up = match mode {
                RoundingMode::Truncate => false,
                RoundingMode::NearestEven => {
                    rem > half || (rem == half && (shifted as $ut) & 1 == 1)
                }
                RoundingMode::AwayFromZero => rem > half || (rem == half && value >= 0),
            };
            if round_up {
                shifted + 1
            } else {
                shifted
            }
        }
    };
}

impl_shr_round_unsigned!(shr_round_u16, u16);
impl_shr_round_unsigned!(shr_round_u32, u32);
impl_shr_round_unsigned!(shr_round_u64, u64);
impl_shr_round_unsigned!(shr_round_u128, u128);

impl_shr_round_signed!(shr_round_i16, i16, u16);
impl_shr_round_signed!(shr_round_i32, i32, u32);
impl_shr_round_signed!(shr_round_i64, i64, u64);
impl_shr_round_signed!(shr_round_i128, i128, u128);

macro_rules! impl_div_round_unsigned {
    ($fn_name:ident, $t:ty) => {
        /// Corrects a truncated `quotient = dividend / divisor` given its
        /// `remainder`, per `mode`.
        #[inline]
        pub fn $fn_name(quotient: $t, remainder: $t, divisor: $t, mode: RoundingMode) -> $t {
            debug_assert!(remainder < divisor);
            let round_up = match mode {
                RoundingMode::Truncate => false,
                RoundingMode::NearestEven => {
                    remainder > divisor - remainder
                        || (remainder == divisor - remainder && quotient & 1 == 1)
                }
                RoundingMode::AwayFromZero => remainder >= divisor - remainder,
            };
            if round_up {
                quotient + 1
            } else {
                quotient
            }
        }
    };
}

impl_div_round_unsigned!(div_round_u64, u64);
impl_div_round_unsigned!(div_round_u128, u128);
