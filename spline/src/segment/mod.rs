//! Spline segment records: math format, wire format, and the fixed-point
//! evaluator.

mod construction;
mod eval;
mod packing;

pub use self::construction::{create_segment, SegmentParams};
pub use self::eval::{eval_poly, x_to_t};
pub use self::packing::{pack, unpack};

pub const COEFF_COUNT: usize = 4;

// Fixed-point precision of the evaluator.
pub const T_FRAC_BITS: u32 = 48;
pub const OUT_FRAC_BITS: u32 = 32;

// Packed storage layout: 45 coefficient bits per word, the rest payload.
pub const COEFF_STORAGE_BITS: u32 = 45;
pub const COEFF_SHIFT: u32 = 64 - COEFF_STORAGE_BITS;
pub const PAYLOAD_BITS: u32 = COEFF_SHIFT;
pub const PAYLOAD_MASK: u64 = (1 << PAYLOAD_BITS) - 1;

// Signed coefficients (a, b): implicit 1 and sign at bit 44.
pub const SIGNED_IMPLICIT_BIT: u32 = 44;
pub const SIGN_BIT: u32 = 44;
pub const SIGNED_MANTISSA_MASK: u64 = (1 << SIGNED_IMPLICIT_BIT) - 1;

// Unsigned coefficients (c, d): implicit 1 at bit 45.
pub const UNSIGNED_IMPLICIT_BIT: u32 = 45;
pub const UNSIGNED_MANTISSA_MASK: u64 = (1 << UNSIGNED_IMPLICIT_BIT) - 1;

// Inverse width: implicit 1 at bit 46.
pub const INV_WIDTH_IMPLICIT_BIT: u32 = 46;
pub const INV_WIDTH_STORAGE_MASK: u64 = (1 << INV_WIDTH_IMPLICIT_BIT) - 1;

// Shift encoding.
pub const SHIFT_BITS: u32 = 6;
pub const SHIFT_MASK: u64 = (1 << SHIFT_BITS) - 1;

/// Sentinel shift marking a zero coefficient, where no implicit bit
/// applies.
pub const DENORMAL_SHIFT: u8 = 62;

/// Cubic coefficients in math format.
///
/// Signed coefficients carry their implicit leading 1 at bit 44, unsigned
/// at bit 45; `shifts` holds each coefficient's fractional-bit exponent.
/// A zero coefficient is the distinguished pair `(0, DENORMAL_SHIFT)`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormalizedPoly {
    pub coeffs: [i64; COEFF_COUNT],
    pub shifts: [u8; COEFF_COUNT],
}

/// Reciprocal of the segment width, implicit 1 at bit 46.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormalizedInvWidth {
    pub value: u64,
    pub shift: u8,
}

/// The math-format record used during construction and evaluation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormalizedSegment {
    pub poly: NormalizedPoly,
    pub inv_width: NormalizedInvWidth,
}

/// Four little-endian 64-bit words carrying one normalized segment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PackedSegment(pub [u64; 4]);
