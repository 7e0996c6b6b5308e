//! Spline wire format.
//!
//! ```text
//! magic           : 4 bytes, "CRVS"
//! version         : u16, current = 1
//! segment_count   : u16, <= 256
//! v_to_x          : i64, Q32.32
//! x_end_max       : i64, Q32.32
//! knot_positions  : i64[segment_count + 1], Q8.24, strictly increasing
//! segments        : [u64; 4][segment_count], little-endian words
//! ```
//!
//! The knot-position vector is redundant with the segments' widths but
//! provides the binary search without unpacking.

use crate::segment::PackedSegment;
use crate::spline::{Spline, SEGMENTS_MAX};
use core::fmt;
use curves_math::{FixedQ32_32, FromBytes};
use std::io::{self, Read};

pub const MAGIC: [u8; 4] = *b"CRVS";
pub const VERSION: u16 = 1;

/// Malformed wire data. Surfaced as a value; decoding never panics.
#[derive(Debug)]
pub enum DecodeError {
    /// The stream does not start with `"CRVS"`.
    BadMagic([u8; 4]),
    /// The version is not one this reader understands.
    UnsupportedVersion(u16),
    /// The segment count exceeds the 256-segment cap or is zero.
    SegmentCountOutOfRange(u16),
    /// Knot positions are not strictly increasing.
    NonMonotoneKnots,
    /// Bytes remain after the last segment.
    TrailingBytes(usize),
    /// The stream ended early or reading failed.
    IoError(io::Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DecodeError::BadMagic(magic) => {
                write!(f, "unknown magic {magic:?}")
            }
            DecodeError::UnsupportedVersion(version) => {
                write!(f, "unsupported version {version}")
            }
            DecodeError::SegmentCountOutOfRange(count) => {
                write!(f, "segment count {count} out of range")
            }
            DecodeError::NonMonotoneKnots => {
                write!(f, "knot positions are not strictly increasing")
            }
            DecodeError::TrailingBytes(count) => {
                write!(f, "{count} trailing bytes after the last segment")
            }
            DecodeError::IoError(error) => write!(f, "I/O error: {error:?}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<io::Error> for DecodeError {
    fn from(error: io::Error) -> DecodeError {
        DecodeError::IoError(error)
    }
}

impl Spline {
    /// Serializes to the wire format. Writing into a `Vec` cannot fail.
    pub fn to_packed(&self) -> Vec<u8> {
        let segment_count = self.segments.len();
        let mut bytes =
            Vec::with_capacity(4 + 2 + 2 + 8 + 8 + 8 * (segment_count + 1) + 32 * segment_count);

        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&(segment_count as u16).to_le_bytes());
        bytes.extend_from_slice(&self.v_to_x.raw.to_le_bytes());
        bytes.extend_from_slice(&self.x_end_max.raw.to_le_bytes());
        for knot in &self.knot_positions {
            bytes.extend_from_slice(&knot.to_le_bytes());
        }
        for segment in &self.segments {
            for word in &segment.0 {
                bytes.extend_from_slice(&word.to_le_bytes());
            }
        }

        bytes
    }

    /// Decodes the wire format, validating magic, version, counts, and
    /// knot monotonicity.
    ///
    /// Residual-error metadata does not travel on the wire; a decoded
    /// spline reports no capacity limitation.
    pub fn from_packed(bytes: &[u8]) -> Result<Spline, DecodeError> {
        let mut reader = bytes;

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }

        let version = u16::read(&mut reader)?;
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let segment_count = u16::read(&mut reader)?;
        if segment_count == 0 || segment_count as usize > SEGMENTS_MAX {
            return Err(DecodeError::SegmentCountOutOfRange(segment_count));
        }
        let segment_count = segment_count as usize;

        let v_to_x = FixedQ32_32::from_raw(i64::read(&mut reader)?);
        let x_end_max = FixedQ32_32::from_raw(i64::read(&mut reader)?);

        let mut knot_positions = Vec::with_capacity(segment_count + 1);
        for _ in 0..=segment_count {
            knot_positions.push(i64::read(&mut reader)?);
        }
        if !knot_positions.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(DecodeError::NonMonotoneKnots);
        }

        let mut segments = Vec::with_capacity(segment_count);
        for _ in 0..segment_count {
            segments.push(PackedSegment(<[u64; 4]>::read(&mut reader)?));
        }

        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes(reader.len()));
        }

        Ok(Spline {
            v_to_x,
            x_end_max,
            knot_positions,
            residual_errors: vec![0.0; segment_count],
            capacity_limited: false,
            segments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Synchronous;
    use crate::spline::SplineBuilder;
    use crate::transfer::FromSensitivity;
    use curves_math::FixedQ32_32 as Fixed;

    fn build() -> Spline {
        SplineBuilder::default().build(&FromSensitivity::new(Synchronous::default()))
    }

    #[test]
    fn round_trips_through_the_wire_format() {
        let spline = build();
        let bytes = spline.to_packed();
        let decoded = Spline::from_packed(&bytes).unwrap();

        assert_eq!(decoded.to_packed(), bytes);
        for v in [0.0, 0.5, 3.0, 77.7, 255.9] {
            let v = Fixed::from_f64(v);
            assert_eq!(spline.eval(v), decoded.eval(v));
        }
    }

    #[test]
    fn rejects_unknown_magic() {
        let mut bytes = build().to_packed();
        bytes[0] = b'X';
        assert!(matches!(
            Spline::from_packed(&bytes),
            Err(DecodeError::BadMagic(_))
        ));
    }

    #[test]
    fn rejects_unknown_versions() {
        let mut bytes = build().to_packed();
        bytes[4] = 0xFF;
        assert!(matches!(
            Spline::from_packed(&bytes),
            Err(DecodeError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_segment_counts() {
        let mut bytes = build().to_packed();
        bytes[6] = 0xFF;
        bytes[7] = 0xFF;
        assert!(matches!(
            Spline::from_packed(&bytes),
            Err(DecodeError::SegmentCountOutOfRange(0xFFFF))
        ));
    }

    #[test]
    fn rejects_non_monotone_knots() {
        let spline = build();
        let mut bytes = spline.to_packed();
        // Swap the first two knot positions in place.
        let base = 4 + 2 + 2 + 8 + 8;
        let (first, second) = (base, base + 8);
        for i in 0..8 {
            bytes.swap(first + i, second + i);
        }
        assert!(matches!(
            Spline::from_packed(&bytes),
            Err(DecodeError::NonMonotoneKnots)
        ));
    }

    #[test]
    fn rejects_truncation_and_trailing_bytes() {
        let bytes = build().to_packed();

        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(
            Spline::from_packed(truncated),
            Err(DecodeError::IoError(_))
        ));

        let mut extended = bytes.clone();
        extended.push(0);
        assert!(matches!(
            Spline::from_packed(&extended),
            Err(DecodeError::TrailingBytes(1))
        ));
    }
}
