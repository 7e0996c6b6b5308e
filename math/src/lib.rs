//! Arithmetic substrate for pointer-acceleration curves: fixed-point numbers
//! with compile-time fractional precision, 128-bit intermediate primitives,
//! rounding-mode-correct shifts and divides, bit-exact transcendentals, and
//! autodifferentiating jets.
//!
//! Everything here is deterministic: given the same inputs, every operation
//! produces the same bits on every platform. The spline builder relies on
//! that to reproduce floating-point construction results in the fixed-point
//! evaluator.

#![deny(unused_import_braces, trivial_casts)]
#![deny(trivial_numeric_casts, variant_size_differences)]
#![deny(non_shorthand_field_patterns, unused_attributes, unused_imports)]
#![deny(unused_extern_crates, renamed_and_removed_lints, unused_allocation)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]
#![deny(unused_mut, unused_unsafe)]
#![cfg_attr(not(target_arch = "x86_64"), forbid(unsafe_code))]

#[macro_use]
extern crate derivative;

pub mod bytes;
pub use self::bytes::*;

pub mod rounding;
pub use self::rounding::*;

pub mod integer;
pub use self::integer::*;

pub mod fixed;
pub use self::fixed::*;

pub mod jet;
pub use self::jet::*;

pub mod extrema;
pub use self::extrema::*;

pub mod accumulator;
pub use self::accumulator::*;

pub mod error_metrics;
pub use self::error_metrics::*;

pub mod numeric;
pub use self::numeric::*;

pub use num_traits::{One, Zero};

pub mod prelude {
    pub use crate::accumulator::CompensatedAccumulator;

    pub use crate::bytes::{FromBytes, ToBytes};

    pub use crate::error_metrics::ErrorMetrics;

    pub use crate::extrema::{ArgMax, ArgMin, MinMax};

    pub use crate::fixed::{FixedQ0_64, FixedQ1_63, FixedQ32_32, FixedQ8_24};

    pub use crate::jet::{Jet, Real};

    pub use crate::rounding::RoundingMode;

    pub use num_traits::{One, Zero};
}
