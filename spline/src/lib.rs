//! Build and evaluation pipeline for pointer-acceleration curves.
//!
//! At build time, validated parameters become a parametric curve, the curve
//! becomes a transfer function `T(x)` through one of two user
//! interpretations (sensitivity or gain), input shaping composes onto it,
//! and an adaptive subdivider approximates the result with at most 256
//! Hermite cubic segments packed into a 256-bit wire record each. At
//! evaluation time a velocity sample is rescaled into the spline domain,
//! the containing segment is found by binary search, and a fixed-point
//! Horner pass produces the output with bit-exact determinism.

#![warn(unused, future_incompatible, nonstandard_style, rust_2018_idioms)]
#![deny(unsafe_code)]

#[macro_use]
extern crate derivative;

pub mod cubic;
pub mod curve;
pub mod param;
pub mod segment;
pub mod shaping;
pub mod spline;
pub mod subdivision;
pub mod transfer;
pub mod wire;

pub use crate::cubic::{hermite_to_monomial, Monomial};
pub use crate::curve::{Curve, Log1p, Synchronous, SynchronousConfig};
pub use crate::param::{ChoiceParam, FlagParam, NullReporter, Param, Reporter};
pub use crate::segment::{NormalizedSegment, PackedSegment};
pub use crate::spline::{Spline, SplineBuilder, SEGMENTS_MAX, X_END_MAX};
pub use crate::subdivision::{AdaptiveSubdivider, SubdivisionConfig};
pub use crate::transfer::{FromGain, FromSensitivity, ShapedTransfer, TransferFunction};
pub use crate::wire::DecodeError;
