//! Adaptive subdivision of a transfer function into Hermite cubic
//! segments.

mod context;
mod estimator;
mod knot;
pub mod quantization;
mod subdivider;

pub use self::context::{SegmentError, SegmentRecord, SubdivisionContext, SuccessorMap};
pub use self::estimator::SampledErrorEstimator;
pub use self::knot::Knot;
pub use self::subdivider::{AdaptiveSubdivider, SubdivisionConfig, SubdivisionOutcome};
