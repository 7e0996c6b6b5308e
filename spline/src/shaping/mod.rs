//! Input shaping: piecewise ease-in / linear / ease-out composition.

mod ease_in;
mod ease_out;
mod functions;
mod input_shaping;
mod transition;

pub use self::ease_in::EaseIn;
pub use self::ease_out::EaseOut;
pub use self::functions::{Reflected, SmootherStepIntegral, TransitionFunction};
pub use self::input_shaping::{InputShaping, ShapingResult};
pub use self::transition::Transition;
