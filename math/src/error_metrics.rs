//! Statistical error accumulation against a high-precision reference.

use crate::accumulator::CompensatedAccumulator;
use crate::extrema::ArgMax;
use core::fmt;

/// Cutoff below which relative error is not accumulated.
const RELATIVE_CUTOFF: f64 = 1e-12;

/// Accumulates max/RMS absolute and relative error of an approximation.
///
/// The squared-error sums use Kahan compensation; samples whose reference
/// magnitude is below `1e-12` only count toward the sample total, so the
/// relative terms cannot explode near zeros of the reference.
#[derive(Derivative)]
#[derivative(Clone, Debug, Default)]
pub struct ErrorMetrics {
    #[derivative(Default(value = "ArgMax { value: 0.0, arg: 0.0 }"))]
    pub max_abs: ArgMax<f64, f64>,
    #[derivative(Default(value = "ArgMax { value: 0.0, arg: 0.0 }"))]
    pub max_rel: ArgMax<f64, f64>,
    sse_abs: CompensatedAccumulator<f64>,
    sse_rel: CompensatedAccumulator<f64>,
    pub num_samples: u64,
}

impl ErrorMetrics {
    pub fn sample(&mut self, x: f64, actual: f64, expected: f64) {
        self.num_samples += 1;

        // Skip near zero so rel doesn't explode.
        if expected.abs() < RELATIVE_CUTOFF {
            return;
        }

        let abs_err = (actual - expected).abs();
        self.max_abs.sample(x, abs_err);
        self.sse_abs += abs_err * abs_err;

        let rel_err = abs_err / expected.abs();
        self.max_rel.sample(x, rel_err);
        self.sse_rel += rel_err * rel_err;
    }

    pub fn mse_abs(&self) -> f64 {
        self.sse_abs.value() / self.num_samples as f64
    }

    pub fn mse_rel(&self) -> f64 {
        self.sse_rel.value() / self.num_samples as f64
    }

    pub fn rmse_abs(&self) -> f64 {
        self.mse_abs().sqrt()
    }

    pub fn rmse_rel(&self) -> f64 {
        self.mse_rel().sqrt()
    }
}

impl fmt::Display for ErrorMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples: {}", self.num_samples)?;
        writeln!(
            f,
            "Max Abs Error: {} (x = {})",
            self.max_abs.value, self.max_abs.arg
        )?;
        writeln!(f, "RMSE Abs: {}", self.rmse_abs())?;
        writeln!(
            f,
            "Max Rel Error: {} (x = {})",
            self.max_rel.value, self.max_rel.arg
        )?;
        write!(f, "RMSE Rel: {}", self.rmse_rel())
    }
}
