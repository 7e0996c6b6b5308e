//! Priority-queue-driven adaptive subdivision.

use super::context::{SegmentRecord, SubdivisionContext};
use super::estimator::SampledErrorEstimator;
use super::knot::Knot;
use super::quantization;
use crate::cubic::hermite_to_monomial;
use crate::transfer::TransferFunction;
use itertools::Itertools;
use tracing::{debug, trace, warn};

#[derive(Clone, Copy, Debug)]
pub struct SubdivisionConfig {
    /// Hard cap on emitted segments.
    pub segments_max: usize,
    /// Minimum segment width in domain units; quantized to the knot grid.
    pub segment_width_min: f64,
    /// Per-segment error budget.
    pub error_tolerance: f64,
}

impl Default for SubdivisionConfig {
    fn default() -> Self {
        Self {
            segments_max: 256,
            segment_width_min: 1e-5, // knots are Q8.24
            error_tolerance: 1e-6,   // coeffs are Q0.45 and Q0.46
        }
    }
}

/// The subdivider's result: segment records in logical order.
///
/// `capacity_limited` is set when refinement ran out of segments (or of
/// splittable width) with errors still above tolerance; the affected
/// segments keep their best achieved polynomial and report their residual
/// in `max_error`.
#[derive(Debug)]
pub struct SubdivisionOutcome {
    pub records: Vec<SegmentRecord>,
    pub capacity_limited: bool,
}

/// Refines Hermite segments between critical points until every segment
/// meets the error tolerance or the segment budget runs out.
///
/// Never panics in release builds: degenerate intervals are skipped,
/// non-finite samples stop refining the affected segment, and the budget
/// bounds the run unconditionally.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveSubdivider {
    config: SubdivisionConfig,
    min_width: f64,
    estimator: SampledErrorEstimator,
}

impl Default for AdaptiveSubdivider {
    fn default() -> Self {
        Self::new(SubdivisionConfig::default())
    }
}

impl AdaptiveSubdivider {
    pub fn new(config: SubdivisionConfig) -> Self {
        let grid_step = quantization::ldexp(1.0, -(quantization::KNOT_FRAC_BITS as i32));
        let min_width = quantization::knot_position(config.segment_width_min).max(grid_step);
        Self {
            config,
            min_width,
            estimator: SampledErrorEstimator::default(),
        }
    }

    pub fn config(&self) -> &SubdivisionConfig {
        &self.config
    }

    /// Subdivides `target` over the sorted `critical_points` (at minimum
    /// the domain endpoints).
    pub fn subdivide<T: TransferFunction>(
        &self,
        target: &T,
        critical_points: &[f64],
    ) -> SubdivisionOutcome {
        debug_assert!(
            critical_points.len() >= 2,
            "need at least two critical points"
        );
        debug_assert!(
            critical_points.windows(2).all(|pair| pair[0] <= pair[1]),
            "critical points must be sorted"
        );

        let mut context = SubdivisionContext::with_capacity(self.config.segments_max);
        self.initialize(&mut context, target, critical_points);
        self.refine(&mut context, target);
        self.collect(context)
    }

    /// Seeds one segment per adjacent pair of critical points.
    fn initialize<T: TransferFunction>(
        &self,
        context: &mut SubdivisionContext,
        target: &T,
        critical_points: &[f64],
    ) {
        for (&start, &end) in critical_points.iter().tuple_windows() {
            let start = self.make_knot(target, start);
            let end = self.make_knot(target, end);

            // Skip intervals that quantization collapsed.
            if end.v <= start.v {
                continue;
            }

            let record = self.make_segment(target, start, end);
            let index = context.segments.len() as u32;
            context.segments.push(record);
            context.successor_map.push_back();

            if self.should_split(&record) {
                context.enqueue(index, record.max_error);
            }
        }

        debug!(seeds = context.segments.len(), "seeded subdivision");
    }

    /// Splits the worst segment until the queue drains or the pool fills.
    fn refine<T: TransferFunction>(&self, context: &mut SubdivisionContext, target: &T) {
        // Each split needs room for one extra segment.
        while context.segments.len() < self.config.segments_max {
            let Some(entry) = context.refinement_queue.pop() else {
                break;
            };

            let parent_index = entry.index as usize;
            let parent = context.segments[parent_index];
            if !self.should_split(&parent) {
                continue;
            }

            let v_split = self.clamp_split(parent.start.v, parent.end.v, parent.v_split);
            let split_knot = self.make_knot(target, v_split);

            let left = self.make_segment(target, parent.start, split_knot);
            let right = self.make_segment(target, split_knot, parent.end);
            trace!(
                start = parent.start.v,
                split = split_knot.v,
                end = parent.end.v,
                parent_error = parent.max_error,
                "split segment"
            );

            // Reuse the parent slot for the left child; append the right.
            context.segments[parent_index] = left;
            let right_index = context.segments.len() as u32;
            context.segments.push(right);
            context.successor_map.insert_after(entry.index);

            if self.should_split(&left) {
                context.enqueue(entry.index, left.max_error);
            }
            if self.should_split(&right) {
                context.enqueue(right_index, right.max_error);
            }
        }
    }

    /// Flattens the pool into logical order; remaining queued segments are
    /// final as they stand.
    fn collect(&self, context: SubdivisionContext) -> SubdivisionOutcome {
        let mut records = Vec::with_capacity(context.segments.len());
        let mut capacity_limited = false;

        for index in context.successor_map.iter() {
            let record = context.segments[index as usize];
            if record.max_error > self.config.error_tolerance {
                capacity_limited = true;
            }
            records.push(record);
        }

        if capacity_limited {
            warn!(
                segments = records.len(),
                tolerance = self.config.error_tolerance,
                "subdivision hit capacity with residual error"
            );
        }

        SubdivisionOutcome {
            records,
            capacity_limited,
        }
    }

    fn make_knot<T: TransferFunction>(&self, target: &T, v: f64) -> Knot {
        let v = quantization::knot_position(v);
        Knot::new(v, target.eval(v))
    }

    fn make_segment<T: TransferFunction>(
        &self,
        target: &T,
        start: Knot,
        end: Knot,
    ) -> SegmentRecord {
        let width = end.v - start.v;
        let poly = quantization::polynomial(&hermite_to_monomial(start.y, end.y, width));
        let (v_split, max_error) = self.estimator.estimate(target, &poly, start.v, width);

        SegmentRecord {
            start,
            end,
            poly,
            max_error,
            v_split,
        }
    }

    /// A segment is split while its error is over budget and both children
    /// would respect the minimum width. Non-finite knots report no error
    /// (their samples never compare greater), so singular seed intervals
    /// are left alone rather than refined across.
    fn should_split(&self, record: &SegmentRecord) -> bool {
        record.max_error > self.config.error_tolerance
            && record.width() >= 2.0 * self.min_width
    }

    fn clamp_split(&self, start: f64, end: f64, hint: f64) -> f64 {
        let v = quantization::knot_position(hint);
        v.clamp(start + self.min_width, end - self.min_width)
    }
}
