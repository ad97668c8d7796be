//! Fixed-step scheduling of variable frame times.

use crate::error::PhysicsError;
use crate::float::Float;

/// Converts wall-clock frame time into whole fixed physics steps.
///
/// Every frame adds `min(frame_time / fixed_step, max_catch_up)` to the
/// accumulator, and each whole unit drained from it is one step. The clamp
/// bounds the work a single slow frame can schedule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedStepAccumulator<F: Float> {
    fixed_step: F,
    max_catch_up: F,
    accumulated: F,
}

impl<F: Float> FixedStepAccumulator<F> {
    pub fn new(fixed_step: F, max_catch_up: F) -> Result<Self, PhysicsError> {
        if !fixed_step.is_positive_finite() {
            return Err(PhysicsError::InvalidTimeStep);
        }
        if !max_catch_up.is_positive_finite() {
            return Err(PhysicsError::InvalidCatchUp);
        }
        Ok(FixedStepAccumulator {
            fixed_step,
            max_catch_up,
            accumulated: F::zero(),
        })
    }

    pub fn fixed_step(&self) -> F {
        self.fixed_step
    }

    pub fn max_catch_up(&self) -> F {
        self.max_catch_up
    }

    /// Add a frame's worth of time and return how many fixed steps to run.
    ///
    /// Negative and NaN frame times count as zero. An infinite stall is
    /// clamped like any other long frame.
    pub fn accumulate(&mut self, frame_time: F) -> usize {
        let frames = if frame_time > F::zero() {
            frame_time / self.fixed_step
        } else {
            F::zero()
        };
        if frames > self.max_catch_up {
            log::warn!(
                "frame took {:?} fixed steps, clamping catch-up to {:?}",
                frames,
                self.max_catch_up,
            );
        }
        self.accumulated = self.accumulated + frames.min(self.max_catch_up);

        let mut steps = 0;
        while self.accumulated >= F::one() {
            self.accumulated = self.accumulated - F::one();
            steps += 1;
        }
        steps
    }

    /// Fraction of a step left over, in `[0, 1)`. Hosts can interpolate
    /// rendered positions with it.
    pub fn alpha(&self) -> F {
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = F::zero();
    }
}
