//! Fixed timestep accumulator
//!
//! Consumes irregular frame deltas in fixed-size chunks and reports the
//! fractional progress into the next unexecuted step for interpolation.

use tracing::debug;

/// Accumulator for fixed timestep updates
#[derive(Debug, Clone)]
pub struct StepAccumulator {
    /// Accumulated time not yet consumed by a step
    accumulator: f32,
    /// Fixed timestep for physics updates
    fixed_timestep: f32,
    /// Upper bound on a single frame delta
    max_frame_delta: f32,
}

impl StepAccumulator {
    /// Create a new accumulator with the given fixed timestep and frame clamp
    pub fn new(fixed_timestep: f32, max_frame_delta: f32) -> Self {
        Self {
            accumulator: 0.0,
            fixed_timestep,
            max_frame_delta,
        }
    }

    /// Add a frame delta to the accumulator
    ///
    /// Returns `false` without touching the accumulator when `delta_time` is
    /// not positive. Deltas above the frame clamp are reduced to it so a stall
    /// cannot queue an unbounded number of catch-up steps.
    pub fn accumulate(&mut self, delta_time: f32) -> bool {
        // We can't step backwards.
        if !(delta_time > 0.0) {
            debug!(delta_time, "Rejecting non-positive frame delta");
            return false;
        }

        let delta_time = if delta_time > self.max_frame_delta {
            debug!(
                delta_time,
                max = self.max_frame_delta,
                "Clamping frame delta"
            );
            self.max_frame_delta
        } else {
            delta_time
        };

        self.accumulator += delta_time;
        true
    }

    /// Consume one fixed step if enough time has accumulated
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Get the interpolation alpha value for rendering
    /// Alpha is in range [0, 1) once all due steps have been consumed
    pub fn interpolation_alpha(&self) -> f32 {
        self.accumulator / self.fixed_timestep
    }

    /// Reset the accumulator to zero
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Get the current accumulated time
    pub fn accumulated_time(&self) -> f32 {
        self.accumulator
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    pub fn max_frame_delta(&self) -> f32 {
        self.max_frame_delta
    }
}
