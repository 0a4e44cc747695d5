//! Per-tick increment for the main progression.
//!
//! The increment approaches each stage boundary asymptotically: it scales
//! with the remaining distance inside the current stage but is floored at
//! `min_increment`, so it never reaches zero. After `slowdown_after` the
//! whole increment decays linearly to `min_speed_factor` over
//! `decay_span_secs`.

use super::stages::{self, BoundaryTieBreak};
use crate::backend::utils::config::PacingConfig;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncrementCalculator {
    pacing: PacingConfig,
    tie_break: BoundaryTieBreak,
}

impl IncrementCalculator {
    pub fn new(pacing: PacingConfig, tie_break: BoundaryTieBreak) -> Self {
        Self { pacing, tie_break }
    }

    pub fn speed_factor(&self, elapsed: Duration) -> f64 {
        let elapsed = elapsed.as_secs_f64();
        if elapsed <= self.pacing.slowdown_after_secs {
            return 1.0;
        }
        let decayed = 1.0 - (elapsed - self.pacing.slowdown_after_secs) / self.pacing.decay_span_secs;
        decayed.max(self.pacing.min_speed_factor)
    }

    pub fn base_increment(&self, percentage: f64) -> f64 {
        let index = stages::resolve(percentage, self.tie_break);
        let target = stages::stage(index).target();
        let range = target - stages::previous_target(index);
        let distance = target - percentage;
        (self.pacing.base_rate * distance / range).max(self.pacing.min_increment)
    }

    /// Increment to add on the next tick, given time spent in the current stage.
    pub fn increment(&self, percentage: f64, elapsed: Duration) -> f64 {
        self.base_increment(percentage) * self.speed_factor(elapsed)
    }
}
