//! Easing curves used by the ramp and skip animations.

use serde::{Deserialize, Serialize};

/// Maps normalized time `t` in `[0, 1]` to normalized progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    InOutQuad,
    InOutCubic,
}

impl Easing {
    /// Evaluate the curve. Input is clamped, so callers may pass raw
    /// `elapsed / duration` ratios.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => ease_in_out_quad(t),
            Self::InOutCubic => ease_in_out_cubic(t),
        }
    }
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
