//! Stage table and boundary resolution.

use serde::{Deserialize, Serialize};

/// A named milestone the progress bar moves towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub label: &'static str,
    pub target: u8,
}

impl Stage {
    pub fn target(&self) -> f64 {
        f64::from(self.target)
    }
}

/// Targets must be strictly increasing and the last one must be 100.
pub const STAGES: [Stage; 3] = [
    Stage {
        label: "Doing something at stage 1",
        target: 33,
    },
    Stage {
        label: "Stage 2 now",
        target: 66,
    },
    Stage {
        label: "3rd & final stage!!11eleven",
        target: 100,
    },
];

pub const LAST_STAGE: usize = STAGES.len() - 1;

/// Which stage owns a percentage exactly equal to a stage target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryTieBreak {
    /// A reached target belongs to the following stage (33 is stage 1).
    #[default]
    Advance,
    /// A reached target still belongs to its own stage (33 is stage 0).
    Inclusive,
}

/// Resolve the stage index for `percentage`. Always returns an index whose
/// target is `>= percentage`, clamped to the last stage at 100 and above.
pub fn resolve(percentage: f64, tie_break: BoundaryTieBreak) -> usize {
    STAGES
        .iter()
        .position(|stage| match tie_break {
            BoundaryTieBreak::Advance => percentage < stage.target(),
            BoundaryTieBreak::Inclusive => percentage <= stage.target(),
        })
        .unwrap_or(LAST_STAGE)
}

/// Target of the stage preceding `index`, or 0 for the first stage.
pub fn previous_target(index: usize) -> f64 {
    match index.min(LAST_STAGE) {
        0 => 0.0,
        i => STAGES[i - 1].target(),
    }
}

/// The smallest stage target strictly above `percentage`, if any.
pub fn next_boundary(percentage: f64) -> Option<f64> {
    STAGES
        .iter()
        .map(Stage::target)
        .find(|&target| target > percentage)
}

pub fn stage(index: usize) -> &'static Stage {
    &STAGES[index.min(LAST_STAGE)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_increasing_and_ends_at_100() {
        assert!(STAGES.windows(2).all(|w| w[0].target < w[1].target));
        assert_eq!(STAGES[LAST_STAGE].target, 100);
    }

    #[test]
    fn advance_moves_on_at_each_target() {
        let tb = BoundaryTieBreak::Advance;
        assert_eq!(resolve(0.0, tb), 0);
        assert_eq!(resolve(32.99, tb), 0);
        assert_eq!(resolve(33.0, tb), 1);
        assert_eq!(resolve(65.9, tb), 1);
        assert_eq!(resolve(66.0, tb), 2);
        assert_eq!(resolve(100.0, tb), 2);
    }

    #[test]
    fn inclusive_keeps_target_in_its_stage() {
        let tb = BoundaryTieBreak::Inclusive;
        assert_eq!(resolve(33.0, tb), 0);
        assert_eq!(resolve(33.01, tb), 1);
        assert_eq!(resolve(66.0, tb), 1);
        assert_eq!(resolve(66.5, tb), 2);
        assert_eq!(resolve(100.0, tb), 2);
    }

    #[test]
    fn out_of_range_percentages_clamp() {
        assert_eq!(resolve(150.0, BoundaryTieBreak::Advance), LAST_STAGE);
        assert_eq!(resolve(-1.0, BoundaryTieBreak::Inclusive), 0);
    }

    #[test]
    fn previous_targets() {
        assert_eq!(previous_target(0), 0.0);
        assert_eq!(previous_target(1), 33.0);
        assert_eq!(previous_target(2), 66.0);
        assert_eq!(previous_target(9), 66.0);
    }

    #[test]
    fn next_boundary_is_strictly_forward() {
        assert_eq!(next_boundary(0.0), Some(33.0));
        assert_eq!(next_boundary(20.0), Some(33.0));
        assert_eq!(next_boundary(33.0), Some(66.0));
        assert_eq!(next_boundary(99.9), Some(100.0));
        assert_eq!(next_boundary(100.0), None);
    }
}
