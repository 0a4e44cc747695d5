//! Staged fake-progress animation: stage table, pacing, easing and the
//! controller that drives them.

pub mod animator;
pub mod controller;
pub mod driver;
pub mod easing;
pub mod increment;
pub mod stages;

pub use animator::Animator;
pub use controller::{Phase, PhaseKind, ProgressController, ProgressSnapshot, ProgressState};
pub use driver::{Arm, DriverKind, DriverToken, Tick};
pub use stages::{BoundaryTieBreak, STAGES, Stage};
