//! A decorative "Mining insights" card: a fake progress value eased through
//! three staged milestones, with restart and skip controls.

pub mod backend;
pub mod frontend;
pub mod headless;
pub mod utils;

pub use backend::progress::{
    Animator, BoundaryTieBreak, Phase, PhaseKind, ProgressController, ProgressSnapshot,
    ProgressState, STAGES,
};
pub use backend::utils::config::{AppConfig, ConfigManager};
pub use utils::{Error, Result};
