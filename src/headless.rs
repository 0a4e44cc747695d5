//! Terminal rendition of the card, for running without a window.

use crate::backend::progress::{Animator, ProgressSnapshot};
use crate::backend::utils::config::AppConfig;
use crate::frontend::components::common::progress_gradient::bar_offset;
use crate::utils::Result;
use std::io::Write;

const BAR_WIDTH: usize = 30;

/// One status line: label, text bar and percentage.
pub fn render_line(snapshot: &ProgressSnapshot) -> String {
    let filled = ((100.0 - bar_offset(snapshot.percentage)) / 100.0 * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{:<28} [{}{}] {:>6.2}%",
        snapshot.label,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        snapshot.percentage
    )
}

/// Run the animation to completion, writing a line to `out` whenever the
/// stage changes or the whole-number percentage moves.
pub async fn run<W: Write>(config: &AppConfig, out: &mut W) -> Result<ProgressSnapshot> {
    let (mut animator, mut updates) = Animator::new(config);
    animator.mount()?;

    let mut last_printed: Option<(usize, u32)> = None;
    loop {
        let snapshot = updates.borrow_and_update().clone();
        let key = (snapshot.stage_index, snapshot.percentage.floor() as u32);
        if last_printed != Some(key) || snapshot.complete {
            writeln!(out, "{}", render_line(&snapshot))?;
            last_printed = Some(key);
        }
        if snapshot.complete {
            return Ok(snapshot);
        }
        if updates.changed().await.is_err() {
            return Ok(snapshot);
        }
    }
}
