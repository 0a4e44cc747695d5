//! Bridges the progress animator to Dioxus signals.

use crate::backend::progress::{Animator, ProgressSnapshot};
use crate::backend::utils::config::AppConfig;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::runtime::Handle;

/// User actions on a mounted animator.
#[derive(Clone)]
pub struct ProgressActions {
    animator: Rc<RefCell<Animator>>,
}

impl ProgressActions {
    pub fn restart(&self) {
        if let Err(e) = self.animator.borrow_mut().restart() {
            log::error!("Failed to restart progress: {e}");
        }
    }

    pub fn skip(&self) {
        match self.animator.borrow_mut().skip() {
            Ok(true) => {}
            Ok(false) => log::debug!("Nothing to skip to"),
            Err(e) => log::error!("Failed to skip stage: {e}"),
        }
    }
}

/// Start the animation when the component mounts, mirror every snapshot into
/// a signal and cancel the timer when the component is dropped. Timers run
/// on the `Handle` provided as context, or the ambient tokio runtime.
pub fn use_progress_animator(config: AppConfig) -> (Signal<ProgressSnapshot>, ProgressActions) {
    let runtime = try_use_context::<Handle>();
    let (animator, receiver) = use_hook(move || {
        let (mut animator, receiver) = Animator::new(&config);
        if let Some(runtime) = runtime {
            animator = animator.with_runtime(runtime);
        }
        (Rc::new(RefCell::new(animator)), receiver)
    });

    let mut snapshot = use_signal(|| receiver.borrow().clone());

    use_hook({
        let animator = animator.clone();
        move || {
            if let Err(e) = animator.borrow_mut().mount() {
                log::error!("Failed to start progress animation: {e}");
            }
        }
    });

    use_future(move || {
        let mut receiver = receiver.clone();
        async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    use_drop({
        let animator = animator.clone();
        move || animator.borrow_mut().unmount()
    });

    (snapshot, ProgressActions { animator })
}
