//! Hosts a `ProgressController` on the tokio runtime.
//!
//! The animator owns exactly one timer task. User actions abort that task
//! before arming a new one; phase handoffs (ramp to main, skip to main)
//! continue inside the running task under the new token. Every mutation is
//! published on a `watch` channel for the view.

use super::controller::{ProgressController, ProgressSnapshot};
use super::driver::{Arm, Tick};
use crate::backend::utils::config::AppConfig;
use crate::utils::Result;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub struct Animator {
    controller: Arc<Mutex<ProgressController>>,
    updates: Arc<watch::Sender<ProgressSnapshot>>,
    task: Option<JoinHandle<()>>,
    runtime: Option<Handle>,
}

impl Animator {
    pub fn new(config: &AppConfig) -> (Self, watch::Receiver<ProgressSnapshot>) {
        let controller = ProgressController::new(config);
        let (tx, rx) = watch::channel(controller.snapshot());
        let animator = Self {
            controller: Arc::new(Mutex::new(controller)),
            updates: Arc::new(tx),
            task: None,
            runtime: None,
        };
        (animator, rx)
    }

    /// Spawn timer tasks on `runtime` instead of the ambient one.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> Result<ProgressSnapshot> {
        Ok(self.controller.lock()?.snapshot())
    }

    /// Start from zero. Without an explicit runtime this must be called from
    /// within a tokio runtime.
    pub fn mount(&mut self) -> Result<()> {
        self.cancel();
        let arm = {
            let mut controller = self.controller.lock()?;
            let arm = controller.start(now());
            self.updates.send_replace(controller.snapshot());
            arm
        };
        self.spawn(arm);
        Ok(())
    }

    pub fn restart(&mut self) -> Result<()> {
        self.cancel();
        let arm = {
            let mut controller = self.controller.lock()?;
            let arm = controller.restart(now());
            self.updates.send_replace(controller.snapshot());
            arm
        };
        self.spawn(arm);
        Ok(())
    }

    /// Ease to the next stage boundary. Returns `false` when nothing was
    /// skipped (idle or already complete); the running driver is left alone
    /// in that case.
    pub fn skip(&mut self) -> Result<bool> {
        let mut controller = self.controller.lock()?;
        let Some(arm) = controller.skip(now()) else {
            return Ok(false);
        };
        self.updates.send_replace(controller.snapshot());
        drop(controller);

        self.cancel();
        self.spawn(arm);
        Ok(true)
    }

    /// Cancel any pending timer. State stays as it was.
    pub fn unmount(&mut self) {
        self.cancel();
        if let Ok(mut controller) = self.controller.lock() {
            controller.dispose();
            self.updates.send_replace(controller.snapshot());
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn spawn(&mut self, arm: Arm) {
        let controller = Arc::clone(&self.controller);
        let updates = Arc::clone(&self.updates);
        let task = drive(controller, updates, arm);
        self.task = Some(match &self.runtime {
            Some(runtime) => runtime.spawn(task),
            None => tokio::spawn(task),
        });
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn now() -> std::time::Instant {
    Instant::now().into_std()
}

async fn drive(
    controller: Arc<Mutex<ProgressController>>,
    updates: Arc<watch::Sender<ProgressSnapshot>>,
    arm: Arm,
) {
    let mut token = arm.token;
    let mut delay = arm.delay;
    log::debug!("Driver {:?} armed ({:?})", arm.kind, token);

    loop {
        tokio::time::sleep(delay).await;

        // Publish under the lock so a concurrent restart or skip always
        // sends after this frame, never before it.
        let tick = {
            let Ok(mut controller) = controller.lock() else {
                log::error!("Progress controller lock poisoned, stopping driver");
                return;
            };
            let tick = controller.on_timer(token, now());
            if tick != Tick::Stale {
                updates.send_replace(controller.snapshot());
            }
            tick
        };

        match tick {
            Tick::Continue(next) => delay = next,
            Tick::Handoff(next) => {
                log::debug!("Driver handoff to {:?} ({:?})", next.kind, next.token);
                token = next.token;
                delay = next.delay;
            }
            Tick::Finished => return,
            Tick::Stale => {
                log::debug!("Driver {token:?} is stale, stopping");
                return;
            }
        }
    }
}
