//! The progress state machine.
//!
//! `ProgressController` is clock-agnostic: every operation takes the current
//! `Instant`, and scheduling is expressed as `Arm`/`Tick` values that a host
//! (see `Animator`) turns into real timers. Only the driver holding the
//! current `DriverToken` may mutate the percentage.

use super::driver::{Arm, DriverKind, DriverSlot, DriverToken, Tick};
use super::easing::Easing;
use super::increment::IncrementCalculator;
use super::stages::{self, LAST_STAGE};
use crate::backend::utils::config::{AppConfig, BehaviorConfig, RampMode, SkipTarget, TimingConfig};
use std::time::{Duration, Instant};

pub const COMPLETE: f64 = 100.0;
pub const COMPLETION_LABEL: &str = "Success!";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    pub percentage: f64,
    pub stage_index: usize,
    pub complete: bool,
    pub in_initial_phase: bool,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            percentage: 0.0,
            stage_index: 0,
            complete: false,
            in_initial_phase: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    InitialRamp { steps: u32 },
    MainProgress,
    Skipping { from: f64, target: f64 },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    InitialRamp,
    MainProgress,
    Skipping,
    Complete,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Idle => PhaseKind::Idle,
            Self::InitialRamp { .. } => PhaseKind::InitialRamp,
            Self::MainProgress => PhaseKind::MainProgress,
            Self::Skipping { .. } => PhaseKind::Skipping,
            Self::Complete => PhaseKind::Complete,
        }
    }
}

/// What the view needs to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub percentage: f64,
    pub stage_index: usize,
    pub label: &'static str,
    pub complete: bool,
    pub in_initial_phase: bool,
    pub phase: PhaseKind,
}

impl ProgressSnapshot {
    pub fn can_skip(&self) -> bool {
        !self.complete && self.phase != PhaseKind::Idle
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            percentage: 0.0,
            stage_index: 0,
            label: stages::stage(0).label,
            complete: false,
            in_initial_phase: true,
            phase: PhaseKind::Idle,
        }
    }
}

pub struct ProgressController {
    timing: TimingConfig,
    behavior: BehaviorConfig,
    increments: IncrementCalculator,
    state: ProgressState,
    phase: Phase,
    stage_started: Instant,
    animation_started: Instant,
    driver: DriverSlot,
}

impl ProgressController {
    pub fn new(config: &AppConfig) -> Self {
        let now = Instant::now();
        Self {
            timing: config.timing,
            behavior: config.behavior,
            increments: IncrementCalculator::new(config.pacing, config.behavior.tie_break),
            state: ProgressState::default(),
            phase: Phase::Idle,
            stage_started: now,
            animation_started: now,
            driver: DriverSlot::default(),
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn label(&self) -> &'static str {
        if self.state.complete {
            COMPLETION_LABEL
        } else {
            stages::stage(self.state.stage_index).label
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            percentage: self.state.percentage,
            stage_index: self.state.stage_index,
            label: self.label(),
            complete: self.state.complete,
            in_initial_phase: self.state.in_initial_phase,
            phase: self.phase.kind(),
        }
    }

    /// Reset everything and begin the initial ramp.
    pub fn start(&mut self, now: Instant) -> Arm {
        self.driver.release();
        self.state = ProgressState::default();
        self.stage_started = now;
        self.animation_started = now;
        self.phase = Phase::InitialRamp { steps: 0 };
        log::debug!(
            "Initial ramp to {}% over {:?} ({:?})",
            self.timing.ramp_target,
            self.timing.ramp_duration(),
            self.behavior.ramp_mode
        );
        self.arm(DriverKind::InitialRamp)
    }

    pub fn restart(&mut self, now: Instant) -> Arm {
        log::info!(
            "Restarting progress from {:.2}% ({:?})",
            self.state.percentage,
            self.phase.kind()
        );
        self.start(now)
    }

    /// Interrupt the active driver and ease to the next stage boundary.
    /// Returns `None` when there is nothing to skip to.
    pub fn skip(&mut self, now: Instant) -> Option<Arm> {
        if matches!(self.phase, Phase::Idle | Phase::Complete) {
            log::debug!("Ignoring skip while {:?}", self.phase.kind());
            return None;
        }
        let from = self.state.percentage;
        let target = self.skip_target()?;
        self.state.in_initial_phase = false;
        self.animation_started = now;
        self.phase = Phase::Skipping { from, target };
        log::info!("Skipping from {from:.2}% to {target}%");
        Some(self.arm(DriverKind::Skipping))
    }

    /// Deliver a timer callback. Stale tokens are ignored.
    pub fn on_timer(&mut self, token: DriverToken, now: Instant) -> Tick {
        if !self.driver.is_current(token) {
            return Tick::Stale;
        }
        match self.phase {
            Phase::InitialRamp { steps } => self.step_ramp(steps, now),
            Phase::MainProgress => self.step_main(now),
            Phase::Skipping { from, target } => self.step_skip(from, target, now),
            Phase::Idle | Phase::Complete => {
                self.driver.release();
                Tick::Stale
            }
        }
    }

    /// Cancel the active driver. A finished run stays complete; anything
    /// else returns to idle.
    pub fn dispose(&mut self) {
        self.driver.release();
        if self.phase != Phase::Complete {
            self.phase = Phase::Idle;
        }
    }

    fn arm(&mut self, kind: DriverKind) -> Arm {
        Arm {
            token: self.driver.arm(),
            kind,
            delay: self.cadence(kind),
        }
    }

    fn cadence(&self, kind: DriverKind) -> Duration {
        match (kind, self.behavior.ramp_mode) {
            (DriverKind::InitialRamp, RampMode::FixedStep) | (DriverKind::MainProgress, _) => {
                self.timing.tick_interval()
            }
            (DriverKind::InitialRamp, RampMode::Eased) | (DriverKind::Skipping, _) => {
                self.timing.frame_interval()
            }
        }
    }

    fn skip_target(&self) -> Option<f64> {
        let current = self.state.percentage;
        match self.behavior.skip_target {
            SkipTarget::NearestForward => stages::next_boundary(current),
            SkipTarget::OneStage => {
                let target = stages::stage(self.state.stage_index).target();
                if target > current {
                    Some(target)
                } else {
                    stages::next_boundary(current)
                }
            }
        }
    }

    fn ramp_steps(&self) -> u32 {
        let steps = self
            .timing
            .ramp_duration_ms
            .div_ceil(self.timing.tick_interval_ms.max(1));
        u32::try_from(steps).unwrap_or(u32::MAX).max(1)
    }

    fn step_ramp(&mut self, steps: u32, now: Instant) -> Tick {
        let target = self.timing.ramp_target;
        let (value, done, delay) = match self.behavior.ramp_mode {
            RampMode::Eased => {
                let elapsed = now.saturating_duration_since(self.animation_started);
                let duration = self.timing.ramp_duration();
                let t = ratio(elapsed, duration);
                (
                    Easing::InOutCubic.apply(t) * target,
                    t >= 1.0,
                    self.frame_delay(elapsed, duration),
                )
            }
            RampMode::FixedStep => {
                let steps = steps + 1;
                let total = self.ramp_steps();
                self.phase = Phase::InitialRamp { steps };
                (
                    target * f64::from(steps) / f64::from(total),
                    steps >= total,
                    self.timing.tick_interval(),
                )
            }
        };

        if done {
            self.state.percentage = target;
            self.state.in_initial_phase = false;
            log::debug!("Initial ramp finished at {target}%");
            return Tick::Handoff(self.enter_main(now));
        }
        self.state.percentage = value.min(target).max(self.state.percentage);
        Tick::Continue(delay)
    }

    fn step_main(&mut self, now: Instant) -> Tick {
        let current = self.state.percentage;
        let elapsed = now.saturating_duration_since(self.stage_started);
        let next = current + self.increments.increment(current, elapsed);
        if next >= COMPLETE {
            return self.finish();
        }
        self.state.percentage = next;
        self.sync_stage(now);
        Tick::Continue(self.timing.tick_interval())
    }

    fn step_skip(&mut self, from: f64, target: f64, now: Instant) -> Tick {
        let elapsed = now.saturating_duration_since(self.animation_started);
        let duration = self.timing.skip_duration();
        let t = ratio(elapsed, duration);
        if t < 1.0 {
            let eased = from + (target - from) * self.behavior.skip_easing.apply(t);
            self.state.percentage = eased.min(target).max(self.state.percentage);
            self.sync_stage(now);
            return Tick::Continue(self.frame_delay(elapsed, duration));
        }

        self.state.percentage = target;
        if target >= COMPLETE {
            return self.finish();
        }
        self.sync_stage(now);
        Tick::Handoff(self.enter_main(now))
    }

    /// Next frame, shortened so the last one lands on `duration` exactly.
    fn frame_delay(&self, elapsed: Duration, duration: Duration) -> Duration {
        self.timing
            .frame_interval()
            .min(duration.saturating_sub(elapsed))
    }

    fn enter_main(&mut self, now: Instant) -> Arm {
        self.phase = Phase::MainProgress;
        self.stage_started = now;
        self.animation_started = now;
        self.state.stage_index =
            stages::resolve(self.state.percentage, self.behavior.tie_break);
        log::debug!(
            "Main progression from {:.2}% in stage {}",
            self.state.percentage,
            self.state.stage_index
        );
        self.arm(DriverKind::MainProgress)
    }

    fn sync_stage(&mut self, now: Instant) {
        let index = stages::resolve(self.state.percentage, self.behavior.tie_break);
        if index != self.state.stage_index {
            self.state.stage_index = index;
            self.stage_started = now;
            log::info!("Entered stage {}: {}", index + 1, stages::stage(index).label);
        }
    }

    fn finish(&mut self) -> Tick {
        self.state = ProgressState {
            percentage: COMPLETE,
            stage_index: LAST_STAGE,
            complete: true,
            in_initial_phase: false,
        };
        self.phase = Phase::Complete;
        self.driver.release();
        log::info!("Progress complete");
        Tick::Finished
    }
}

fn ratio(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    elapsed.as_secs_f64() / duration.as_secs_f64()
}
