//! Ownership of the single active animation driver.

use std::time::Duration;

/// Identifies one armed driver. Callbacks carrying an older token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    InitialRamp,
    MainProgress,
    Skipping,
}

/// Request to schedule the first callback of a freshly armed driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arm {
    pub token: DriverToken,
    pub kind: DriverKind,
    pub delay: Duration,
}

/// Outcome of delivering a timer callback to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Same driver, call again after the delay.
    Continue(Duration),
    /// The driver finished its phase and a successor was armed.
    Handoff(Arm),
    /// Progress is complete; nothing is armed any more.
    Finished,
    /// The token was not the active one; nothing changed.
    Stale,
}

/// Holds at most one armed driver. Arming always invalidates the previous
/// token.
#[derive(Debug, Default)]
pub struct DriverSlot {
    generation: u64,
    active: Option<DriverToken>,
}

impl DriverSlot {
    pub fn arm(&mut self) -> DriverToken {
        self.generation += 1;
        let token = DriverToken(self.generation);
        self.active = Some(token);
        token
    }

    pub fn release(&mut self) {
        self.active = None;
    }

    pub fn is_current(&self, token: DriverToken) -> bool {
        self.active == Some(token)
    }
}
