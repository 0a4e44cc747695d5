//! Frontend services bridging backend state into components.

pub mod progress;
