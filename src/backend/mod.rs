//! Backend of the application.

pub mod progress;
pub mod utils;
