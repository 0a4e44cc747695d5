//! Frontend of the application.

pub mod app;
pub mod components;
pub mod services;

pub use app::App;
