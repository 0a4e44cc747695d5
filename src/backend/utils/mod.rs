pub mod config;
pub mod css;
