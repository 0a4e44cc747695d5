//! Common reusable components.

pub mod button;
pub mod progress_gradient;

pub use button::Button;
pub use progress_gradient::ProgressGradient;
