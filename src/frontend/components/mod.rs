//! UI components. `mining_card` composes the common pieces with the
//! progress animator.

pub mod common;
pub mod mining_card;

pub use mining_card::MiningCard;
