//! Combatant model: hands, commitments, and scores.
//!
//! ## Key Types
//!
//! - `Hand`: cards held by one side plus the committed card
//! - `Combatant`: immutable snapshot of one side (hand + score)

#[allow(clippy::module_inception)]
pub mod combatant;
pub mod hand;

pub use combatant::Combatant;
pub use hand::{Hand, HandIds};
