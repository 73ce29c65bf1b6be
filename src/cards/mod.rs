//! Card system: definitions and catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Stable identity of a card within a game
//! - `Target`: Whether a modifier applies to its owner or the opponent
//! - `Card`: Immutable card data
//! - `CardRecord`: Raw wire record
//! - `CardCatalog`: Deserialization, image lookup, dealing

pub mod catalog;
pub mod definition;

pub use catalog::{CardCatalog, CardRecord};
pub use definition::{Card, CardId, Position, Target};
