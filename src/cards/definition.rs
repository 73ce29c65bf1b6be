//! Card definitions - immutable card data.
//!
//! A `Card` is constructed once and never mutated. Identity is by `id`;
//! `name` and `image` are presentation data the rules never read.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Unique identifier for a card within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Which side a card's modifier applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Adds the modifier to the owner's face-up probability.
    #[default]
    #[serde(rename = "self")]
    Own,
    /// Subtracts the modifier from the enemy combatant's face-up probability.
    #[serde(rename = "enemy", alias = "opponent")]
    Opponent,
}

impl Target {
    /// Side whose probability a card played by `owner` adjusts.
    ///
    /// `Own` adjusts the owner. `Opponent` mirrors the wire name `"enemy"`
    /// and always adjusts the enemy combatant.
    #[must_use]
    pub const fn affected(self, owner: Side) -> Side {
        match self {
            Target::Own => owner,
            Target::Opponent => Side::Enemy,
        }
    }
}

/// Screen-space position, carried only for animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Immutable playable card.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{Card, CardId, Target};
///
/// let shield = Card::new(CardId::new(1), "Shield")
///     .with_modifier(0.2)
///     .with_target(Target::Own);
///
/// assert_eq!(shield.modifier, 0.2);
/// assert!(!shield.is_neutral());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identity within a game.
    pub id: CardId,

    /// Display label.
    pub name: String,

    /// Opaque asset reference (empty when unmapped).
    #[serde(default)]
    pub image: String,

    /// Signed probability adjustment, nominally within [-0.5, 0.5].
    #[serde(default)]
    pub modifier: f64,

    /// Side the modifier applies to.
    #[serde(default)]
    pub target: Target,
}

impl Card {
    /// Create a neutral self-targeted card.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: String::new(),
            modifier: 0.0,
            target: Target::Own,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: f64) -> Self {
        self.modifier = modifier;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// A zero modifier has no effect regardless of target.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.modifier == 0.0
    }
}
