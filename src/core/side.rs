//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! A duel always has exactly two sides: the human `Player` and the
//! AI-controlled `Enemy`.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexable by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One side of the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The human-controlled side.
    Player,
    /// The AI-controlled side.
    Enemy,
}

impl Side {
    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Enemy];

    /// The other side.
    ///
    /// ```
    /// use rust_duel::core::Side;
    ///
    /// assert_eq!(Side::Player.opponent(), Side::Enemy);
    /// assert_eq!(Side::Enemy.opponent(), Side::Player);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Slot index (player = 0, enemy = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use rust_duel::core::{Side, SideMap};
///
/// let mut probs = SideMap::with_value(0.5);
/// probs[Side::Enemy] = 0.3;
///
/// assert_eq!(probs[Side::Player], 0.5);
/// assert_eq!(probs[Side::Enemy], 0.3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create from explicit player and enemy values.
    pub fn new(player: T, enemy: T) -> Self {
        Self {
            data: [player, enemy],
        }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(Side) -> T) -> Self {
        Self::new(factory(Side::Player), factory(Side::Enemy))
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Map both entries.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> SideMap<U> {
        let [player, enemy] = self.data;
        SideMap::new(f(player), f(enemy))
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
