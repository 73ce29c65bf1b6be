//! A combatant's hand and its current commitment.
//!
//! Cards are stored in a persistent `im::OrdMap` keyed by id, so cloning a
//! hand into a new snapshot is O(1) and iteration order is stable.
//! A committed card stays a member of the hand until the round that used
//! it resolves; `available()` hides it from selection in the meantime.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId, Position};

/// Ids of a hand, inline for typical hand sizes.
pub type HandIds = SmallVec<[CardId; 8]>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: OrdMap<CardId, Card>,
    committed: Option<CardId>,
    origin: Option<Position>,
    in_transition: bool,
}

impl Hand {
    /// Create a hand from cards. Later duplicates of an id replace earlier ones.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id, c)).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Find a card by display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.cards.values().find(|c| c.name == name)
    }

    /// All cards in ascending id order, committed card included.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Cards still selectable (everything except the committed card).
    pub fn available(&self) -> impl Iterator<Item = &Card> {
        let committed = self.committed;
        self.cards.values().filter(move |c| Some(c.id) != committed)
    }

    /// All ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> HandIds {
        self.cards.keys().copied().collect()
    }

    #[must_use]
    pub fn committed(&self) -> Option<CardId> {
        self.committed
    }

    #[must_use]
    pub fn committed_card(&self) -> Option<&Card> {
        self.committed.and_then(|id| self.cards.get(&id))
    }

    #[must_use]
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    #[must_use]
    pub fn in_transition(&self) -> bool {
        self.in_transition
    }

    // === Snapshot builders ===
    //
    // Callers validate; these only construct the next value.

    pub(crate) fn with_commitment(mut self, id: CardId, origin: Option<Position>) -> Self {
        self.committed = Some(id);
        self.origin = origin;
        self.in_transition = true;
        self
    }

    pub(crate) fn without_commitment(mut self) -> Self {
        self.committed = None;
        self.origin = None;
        self.in_transition = false;
        self
    }

    pub(crate) fn without_card(mut self, id: CardId) -> Self {
        self.cards.remove(&id);
        if self.committed == Some(id) {
            self = self.without_commitment();
        }
        self
    }

    pub(crate) fn settled(mut self) -> Self {
        self.in_transition = false;
        self
    }
}
