//! Combatant snapshots.
//!
//! Every operation returns a new `Combatant`; the receiver is never
//! modified, so an older snapshot held elsewhere stays valid.

use serde::{Deserialize, Serialize};

use super::hand::Hand;
use crate::cards::{Card, CardId, Position};
use crate::core::{EngineError, Side};

/// One side of the duel: a hand plus a score.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{Card, CardId};
/// use rust_duel::combatant::Combatant;
/// use rust_duel::core::Side;
///
/// let player = Combatant::new(Side::Player, vec![Card::new(CardId::new(1), "A")]);
/// let committed = player.commit(CardId::new(1), None).unwrap();
///
/// assert_eq!(player.committed(), None);
/// assert_eq!(committed.committed(), Some(CardId::new(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    side: Side,
    hand: Hand,
    score: u32,
}

impl Combatant {
    /// Fresh combatant with a dealt hand and score 0.
    #[must_use]
    pub fn new(side: Side, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            side,
            hand: Hand::new(cards),
            score: 0,
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn committed(&self) -> Option<CardId> {
        self.hand.committed()
    }

    #[must_use]
    pub fn committed_card(&self) -> Option<&Card> {
        self.hand.committed_card()
    }

    #[must_use]
    pub fn has_committed(&self) -> bool {
        self.hand.committed().is_some()
    }

    /// Commit a card from hand as this round's play.
    ///
    /// Fails if the card is not held or another card is already committed.
    pub fn commit(&self, card: CardId, origin: Option<Position>) -> Result<Self, EngineError> {
        if let Some(committed) = self.hand.committed() {
            return Err(EngineError::AlreadyCommitted {
                side: self.side,
                committed,
            });
        }
        if !self.hand.contains(card) {
            return Err(EngineError::CardNotInHand {
                side: self.side,
                card,
            });
        }
        Ok(self.with_hand(self.hand.clone().with_commitment(card, origin)))
    }

    /// Withdraw the current commitment.
    pub fn clear_commit(&self) -> Result<Self, EngineError> {
        if !self.has_committed() {
            return Err(EngineError::NothingCommitted { side: self.side });
        }
        Ok(self.with_hand(self.hand.clone().without_commitment()))
    }

    /// Drop the commitment if any; never fails.
    #[must_use]
    pub fn release(&self) -> Self {
        self.with_hand(self.hand.clone().without_commitment())
    }

    /// Remove a card from hand permanently.
    pub fn remove_card(&self, card: CardId) -> Result<Self, EngineError> {
        if !self.hand.contains(card) {
            return Err(EngineError::CardNotInHand {
                side: self.side,
                card,
            });
        }
        Ok(self.with_hand(self.hand.clone().without_card(card)))
    }

    /// Consume the committed card (round resolved). No-op without a commitment.
    #[must_use]
    pub fn consume_committed(&self) -> Self {
        match self.committed() {
            Some(card) => self.with_hand(self.hand.clone().without_card(card)),
            None => self.clone(),
        }
    }

    /// Score one won round.
    #[must_use]
    pub fn win_round(&self) -> Self {
        Self {
            score: self.score + 1,
            ..self.clone()
        }
    }

    /// Commit/uncommit animation finished.
    #[must_use]
    pub fn settle(&self) -> Self {
        self.with_hand(self.hand.clone().settled())
    }

    fn with_hand(&self, hand: Hand) -> Self {
        Self {
            side: self.side,
            hand,
            score: self.score,
        }
    }
}
