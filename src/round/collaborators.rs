//! External collaborators of the round controller.
//!
//! ## Key Features
//!
//! - **Enemy moves**: `EnemyMoveProvider` returns a `CardRef` for the
//!   current round. The controller issues a `MoveRequest` ticket per round
//!   so that a host can deliver the answer asynchronously.
//! - **State sync**: `StateSyncSink` receives a `SyncReport` after every
//!   consumed round and at game end. It is best-effort.
//! - **Reference implementations**: random and weakest-card providers, a
//!   sink that discards everything and one that records into shared memory.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::combatant::Hand;
use crate::core::{CollaboratorError, EndStatus, GameRng, Side};

/// Card chosen by the enemy-move provider, matched by id or by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardRef {
    Id(CardId),
    Name(String),
}

impl CardRef {
    /// Find the referenced card among the uncommitted cards of `hand`.
    #[must_use]
    pub fn resolve<'a>(&self, hand: &'a Hand) -> Option<&'a Card> {
        match self {
            CardRef::Id(id) => hand.available().find(|c| c.id == *id),
            CardRef::Name(name) => hand.available().find(|c| c.name == *name),
        }
    }
}

impl From<CardId> for CardRef {
    fn from(id: CardId) -> Self {
        CardRef::Id(id)
    }
}

impl From<&str> for CardRef {
    fn from(name: &str) -> Self {
        CardRef::Name(name.to_string())
    }
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardRef::Id(id) => write!(f, "{id}"),
            CardRef::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// Ticket for one outstanding enemy-move decision.
///
/// Answers are only applied while the ticket's generation and round are
/// still current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub generation: u64,
    pub round: u32,
}

/// Chooses the enemy's card for a round.
pub trait EnemyMoveProvider {
    /// Pick a card from `hand` for `round`.
    fn choose(&mut self, round: u32, hand: &Hand) -> Result<CardRef, CollaboratorError>;
}

/// Persists resolved rounds remotely.
pub trait StateSyncSink {
    fn report(&mut self, report: &SyncReport) -> Result<(), CollaboratorError>;
}

/// State of a just-consumed round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub round: u32,
    pub player_cards: Vec<Card>,
    pub enemy_cards: Vec<Card>,
    pub player_score: u32,
    pub enemy_score: u32,
    pub player_card_used: CardId,
    pub enemy_card_used: CardId,
    /// `None` for a draw by repetition.
    pub winner: Option<Side>,
}

/// Final scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverReport {
    pub end_status: EndStatus,
    pub player_score: u32,
    pub enemy_score: u32,
    pub rounds: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncReport {
    Round(RoundReport),
    GameOver(GameOverReport),
}

/// Picks uniformly among the uncommitted cards.
#[derive(Clone, Debug)]
pub struct RandomMoveProvider {
    rng: GameRng,
}

impl RandomMoveProvider {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl EnemyMoveProvider for RandomMoveProvider {
    fn choose(&mut self, round: u32, hand: &Hand) -> Result<CardRef, CollaboratorError> {
        let cards: Vec<&Card> = hand.available().collect();
        self.rng
            .choose(&cards)
            .map(|card| CardRef::Id(card.id))
            .ok_or_else(|| CollaboratorError::Rejected(format!("empty hand in round {round}")))
    }
}

/// Picks the card with the smallest modifier, lowest id on ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeakestCardProvider;

impl EnemyMoveProvider for WeakestCardProvider {
    fn choose(&mut self, round: u32, hand: &Hand) -> Result<CardRef, CollaboratorError> {
        hand.available()
            .min_by(|a, b| a.modifier.total_cmp(&b.modifier).then(a.id.cmp(&b.id)))
            .map(|card| CardRef::Id(card.id))
            .ok_or_else(|| CollaboratorError::Rejected(format!("empty hand in round {round}")))
    }
}

/// Replays a fixed list of answers, one per call.
///
/// Once exhausted every call fails with a transport error.
#[derive(Clone, Debug, Default)]
pub struct ScriptedMoves {
    answers: VecDeque<Result<CardRef, CollaboratorError>>,
}

impl ScriptedMoves {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = Result<CardRef, CollaboratorError>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    /// Script that always succeeds with the given cards, in order.
    #[must_use]
    pub fn cards(cards: impl IntoIterator<Item = CardRef>) -> Self {
        Self::new(cards.into_iter().map(Ok))
    }
}

impl EnemyMoveProvider for ScriptedMoves {
    fn choose(&mut self, round: u32, _hand: &Hand) -> Result<CardRef, CollaboratorError> {
        self.answers.pop_front().unwrap_or_else(|| {
            Err(CollaboratorError::Transport(format!(
                "no scripted move for round {round}"
            )))
        })
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl StateSyncSink for NullSink {
    fn report(&mut self, _report: &SyncReport) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Records reports into a buffer shared between clones.
///
/// A failing sink still records, then returns a transport error.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    reports: Rc<RefCell<Vec<SyncReport>>>,
    failing: bool,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn reports(&self) -> Vec<SyncReport> {
        self.reports.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }
}

impl StateSyncSink for RecordingSink {
    fn report(&mut self, report: &SyncReport) -> Result<(), CollaboratorError> {
        self.reports.borrow_mut().push(report.clone());
        if self.failing {
            return Err(CollaboratorError::Transport("sync unavailable".to_string()));
        }
        Ok(())
    }
}
