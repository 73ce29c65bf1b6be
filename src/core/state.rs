//! Game state snapshots.
//!
//! `GameState` is the single top-level container a host renders from.
//! It is replaced wholesale on every transition; nested values are never
//! patched in place. Cloning is cheap because hands are persistent maps.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::side::Side;
use crate::cards::{Card, CardId};
use crate::combatant::Combatant;

/// Which screen the host should present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    Menu,
    /// Card selection; waiting for commitments.
    Selection,
    /// A battle is in flight or awaiting acknowledgement.
    Battle,
    End,
}

/// Game outcome from the player's perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndStatus {
    #[default]
    Pending,
    Win,
    Lose,
    Draw,
}

impl EndStatus {
    /// Compare final scores.
    #[must_use]
    pub fn from_scores(player: u32, enemy: u32) -> Self {
        match player.cmp(&enemy) {
            std::cmp::Ordering::Greater => EndStatus::Win,
            std::cmp::Ordering::Less => EndStatus::Lose,
            std::cmp::Ordering::Equal => EndStatus::Draw,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub scene: Scene,
    pub player: Combatant,
    pub enemy: Combatant,
    /// Starts at 1; advances after each consumed round that does not end the game.
    pub round: u32,
    pub consecutive_draws: u32,
    pub end_status: EndStatus,
}

impl GameState {
    /// New game in the selection scene, round 1, scores 0.
    ///
    /// Fails if a card id repeats within one side or is dealt to both sides.
    pub fn new(player_cards: Vec<Card>, enemy_cards: Vec<Card>) -> Result<Self, EngineError> {
        for cards in [&player_cards, &enemy_cards] {
            if let Some(card) = first_repeated(cards) {
                return Err(EngineError::DuplicateCard { card });
            }
        }
        if let Some(card) = player_cards
            .iter()
            .find(|p| enemy_cards.iter().any(|e| e.id == p.id))
        {
            return Err(EngineError::OverlappingHands { card: card.id });
        }

        Ok(Self {
            scene: Scene::Selection,
            player: Combatant::new(Side::Player, player_cards),
            enemy: Combatant::new(Side::Enemy, enemy_cards),
            round: 1,
            consecutive_draws: 0,
            end_status: EndStatus::Pending,
        })
    }

    /// Menu scene with empty hands, before any game has been dealt.
    #[must_use]
    pub fn menu() -> Self {
        Self {
            scene: Scene::Menu,
            player: Combatant::new(Side::Player, Vec::new()),
            enemy: Combatant::new(Side::Enemy, Vec::new()),
            round: 1,
            consecutive_draws: 0,
            end_status: EndStatus::Pending,
        }
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Replace one side's snapshot.
    #[must_use]
    pub fn with_combatant(&self, combatant: Combatant) -> Self {
        let mut next = self.clone();
        match combatant.side() {
            Side::Player => next.player = combatant,
            Side::Enemy => next.enemy = combatant,
        }
        next
    }

    #[must_use]
    pub fn with_scene(&self, scene: Scene) -> Self {
        Self {
            scene,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn both_committed(&self) -> bool {
        self.player.has_committed() && self.enemy.has_committed()
    }

    #[must_use]
    pub fn hands_empty(&self) -> bool {
        self.player.hand().is_empty() && self.enemy.hand().is_empty()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.end_status != EndStatus::Pending
    }

    /// First card id held by both sides, if any.
    #[must_use]
    pub fn shared_card(&self) -> Option<CardId> {
        self.player
            .hand()
            .ids()
            .into_iter()
            .find(|&id| self.enemy.hand().contains(id))
    }
}

fn first_repeated(cards: &[Card]) -> Option<CardId> {
    let mut seen = rustc_hash::FxHashSet::default();
    cards.iter().map(|c| c.id).find(|id| !seen.insert(*id))
}
