//! Battle state machine for a single round.
//!
//! ```text
//! Setup → Charging → Colliding → Battling → Resolved
//! ```
//!
//! - `Setup → Charging` happens the instant both sides have committed and
//!   computes the two face-up probabilities.
//! - `Charging → Colliding → Battling` are timed and purely presentational.
//! - `Battling → Resolved` draws one value per side and classifies the round.
//!
//! The machine never leaves `Setup` without both commitments. Randomness is
//! drawn exactly once per battle; only `reset` makes the machine reusable.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::outcome::{classify_flips, BattleOutcome};
use super::probability::resolve_with_base;
use crate::cards::CardId;
use crate::core::{FlipSource, GameState, PhaseTimings, Side, SideMap};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattlePhase {
    #[default]
    Setup,
    Charging,
    Colliding,
    Battling,
    Resolved,
}

impl BattlePhase {
    /// Phase entered when this phase's timer elapses.
    #[must_use]
    pub fn next(self) -> Option<BattlePhase> {
        match self {
            BattlePhase::Charging => Some(BattlePhase::Colliding),
            BattlePhase::Colliding => Some(BattlePhase::Battling),
            BattlePhase::Battling => Some(BattlePhase::Resolved),
            BattlePhase::Setup | BattlePhase::Resolved => None,
        }
    }

    /// How long this phase lasts, if it is timed.
    #[must_use]
    pub fn duration(self, timings: &PhaseTimings) -> Option<Duration> {
        match self {
            BattlePhase::Charging => Some(timings.charging),
            BattlePhase::Colliding => Some(timings.colliding),
            BattlePhase::Battling => Some(timings.battling),
            BattlePhase::Setup | BattlePhase::Resolved => None,
        }
    }

    /// Between Setup and Resolved.
    #[must_use]
    pub fn in_flight(self) -> bool {
        self.next().is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleMachine {
    phase: BattlePhase,
    cards: Option<SideMap<CardId>>,
    probabilities: Option<SideMap<f64>>,
    outcome: Option<BattleOutcome>,
}

impl BattleMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Cards locked in at `Setup → Charging`.
    #[must_use]
    pub fn cards(&self) -> Option<SideMap<CardId>> {
        self.cards
    }

    /// Probabilities computed at `Setup → Charging`.
    #[must_use]
    pub fn probabilities(&self) -> Option<SideMap<f64>> {
        self.probabilities
    }

    /// Set once the machine is `Resolved`.
    #[must_use]
    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// `Setup → Charging` if both sides have committed.
    ///
    /// Returns whether the transition happened.
    pub fn try_begin(&mut self, state: &GameState, base_probability: f64) -> bool {
        if self.phase != BattlePhase::Setup {
            return false;
        }
        let (Some(player_card), Some(enemy_card)) =
            (state.player.committed_card(), state.enemy.committed_card())
        else {
            return false;
        };

        self.cards = Some(SideMap::new(player_card.id, enemy_card.id));
        self.probabilities = Some(resolve_with_base(base_probability, player_card, enemy_card));
        self.phase = BattlePhase::Charging;
        log::debug!(
            "battle charging: {} vs {} at {:?}",
            player_card.id,
            enemy_card.id,
            self.probabilities
        );
        true
    }

    /// Take the next timed step.
    ///
    /// `Battling → Resolved` draws two values from `flips` (player, then
    /// enemy) and classifies the round against `consecutive_draws`.
    /// Returns the phase entered, or `None` from `Setup`/`Resolved`.
    pub fn advance(
        &mut self,
        flips: &mut dyn FlipSource,
        consecutive_draws: u32,
        max_consecutive_draws: u32,
    ) -> Option<BattlePhase> {
        let next = self.phase.next()?;

        if next == BattlePhase::Resolved {
            let (Some(probabilities), Some(cards)) = (self.probabilities, self.cards) else {
                return None;
            };
            let rolls = SideMap::new(flips.next_unit(), flips.next_unit());
            let face_up = SideMap::from_fn(|side: Side| probabilities[side] > rolls[side]);
            let (result, consecutive_draws) = classify_flips(
                face_up[Side::Player],
                face_up[Side::Enemy],
                consecutive_draws,
                max_consecutive_draws,
            );

            self.outcome = Some(BattleOutcome {
                result,
                winner: result.winner(),
                face_up,
                probabilities,
                rolls,
                consecutive_draws,
                cards,
            });
        }

        self.phase = next;
        log::debug!("battle phase -> {:?}", next);
        Some(next)
    }

    /// Back to a fresh `Setup`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
