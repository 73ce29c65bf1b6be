//! Applying a resolved battle to the game state.
//!
//! - Regular draw: nothing changes except the draw counter; both
//!   commitments stay in place and the round is replayed.
//! - Decisive result or draw by repetition: the winner (if any) scores,
//!   both committed cards are consumed, and either the next round starts
//!   or, when both hands are empty, the game ends.

use serde::{Deserialize, Serialize};

use crate::battle::BattleOutcome;
use crate::core::{EndStatus, GameState, Scene, Side};

/// Where the controller goes after applying a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundTransition {
    /// Same cards, same round; back to awaiting commitments with both
    /// commitments intact.
    Replaying,
    /// Cards consumed; next round with commitments cleared.
    AdvancingRound,
    /// Both hands are empty.
    GameOver(EndStatus),
}

/// Apply a battle outcome, producing the next snapshot.
///
/// `state` is left untouched.
#[must_use]
pub fn apply_resolution(state: &GameState, outcome: &BattleOutcome) -> (GameState, RoundTransition) {
    let mut next = GameState {
        consecutive_draws: outcome.consecutive_draws,
        ..state.clone()
    };

    if outcome.result.is_replay() {
        return (next, RoundTransition::Replaying);
    }

    match outcome.winner {
        Some(Side::Player) => next.player = next.player.win_round(),
        Some(Side::Enemy) => next.enemy = next.enemy.win_round(),
        None => {}
    }
    next.player = next.player.consume_committed();
    next.enemy = next.enemy.consume_committed();

    if next.hands_empty() {
        let status = final_status(&next);
        next.end_status = status;
        next.scene = Scene::End;
        return (next, RoundTransition::GameOver(status));
    }

    next.round += 1;
    next.scene = Scene::Selection;
    (next, RoundTransition::AdvancingRound)
}

/// Game result from the current scores.
#[must_use]
pub fn final_status(state: &GameState) -> EndStatus {
    EndStatus::from_scores(state.player.score(), state.enemy.score())
}
