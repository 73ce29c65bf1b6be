//! Round classification.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Side, SideMap};

/// Classification of one resolved battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    PlayerWins,
    EnemyWins,
    DrawBothUp,
    DrawBothDown,
    /// Forced draw after too many consecutive ambiguous draws.
    DrawByRepetition,
}

impl RoundResult {
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            RoundResult::PlayerWins => Some(Side::Player),
            RoundResult::EnemyWins => Some(Side::Enemy),
            _ => None,
        }
    }

    /// Draws that replay the round with the same cards.
    #[must_use]
    pub fn is_replay(self) -> bool {
        matches!(self, RoundResult::DrawBothUp | RoundResult::DrawBothDown)
    }
}

/// Classify a pair of flips.
///
/// Returns the result and the consecutive-draw counter after this round.
/// A decisive result or a draw by repetition resets the counter to 0.
///
/// ```
/// use rust_duel::battle::{classify_flips, RoundResult};
///
/// assert_eq!(classify_flips(true, false, 3, 5), (RoundResult::PlayerWins, 0));
/// assert_eq!(classify_flips(true, true, 3, 5), (RoundResult::DrawBothUp, 4));
/// assert_eq!(classify_flips(false, false, 4, 5), (RoundResult::DrawByRepetition, 0));
/// ```
#[must_use]
pub fn classify_flips(
    player_up: bool,
    enemy_up: bool,
    consecutive_draws: u32,
    max_consecutive_draws: u32,
) -> (RoundResult, u32) {
    match (player_up, enemy_up) {
        (true, false) => (RoundResult::PlayerWins, 0),
        (false, true) => (RoundResult::EnemyWins, 0),
        (both_up, _) => {
            let count = consecutive_draws.saturating_add(1);
            if count >= max_consecutive_draws.max(1) {
                (RoundResult::DrawByRepetition, 0)
            } else if both_up {
                (RoundResult::DrawBothUp, count)
            } else {
                (RoundResult::DrawBothDown, count)
            }
        }
    }
}

/// Terminal data of a resolved battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub result: RoundResult,
    pub winner: Option<Side>,
    /// Face-up flags, kept for display.
    pub face_up: SideMap<bool>,
    /// Probabilities the flips were drawn against.
    pub probabilities: SideMap<f64>,
    /// The random draws themselves.
    pub rolls: SideMap<f64>,
    /// Counter after this round.
    pub consecutive_draws: u32,
    /// Cards committed for the battle.
    pub cards: SideMap<CardId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decisive_results_reset_counter() {
        assert_eq!(classify_flips(true, false, 4, 5), (RoundResult::PlayerWins, 0));
        assert_eq!(classify_flips(false, true, 2, 5), (RoundResult::EnemyWins, 0));
    }

    #[test]
    fn test_draws_count_up() {
        assert_eq!(classify_flips(true, true, 0, 5), (RoundResult::DrawBothUp, 1));
        assert_eq!(classify_flips(false, false, 1, 5), (RoundResult::DrawBothDown, 2));
    }

    #[test]
    fn test_fifth_draw_is_repetition() {
        let mut count = 0;
        let mut results = Vec::new();
        for i in 0..5 {
            let both_up = i % 2 == 0;
            let (result, next) = classify_flips(both_up, both_up, count, 5);
            results.push(result);
            count = next;
        }

        assert_eq!(results[3], RoundResult::DrawBothDown);
        assert_eq!(results[4], RoundResult::DrawByRepetition);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cap_of_one() {
        assert_eq!(classify_flips(true, true, 0, 1), (RoundResult::DrawByRepetition, 0));
        assert_eq!(classify_flips(true, true, 0, 0), (RoundResult::DrawByRepetition, 0));
    }

    #[test]
    fn test_result_helpers() {
        assert_eq!(RoundResult::PlayerWins.winner(), Some(Side::Player));
        assert_eq!(RoundResult::DrawByRepetition.winner(), None);
        assert!(RoundResult::DrawBothDown.is_replay());
        assert!(!RoundResult::DrawByRepetition.is_replay());
    }

    #[test]
    fn test_result_wire_names() {
        let json = serde_json::to_string(&RoundResult::DrawByRepetition).unwrap();
        assert_eq!(json, "\"draw_by_repetition\"");
    }
}
