//! Face-up probability resolution.
//!
//! Both sides start at the base probability. A self-targeted card adds its
//! modifier to its owner. An opponent-targeted card (wire name `"enemy"`)
//! subtracts its modifier from the side `Target::affected` names, which is
//! always the enemy combatant: the player's opponent card weakens the enemy,
//! and the enemy's own opponent card is charged against the enemy as well.
//! Contributions from both cards are summed before each side is clamped to
//! `[0, 1]`.

use crate::cards::{Card, Target};
use crate::core::{Side, SideMap};

/// Base face-up probability used by `resolve_probabilities`.
pub const BASE_PROBABILITY: f64 = 0.5;

/// Resolve `(player_prob, enemy_prob)` from the two committed cards.
///
/// ```
/// use rust_duel::battle::resolve_probabilities;
/// use rust_duel::cards::{Card, CardId, Target};
///
/// let boost = Card::new(CardId::new(1), "Boost").with_modifier(0.3);
/// let jinx = Card::new(CardId::new(2), "Jinx")
///     .with_modifier(0.2)
///     .with_target(Target::Opponent);
///
/// let (player, enemy) = resolve_probabilities(&boost, &jinx);
/// assert!((player - 0.8).abs() < 1e-12);
/// assert!((enemy - 0.3).abs() < 1e-12);
/// ```
#[must_use]
pub fn resolve_probabilities(player_card: &Card, enemy_card: &Card) -> (f64, f64) {
    let probs = resolve_with_base(BASE_PROBABILITY, player_card, enemy_card);
    (probs[Side::Player], probs[Side::Enemy])
}

/// Resolve with an explicit base probability.
#[must_use]
pub fn resolve_with_base(base: f64, player_card: &Card, enemy_card: &Card) -> SideMap<f64> {
    let mut probs = SideMap::with_value(base);

    for (owner, card) in [(Side::Player, player_card), (Side::Enemy, enemy_card)] {
        let affected = card.target.affected(owner);
        match card.target {
            Target::Own => probs[affected] += card.modifier,
            Target::Opponent => probs[affected] -= card.modifier,
        }
    }

    probs.map(clamp_unit)
}

/// Clamp into `[0, 1]`. NaN is treated as 0.
fn clamp_unit(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
