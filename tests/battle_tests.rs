//! Battle resolution tests.
//!
//! These tests exercise the probability resolver and the battle state
//! machine through the public API, with scripted flips standing in for
//! the random source.

use proptest::prelude::*;

use rust_duel::battle::{
    classify_flips, resolve_probabilities, BattleMachine, BattlePhase, RoundResult,
};
use rust_duel::cards::{Card, CardId, Target};
use rust_duel::core::{FixedFlips, GameRng, GameState, Side, SideMap};

fn card(id: u32, modifier: f64, target: Target) -> Card {
    Card::new(CardId::new(id), format!("Card {id}"))
        .with_modifier(modifier)
        .with_target(target)
}

fn committed(player: Card, enemy: Card) -> GameState {
    let (p, e) = (player.id, enemy.id);
    let state = GameState::new(vec![player], vec![enemy]).unwrap();
    let state = state.with_combatant(state.player.commit(p, None).unwrap());
    state.with_combatant(state.enemy.commit(e, None).unwrap())
}

fn resolve(machine: &mut BattleMachine, flips: &mut FixedFlips, draws: u32) {
    while machine.advance(flips, draws, 5).is_some() {}
}

fn target_strategy() -> impl Strategy<Value = Target> {
    prop_oneof![Just(Target::Own), Just(Target::Opponent)]
}

/// Neutral cards on both sides leave the base probability untouched.
#[test]
fn test_neutral_cards_keep_base() {
    let (p, e) = resolve_probabilities(&card(1, 0.0, Target::Own), &card(2, 0.0, Target::Own));
    assert_eq!(p, 0.5);
    assert_eq!(e, 0.5);
}

/// Self boost against an opponent-targeted card.
#[test]
fn test_literal_attribution_case() {
    let (p, e) = resolve_probabilities(
        &card(1, 0.3, Target::Own),
        &card(2, 0.2, Target::Opponent),
    );
    assert!((p - 0.8).abs() < 1e-12);
    assert!((e - 0.3).abs() < 1e-12);
}

/// Modifiers far outside the nominal range clamp at the boundary.
#[test]
fn test_out_of_range_modifiers_clamp() {
    let (p, e) = resolve_probabilities(
        &card(1, 7.5, Target::Own),
        &card(2, -9.0, Target::Own),
    );
    assert_eq!(p, 1.0);
    assert_eq!(e, 0.0);
}

proptest! {
    #[test]
    fn prop_probabilities_stay_in_unit_interval(
        player_mod in -1.0e6f64..1.0e6,
        enemy_mod in -1.0e6f64..1.0e6,
        player_target in target_strategy(),
        enemy_target in target_strategy(),
    ) {
        let (p, e) = resolve_probabilities(
            &card(1, player_mod, player_target),
            &card(2, enemy_mod, enemy_target),
        );
        prop_assert!((0.0..=1.0).contains(&p));
        prop_assert!((0.0..=1.0).contains(&e));
    }

    #[test]
    fn prop_nominal_modifiers_stay_in_unit_interval(
        player_mod in -0.5f64..=0.5,
        enemy_mod in -0.5f64..=0.5,
        player_target in target_strategy(),
        enemy_target in target_strategy(),
    ) {
        let (p, e) = resolve_probabilities(
            &card(1, player_mod, player_target),
            &card(2, enemy_mod, enemy_target),
        );
        prop_assert!((0.0..=1.0).contains(&p));
        prop_assert!((0.0..=1.0).contains(&e));
    }

    #[test]
    fn prop_draw_counter_never_reaches_cap(
        flips in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..60),
        cap in 1u32..8,
    ) {
        let mut count = 0;
        for (player_up, enemy_up) in flips {
            let (result, next) = classify_flips(player_up, enemy_up, count, cap);
            prop_assert!(next < cap);
            if result.winner().is_some() || result == RoundResult::DrawByRepetition {
                prop_assert_eq!(next, 0);
            }
            count = next;
        }
    }
}

/// The machine does not move without both commitments.
#[test]
fn test_machine_waits_in_setup() {
    let state = GameState::new(
        vec![card(1, 0.0, Target::Own)],
        vec![card(2, 0.0, Target::Own)],
    )
    .unwrap();
    let mut machine = BattleMachine::new();

    assert!(!machine.try_begin(&state, 0.5));
    assert!(machine.advance(&mut FixedFlips::all_up(), 0, 5).is_none());
    assert_eq!(machine.phase(), BattlePhase::Setup);
}

/// Randomness is consumed only on the Battling → Resolved step.
#[test]
fn test_flips_drawn_once_at_resolution() {
    let mut machine = BattleMachine::new();
    let mut flips = FixedFlips::new(vec![0.2, 0.7]);
    assert!(machine.try_begin(
        &committed(card(1, 0.0, Target::Own), card(2, 0.0, Target::Own)),
        0.5
    ));

    let mut phases = Vec::new();
    while let Some(phase) = machine.advance(&mut flips, 0, 5) {
        phases.push(phase);
        if phase != BattlePhase::Resolved {
            assert_eq!(flips.drawn(), 0);
        }
    }

    assert_eq!(
        phases,
        vec![BattlePhase::Colliding, BattlePhase::Battling, BattlePhase::Resolved]
    );
    assert_eq!(flips.drawn(), 2);

    let outcome = machine.outcome().unwrap();
    assert_eq!(outcome.rolls, SideMap::new(0.2, 0.7));
    assert_eq!(outcome.result, RoundResult::PlayerWins);
    assert_eq!(outcome.cards[Side::Enemy], CardId::new(2));
}

/// Five consecutive draws in any mix end in a draw by repetition.
#[test]
fn test_five_mixed_draws_is_repetition() {
    let state = committed(card(1, 0.0, Target::Own), card(2, 0.0, Target::Own));
    let scripts = [
        FixedFlips::all_up(),
        FixedFlips::all_down(),
        FixedFlips::all_up(),
        FixedFlips::all_down(),
        FixedFlips::all_up(),
    ];

    let mut draws = 0;
    let mut results = Vec::new();
    for mut flips in scripts {
        let mut machine = BattleMachine::new();
        machine.try_begin(&state, 0.5);
        resolve(&mut machine, &mut flips, draws);
        let outcome = machine.outcome().unwrap();
        results.push(outcome.result);
        draws = outcome.consecutive_draws;
    }

    assert_eq!(
        results,
        vec![
            RoundResult::DrawBothUp,
            RoundResult::DrawBothDown,
            RoundResult::DrawBothUp,
            RoundResult::DrawBothDown,
            RoundResult::DrawByRepetition,
        ]
    );
    assert_eq!(draws, 0);
}

/// Opponent-targeted cards can pin a side face-down.
#[test]
fn test_zero_probability_never_face_up() {
    let state = committed(card(1, 0.0, Target::Own), card(2, 0.5, Target::Opponent));
    let mut machine = BattleMachine::new();
    machine.try_begin(&state, 0.5);
    resolve(&mut machine, &mut FixedFlips::all_up(), 0);

    let outcome = machine.outcome().unwrap();
    assert_eq!(outcome.probabilities[Side::Enemy], 0.0);
    assert!(!outcome.face_up[Side::Enemy]);
    assert_eq!(outcome.result, RoundResult::PlayerWins);
}

/// Seeded battles are reproducible.
#[test]
fn test_seeded_battles_reproducible() {
    let state = committed(card(1, 0.1, Target::Own), card(2, 0.1, Target::Opponent));
    let run = |seed: u64| {
        let mut rng = GameRng::new(seed).for_context("battle");
        let mut machine = BattleMachine::new();
        machine.try_begin(&state, 0.5);
        while machine.advance(&mut rng, 0, 5).is_some() {}
        machine.outcome().cloned()
    };

    assert_eq!(run(11), run(11));
}

/// Outcomes serialize for display layers.
#[test]
fn test_outcome_serializes() {
    let mut machine = BattleMachine::new();
    machine.try_begin(
        &committed(card(1, 0.0, Target::Own), card(2, 0.0, Target::Own)),
        0.5,
    );
    resolve(&mut machine, &mut FixedFlips::new(vec![0.9, 0.1]), 0);

    let json = serde_json::to_value(machine.outcome().unwrap()).unwrap();
    assert_eq!(json["result"], "enemy_wins");
    assert_eq!(json["winner"], "enemy");
}
