//! Round and game controller.
//!
//! Orchestrates one game: commitments from both sides, the timed battle,
//! applying the result, and the external enemy-move and sync
//! collaborators.
//!
//! ```text
//! Idle ──start──▶ AwaitingCommitments ──both committed──▶ Resolving
//!                        ▲                                   │
//!                        ├──────── Replaying ◀───────────────┤ continue_round
//!                        └──────── AdvancingRound ◀──────────┤
//!                                  GameOver ◀────────────────┘
//! ```
//!
//! ## Key Features
//!
//! - **Snapshots**: the `GameState` is replaced wholesale on every change.
//!   A rejected operation leaves it exactly as it was.
//! - **Tickets**: each round issues a `MoveRequest`; the enemy's answer is
//!   applied only while that ticket is still current.
//! - **Generations**: `reset_to_menu` and `start_game` bump the generation.
//!   Timers and tickets from an older generation are discarded on delivery.
//! - **Best-effort sync**: sink failures are logged and never block.

use serde::{Deserialize, Serialize};

use super::collaborators::{
    CardRef, EnemyMoveProvider, GameOverReport, MoveRequest, NullSink, RandomMoveProvider,
    RoundReport, StateSyncSink, SyncReport,
};
use super::resolution::{apply_resolution, RoundTransition};
use crate::battle::{
    BattleMachine, BattleOutcome, BattlePhase, ImmediateScheduler, ManualScheduler, PhaseTimer,
    Scheduler,
};
use crate::cards::{Card, CardCatalog, CardId, Position};
use crate::core::{
    EngineConfig, EngineError, FlipSource, GameRng, GameState, PhaseTimings, Scene, Side,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerPhase {
    /// No game in progress.
    Idle,
    AwaitingCommitments,
    /// Battle in flight or resolved and awaiting `continue_round`.
    Resolving,
    GameOver,
}

/// Drives a game against an external enemy-move provider.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{Card, CardId};
/// use rust_duel::core::{EngineConfig, FixedFlips};
/// use rust_duel::round::{GameController, RoundTransition};
///
/// let mut game = GameController::headless(EngineConfig::default())
///     .with_flips(FixedFlips::new(vec![0.0, 0.99]));
/// game.start_game(
///     vec![Card::new(CardId::new(1), "Mine")],
///     vec![Card::new(CardId::new(2), "Theirs")],
/// )
/// .unwrap();
///
/// let transition = game.play_round(CardId::new(1)).unwrap();
/// assert!(matches!(transition, RoundTransition::GameOver(_)));
/// assert_eq!(game.state().player.score(), 1);
/// ```
pub struct GameController<S: Scheduler> {
    config: EngineConfig,
    catalog: CardCatalog,
    moves: Box<dyn EnemyMoveProvider>,
    sink: Box<dyn StateSyncSink>,
    scheduler: S,
    flips: Box<dyn FlipSource>,
    deal_rng: GameRng,

    state: GameState,
    /// State at the start of the current game, used by `reset_to_menu`.
    opening: Option<GameState>,
    battle: BattleMachine,
    phase: ControllerPhase,
    generation: u64,
    pending_move: Option<MoveRequest>,
    last_outcome: Option<BattleOutcome>,
}

impl<S: Scheduler> GameController<S> {
    /// Create a controller sitting at the menu.
    ///
    /// Battle flips and dealing draw from independent streams of
    /// `config.seed`.
    pub fn new(
        config: EngineConfig,
        catalog: CardCatalog,
        moves: impl EnemyMoveProvider + 'static,
        sink: impl StateSyncSink + 'static,
        scheduler: S,
    ) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            catalog,
            moves: Box::new(moves),
            sink: Box::new(sink),
            scheduler,
            flips: Box::new(rng.for_context("battle")),
            deal_rng: rng.for_context("deal"),
            state: GameState::menu(),
            opening: None,
            battle: BattleMachine::new(),
            phase: ControllerPhase::Idle,
            generation: 0,
            pending_move: None,
            last_outcome: None,
        }
    }

    /// Replace the battle random source.
    #[must_use]
    pub fn with_flips(mut self, flips: impl FlipSource + 'static) -> Self {
        self.flips = Box::new(flips);
        self
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    #[must_use]
    pub fn battle(&self) -> &BattleMachine {
        &self.battle
    }

    /// Outcome of the most recently resolved battle in this game.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&BattleOutcome> {
        self.last_outcome.as_ref()
    }

    /// Outstanding enemy-move ticket.
    #[must_use]
    pub fn pending_move(&self) -> Option<MoveRequest> {
        self.pending_move
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ------------------------------------------------------------------
    // Game lifecycle
    // ------------------------------------------------------------------

    /// Start a game with the given hands and issue the round-1 ticket.
    ///
    /// Anything in flight from a previous game is cancelled.
    pub fn start_game(
        &mut self,
        player_cards: Vec<Card>,
        enemy_cards: Vec<Card>,
    ) -> Result<MoveRequest, EngineError> {
        let state = GameState::new(player_cards, enemy_cards)?;
        let (player, enemy) = (state.player.hand().len(), state.enemy.hand().len());
        if player == 0 || player != enemy {
            return Err(EngineError::UnevenHands { player, enemy });
        }

        self.cancel_in_flight();
        self.opening = Some(state.clone());
        self.state = state;
        self.phase = ControllerPhase::AwaitingCommitments;
        log::info!(
            "game started with {} cards per side (generation {})",
            self.state.player.hand().len(),
            self.generation
        );
        Ok(self.request_move())
    }

    /// Deal two disjoint hands from the catalog and start a game.
    pub fn start_dealt_game(&mut self) -> Result<MoveRequest, EngineError> {
        let (player, enemy) = self.catalog.deal(&mut self.deal_rng, self.config.hand_size)?;
        self.start_game(player, enemy)
    }

    /// Start again with the hands dealt for the last game.
    pub fn restart(&mut self) -> Result<MoveRequest, EngineError> {
        let Some(opening) = &self.opening else {
            return Err(EngineError::NotInGame {
                scene: self.state.scene,
            });
        };
        let player = opening.player.hand().cards().cloned().collect();
        let enemy = opening.enemy.hand().cards().cloned().collect();
        self.start_game(player, enemy)
    }

    /// Abandon the current game and return to the menu.
    ///
    /// Pending timers are cleared and the enemy-move ticket is revoked.
    /// Hands are restored from the last deal.
    pub fn reset_to_menu(&mut self) {
        self.cancel_in_flight();
        self.state = self
            .opening
            .as_ref()
            .map_or_else(GameState::menu, |opening| opening.with_scene(Scene::Menu));
        self.phase = ControllerPhase::Idle;
        log::info!("reset to menu (generation {})", self.generation);
    }

    // ------------------------------------------------------------------
    // Player selection
    // ------------------------------------------------------------------

    /// Commit `card` for the player.
    ///
    /// Starts the battle if the enemy has already committed.
    pub fn select_card(&mut self, card: CardId, origin: Option<Position>) -> Result<(), EngineError> {
        let committed = self
            .ensure_selecting()
            .and_then(|()| self.state.player.commit(card, origin));

        match committed {
            Ok(player) => {
                self.state = self.state.with_combatant(player);
                self.try_start_battle();
                Ok(())
            }
            Err(err) => {
                log::debug!("selection of {card} rejected: {err}");
                Err(err)
            }
        }
    }

    /// Withdraw the player's commitment before the battle starts.
    pub fn deselect_card(&mut self) -> Result<CardId, EngineError> {
        let cleared = self.ensure_selecting().and_then(|()| {
            let card = self.state.player.committed().ok_or(EngineError::NothingCommitted {
                side: Side::Player,
            })?;
            Ok((card, self.state.player.clear_commit()?))
        });

        match cleared {
            Ok((card, player)) => {
                self.state = self.state.with_combatant(player);
                Ok(card)
            }
            Err(err) => {
                log::debug!("deselection rejected: {err}");
                Err(err)
            }
        }
    }

    /// Deselect `card` if it is the current commitment, otherwise select it.
    pub fn toggle_card(&mut self, card: CardId, origin: Option<Position>) -> Result<(), EngineError> {
        if self.state.player.committed() == Some(card) {
            self.deselect_card().map(|_| ())
        } else {
            self.select_card(card, origin)
        }
    }

    /// Mark a commit/uncommit animation as finished.
    pub fn settle(&mut self, side: Side) {
        let settled = self.state.combatant(side).settle();
        self.state = self.state.with_combatant(settled);
    }

    // ------------------------------------------------------------------
    // Enemy moves
    // ------------------------------------------------------------------

    /// Ask the move provider for the pending ticket and apply its answer.
    ///
    /// On failure the ticket stays pending and the call can be retried.
    pub fn fetch_enemy_move(&mut self) -> Result<CardId, EngineError> {
        let request = self.pending_move.ok_or(EngineError::NoPendingMove)?;
        match self.moves.choose(request.round, self.state.enemy.hand()) {
            Ok(card) => self.deliver_enemy_move(request, card),
            Err(err) => {
                log::warn!("enemy move for round {} failed: {err}", request.round);
                Err(err.into())
            }
        }
    }

    /// Apply an enemy-move answer delivered by the host.
    ///
    /// Answers for a revoked or already answered ticket are discarded with
    /// `StaleTicket`. A card that is not in the enemy hand leaves the
    /// ticket pending and returns `UnresolvableMove`.
    pub fn deliver_enemy_move(
        &mut self,
        request: MoveRequest,
        card: CardRef,
    ) -> Result<CardId, EngineError> {
        if self.pending_move != Some(request) {
            log::debug!(
                "discarding enemy move {card} for round {} (generation {})",
                request.round,
                request.generation
            );
            return Err(EngineError::StaleTicket {
                round: request.round,
                generation: request.generation,
            });
        }

        let Some(id) = card.resolve(self.state.enemy.hand()).map(|c| c.id) else {
            log::warn!("enemy move {card} for round {} is not in hand", request.round);
            return Err(EngineError::UnresolvableMove {
                round: request.round,
                card: card.to_string(),
            });
        };

        let enemy = self.state.enemy.commit(id, None)?;
        self.state = self.state.with_combatant(enemy);
        self.pending_move = None;
        self.try_start_battle();
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Battle progression
    // ------------------------------------------------------------------

    /// Fire every due timer.
    ///
    /// Timers from an older generation or round, or armed for a phase the
    /// battle has already left, are dropped. Returns the number of phase
    /// transitions taken.
    pub fn pump(&mut self) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due() {
            if timer.generation != self.generation
                || timer.round != self.state.round
                || timer.from != self.battle.phase()
            {
                log::debug!("dropping stale timer {timer:?}");
                continue;
            }

            let Some(entered) = self.battle.advance(
                self.flips.as_mut(),
                self.state.consecutive_draws,
                self.config.draw_cap(),
            ) else {
                continue;
            };
            fired += 1;

            if entered == BattlePhase::Resolved {
                if let Some(outcome) = self.battle.outcome() {
                    log::info!(
                        "round {} resolved: {:?} (rolls {:.3}/{:.3})",
                        self.state.round,
                        outcome.result,
                        outcome.rolls[Side::Player],
                        outcome.rolls[Side::Enemy]
                    );
                    self.last_outcome = Some(outcome.clone());
                }
            } else {
                self.arm_timer();
            }
        }
        fired
    }

    /// Acknowledge the resolved battle and move on.
    ///
    /// Fails with `BattleNotResolved` unless the battle machine is
    /// `Resolved`, so a repeated call cannot score or consume twice.
    pub fn continue_round(&mut self) -> Result<RoundTransition, EngineError> {
        let outcome = match (self.battle.phase(), self.battle.outcome()) {
            (BattlePhase::Resolved, Some(outcome)) => outcome.clone(),
            (phase, _) => return Err(EngineError::BattleNotResolved { phase }),
        };

        let round = self.state.round;
        let (next, transition) = apply_resolution(&self.state, &outcome);
        self.state = next;
        self.battle.reset();

        match transition {
            RoundTransition::Replaying => {
                log::debug!(
                    "round {round} replays ({} consecutive draws)",
                    self.state.consecutive_draws
                );
                self.phase = ControllerPhase::AwaitingCommitments;
                self.try_start_battle();
            }
            RoundTransition::AdvancingRound => {
                log::info!("round {round} consumed, round {} begins", self.state.round);
                self.phase = ControllerPhase::AwaitingCommitments;
                self.report_round(round, &outcome);
                self.request_move();
            }
            RoundTransition::GameOver(status) => {
                log::info!(
                    "game over: {status:?} ({} - {})",
                    self.state.player.score(),
                    self.state.enemy.score()
                );
                self.phase = ControllerPhase::GameOver;
                self.pending_move = None;
                self.report_round(round, &outcome);
                self.sync(&SyncReport::GameOver(GameOverReport {
                    end_status: status,
                    player_score: self.state.player.score(),
                    enemy_score: self.state.enemy.score(),
                    rounds: round,
                }));
            }
        }
        Ok(transition)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_selecting(&self) -> Result<(), EngineError> {
        match self.phase {
            ControllerPhase::AwaitingCommitments => Ok(()),
            ControllerPhase::Resolving => Err(EngineError::CommitmentLocked),
            ControllerPhase::GameOver => Err(EngineError::GameOver),
            ControllerPhase::Idle => Err(EngineError::NotInGame {
                scene: self.state.scene,
            }),
        }
    }

    fn cancel_in_flight(&mut self) {
        self.generation += 1;
        self.scheduler.clear();
        self.pending_move = None;
        self.battle.reset();
        self.last_outcome = None;
    }

    fn request_move(&mut self) -> MoveRequest {
        let request = MoveRequest {
            generation: self.generation,
            round: self.state.round,
        };
        self.pending_move = Some(request);
        request
    }

    fn try_start_battle(&mut self) {
        if self.phase != ControllerPhase::AwaitingCommitments {
            return;
        }
        if !self.battle.try_begin(&self.state, self.config.base_probability) {
            return;
        }
        self.phase = ControllerPhase::Resolving;
        self.state = self.state.with_scene(Scene::Battle);
        log::debug!(
            "round {} battle started, resolves in {:?}",
            self.state.round,
            self.config.timings.total()
        );
        self.arm_timer();
    }

    fn arm_timer(&mut self) {
        let from = self.battle.phase();
        if let Some(delay) = from.duration(&self.config.timings) {
            self.scheduler.schedule(
                delay,
                PhaseTimer {
                    generation: self.generation,
                    round: self.state.round,
                    from,
                },
            );
        }
    }

    fn report_round(&mut self, round: u32, outcome: &BattleOutcome) {
        let report = SyncReport::Round(RoundReport {
            round,
            player_cards: self.state.player.hand().cards().cloned().collect(),
            enemy_cards: self.state.enemy.hand().cards().cloned().collect(),
            player_score: self.state.player.score(),
            enemy_score: self.state.enemy.score(),
            player_card_used: outcome.cards[Side::Player],
            enemy_card_used: outcome.cards[Side::Enemy],
            winner: outcome.winner,
        });
        self.sync(&report);
    }

    fn sync(&mut self, report: &SyncReport) {
        if !self.config.sync_enabled {
            return;
        }
        if let Err(err) = self.sink.report(report) {
            log::warn!("state sync failed: {err}");
        }
    }
}

impl GameController<ManualScheduler> {
    /// Jump the clock to the next pending timer and fire it.
    ///
    /// Returns the number of phase transitions taken, 0 when nothing is
    /// pending.
    pub fn advance_to_next_timer(&mut self) -> usize {
        let Some(wait) = self.scheduler.next_due_in() else {
            return 0;
        };
        self.scheduler.advance(wait);
        self.pump()
    }
}

impl GameController<ImmediateScheduler> {
    /// Controller with zero-delay timers, the standard catalog, a seeded
    /// random enemy and no sync.
    ///
    /// The configured phase timings are replaced with
    /// `PhaseTimings::instant()`.
    #[must_use]
    pub fn headless(config: EngineConfig) -> Self {
        let enemy = RandomMoveProvider::new(GameRng::new(config.seed).for_context("enemy"));
        Self::new(
            config.with_timings(PhaseTimings::instant()),
            CardCatalog::standard(),
            enemy,
            NullSink,
            ImmediateScheduler::new(),
        )
    }

    /// Commit `card`, obtain the enemy move if needed, and run battles
    /// until the round is consumed.
    ///
    /// If `card` is already committed, for example after a failed enemy
    /// move, the commitment is kept and the round carries on from there.
    pub fn play_round(&mut self, card: CardId) -> Result<RoundTransition, EngineError> {
        if self.state.player.committed() != Some(card) {
            self.select_card(card, None)?;
        }
        if self.pending_move.is_some() {
            self.fetch_enemy_move()?;
        }
        loop {
            self.pump();
            match self.continue_round()? {
                RoundTransition::Replaying => continue,
                transition => return Ok(transition),
            }
        }
    }
}
