//! # rust-duel
//!
//! A battle resolution engine for a two-sided card duel.
//!
//! Each round the player and an AI-controlled enemy commit one card. The
//! committed cards' modifiers perturb a face-up probability for each side,
//! one random draw per side decides the round, and the controller scores,
//! consumes cards and advances until both hands are empty.
//!
//! ## Design Principles
//!
//! 1. **Immutable Snapshots**: Every combatant operation returns a new value.
//!    `GameState` is replaced wholesale, never patched in place.
//!
//! 2. **Injectable Randomness**: Battles draw from a `FlipSource`, seeded
//!    ChaCha8 in play and scripted sequences in tests.
//!
//! 3. **Explicit Timing**: Timed phases go through a `Scheduler`, so a host
//!    event loop, a virtual clock or a zero-delay queue can drive them.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, errors, game state
//! - `cards`: Card definitions and the card catalog
//! - `combatant`: Hands and combatant snapshots
//! - `battle`: Probability resolver, battle state machine, scheduling
//! - `round`: Resolution rules, controller, external collaborators

pub mod core;
pub mod cards;
pub mod combatant;
pub mod battle;
pub mod round;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    EngineConfig, PhaseTimings,
    EngineError, CollaboratorError,
    FlipSource, GameRng, GameRngState, FixedFlips,
    GameState, Scene, EndStatus,
};

pub use crate::cards::{Card, CardId, CardCatalog, CardRecord, Position, Target};

pub use crate::combatant::{Combatant, Hand};

pub use crate::battle::{
    resolve_probabilities,
    BattleMachine, BattlePhase, BattleOutcome, RoundResult,
    Scheduler, ManualScheduler, ImmediateScheduler, PhaseTimer,
};

pub use crate::round::{
    apply_resolution, RoundTransition,
    GameController, ControllerPhase,
    CardRef, MoveRequest, EnemyMoveProvider, StateSyncSink, SyncReport,
};
