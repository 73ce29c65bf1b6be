//! Round and game lifecycle.
//!
//! This module provides:
//! - `apply_resolution`: pure scoring, card consumption and end-of-game logic
//! - `GameController`: commitments, timers, enemy-move tickets and sync
//! - Collaborator traits with reference implementations

pub mod collaborators;
pub mod controller;
pub mod resolution;

pub use collaborators::{
    CardRef, EnemyMoveProvider, GameOverReport, MoveRequest, NullSink, RandomMoveProvider,
    RecordingSink, RoundReport, ScriptedMoves, StateSyncSink, SyncReport, WeakestCardProvider,
};
pub use controller::{ControllerPhase, GameController};
pub use resolution::{apply_resolution, final_status, RoundTransition};
