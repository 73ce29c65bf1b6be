//! Core engine types: sides, RNG, configuration, errors, game state.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;
pub mod state;

pub use config::{EngineConfig, PhaseTimings};
pub use error::{CollaboratorError, EngineError};
pub use rng::{FixedFlips, FlipSource, GameRng, GameRngState};
pub use side::{Side, SideMap};
pub use state::{EndStatus, GameState, Scene};
