//! Battle resolution: probabilities, the per-round state machine, and
//! phase scheduling.
//!
//! ## Key Types
//!
//! - `resolve_probabilities`: pure card → probability mapping
//! - `BattleMachine`: `Setup → Charging → Colliding → Battling → Resolved`
//! - `BattleOutcome` / `RoundResult`: terminal data of a battle
//! - `Scheduler`: timer abstraction driving the timed phases

pub mod machine;
pub mod outcome;
pub mod probability;
pub mod schedule;

pub use machine::{BattleMachine, BattlePhase};
pub use outcome::{classify_flips, BattleOutcome, RoundResult};
pub use probability::{resolve_probabilities, resolve_with_base, BASE_PROBABILITY};
pub use schedule::{ImmediateScheduler, ManualScheduler, PhaseTimer, Scheduler};
