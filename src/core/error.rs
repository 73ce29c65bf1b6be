//! Engine error taxonomy.
//!
//! Every failure is locally recoverable: an operation that returns an
//! error leaves the current game snapshot untouched.

use thiserror::Error;

use super::side::Side;
use super::state::Scene;
use crate::battle::BattlePhase;
use crate::cards::CardId;

/// Failure reported by an external collaborator (move provider, sync sink).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    #[error("{side} does not hold {card}")]
    CardNotInHand { side: Side, card: CardId },

    #[error("{side} already committed {committed}")]
    AlreadyCommitted { side: Side, committed: CardId },

    #[error("{side} has nothing committed")]
    NothingCommitted { side: Side },

    #[error("commitments are locked while a battle is in flight")]
    CommitmentLocked,

    #[error("enemy move {card} for round {round} is not in the enemy hand")]
    UnresolvableMove { round: u32, card: String },

    #[error("no enemy move is pending")]
    NoPendingMove,

    #[error("stale ticket for round {round} (generation {generation})")]
    StaleTicket { round: u32, generation: u64 },

    #[error("battle is not resolved (phase {phase:?})")]
    BattleNotResolved { phase: BattlePhase },

    #[error("game is over")]
    GameOver,

    #[error("no game in progress (scene {scene:?})")]
    NotInGame { scene: Scene },

    #[error("{card} is dealt to both sides")]
    OverlappingHands { card: CardId },

    #[error("hands must be non-empty and equal in size (player {player}, enemy {enemy})")]
    UnevenHands { player: usize, enemy: usize },

    #[error("duplicate card {card}")]
    DuplicateCard { card: CardId },

    #[error("catalog needs {needed} cards, has {available}")]
    CatalogTooSmall { needed: usize, available: usize },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl EngineError {
    /// Errors the caller can clear by retrying the same request later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::UnresolvableMove { .. } | EngineError::Collaborator(_)
        )
    }
}
