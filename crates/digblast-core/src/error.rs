//! Errors reported back to intent callers.

use thiserror::Error;

use crate::types::ActorId;

/// Why an intent was refused. Refusals never change simulation state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("unknown actor {0:?}")]
    UnknownActor(ActorId),
    #[error("actor {0:?} is dead")]
    ActorDead(ActorId),
    #[error("actor {0:?} cannot plant bombs")]
    CannotPlant(ActorId),
    #[error("actor {0:?} has no bombs left")]
    NoBombsLeft(ActorId),
}
