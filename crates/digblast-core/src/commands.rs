//! Player intents delivered by whatever owns input or network decoding.

use serde::{Deserialize, Serialize};

use crate::bomb::BombKind;
use crate::enums::{ActorState, Direction};
use crate::types::ActorId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerIntent {
    /// Turn and start walking or digging in `direction`.
    SetDirection { actor: ActorId, direction: Direction },
    /// Drop the selected bomb on the actor's tile.
    PlantBomb { actor: ActorId },
    /// Detonate every remote bomb the actor owns.
    TriggerRemote { actor: ActorId },
    /// Cycle the selected inventory slot.
    SelectNextBomb { actor: ActorId },
}

impl PlayerIntent {
    pub fn actor(&self) -> ActorId {
        match self {
            PlayerIntent::SetDirection { actor, .. }
            | PlayerIntent::PlantBomb { actor }
            | PlayerIntent::TriggerRemote { actor }
            | PlayerIntent::SelectNextBomb { actor } => *actor,
        }
    }
}

/// Successful result of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IntentOutcome {
    /// Actor now faces the new direction in this state. `Idle` means the
    /// way ahead is blocked.
    Turned { state: ActorState },
    Planted { kind: BombKind },
    /// Number of remote bombs scheduled to explode.
    Detonated { count: usize },
    Selected { kind: Option<BombKind> },
}
