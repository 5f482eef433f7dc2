//! Event targets understood by the simulation.

use hecs::Entity;

use digblast_core::enums::{Direction, EventType};
use digblast_core::types::ActorId;
use digblast_events::EventTarget;

/// What a scheduled event does, and to whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAction {
    Explode { bomb: Entity },
    /// Carries the direction in effect when the step was scheduled; the
    /// actor may have turned since.
    Move { actor: Entity, direction: Direction },
    Dig { actor: Entity },
}

impl EventTarget for SimAction {
    type Tag = EventType;
    type Creator = ActorId;

    fn tag(&self) -> EventType {
        match self {
            SimAction::Explode { .. } => EventType::Explode,
            SimAction::Move { .. } => EventType::Move,
            SimAction::Dig { .. } => EventType::Dig,
        }
    }
}
