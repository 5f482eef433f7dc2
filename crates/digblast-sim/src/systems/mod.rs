//! Event resolution systems.
//!
//! Systems are free functions over a [`SimContext`], which borrows every
//! piece of mutable simulation state for the duration of one resolution.
//! They do not own state: actors live in the ECS world, tiles in the
//! arena, pending work in the event queue.

pub mod bombs;
pub mod combat;
pub mod dig;
pub mod dispatch;
pub mod explosion;
pub mod movement;
pub mod snapshot;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use digblast_core::components::Actor;
use digblast_core::types::ActorId;
use digblast_events::{Event, EventId, EventQueue};

use crate::action::SimAction;
use crate::arena::Arena;
use crate::engine::SimConfig;

/// Mutable view of the whole simulation at one clock reading.
pub struct SimContext<'a> {
    pub world: &'a mut World,
    pub arena: &'a mut Arena,
    pub queue: &'a mut EventQueue<SimAction>,
    pub rng: &'a mut ChaCha8Rng,
    pub config: &'a SimConfig,
    /// Clock reading, taken once per engine call.
    pub now: f64,
}

impl SimContext<'_> {
    /// Queue `action` to fire `delay` seconds from now.
    pub fn schedule(&mut self, action: SimAction, delay: f64, creator: Option<ActorId>) -> EventId {
        self.schedule_at(action, self.now + delay, creator)
    }

    /// Queue `action` to fire at absolute clock time `at`.
    pub fn schedule_at(&mut self, action: SimAction, at: f64, creator: Option<ActorId>) -> EventId {
        let mut event = Event::new(action, at, self.now);
        event.created_by = creator;
        self.queue.add(event)
    }

    /// Stable id of an actor entity.
    pub fn actor_id(&self, entity: Entity) -> Option<ActorId> {
        self.world.get::<&Actor>(entity).ok().map(|a| a.id)
    }
}
