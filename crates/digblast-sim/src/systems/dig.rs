//! Continuous digging.

use hecs::Entity;

use digblast_core::components::Digger;
use digblast_core::enums::{ActorState, EventType};
use digblast_events::ResolveFlags;

use crate::action::SimAction;
use crate::systems::movement::{read, route_ahead, set_state};
use crate::systems::SimContext;

/// Stop walking and schedule the first strike on the tile ahead.
pub fn start_dig(ctx: &mut SimContext, entity: Entity) {
    let Some(id) = ctx.actor_id(entity) else {
        return;
    };
    ctx.queue.cancel_all(id, Some(EventType::Move));
    set_state(ctx.world, entity, ActorState::Dig);
    let interval = ctx.config.dig_interval_secs;
    ctx.schedule(SimAction::Dig { actor: entity }, interval, Some(id));
}

/// Strike the tile ahead with the actor's dig power. With `spawn` set,
/// keep digging while it stands and walk on once it is gone.
pub fn resolve_dig(ctx: &mut SimContext, entity: Entity, flags: ResolveFlags) {
    let Some((pos, motion)) = read(ctx.world, entity) else {
        return;
    };
    if motion.is_dead() {
        return;
    }
    let Ok(power) = ctx.world.get::<&Digger>(entity).map(|d| d.power()) else {
        return;
    };

    if let Some(tile) = ctx.arena.grid.neighbor_mut(pos.tile(), motion.facing) {
        if tile.diggable && tile.take_damage(power, None) {
            log::debug!(
                "actor {:?} dug through {:?} of {:?}",
                entity,
                motion.facing,
                pos.tile()
            );
        }
    }

    if flags.spawn {
        route_ahead(ctx, entity, flags);
    }
}
