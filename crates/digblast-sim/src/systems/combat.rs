//! Same-tile melee.

use hecs::{Entity, World};

use digblast_core::components::{Combat, Motion, Vitality};
use digblast_core::enums::ActorState;
use digblast_core::types::Position;

use crate::systems::SimContext;

/// Reduce an actor's health. Returns `true` if this killed it.
pub fn apply_damage(world: &World, entity: Entity, amount: i32) -> bool {
    let Ok(mut vitality) = world.get::<&mut Vitality>(entity) else {
        return false;
    };
    let Ok(mut motion) = world.get::<&mut Motion>(entity) else {
        return false;
    };
    if motion.is_dead() || amount <= 0 {
        return false;
    }
    vitality.health = (vitality.health - amount).max(0);
    if vitality.health == 0 {
        motion.state = ActorState::Dead;
        return true;
    }
    false
}

fn is_dead(world: &World, entity: Entity) -> bool {
    world
        .get::<&Motion>(entity)
        .map_or(true, |motion| motion.is_dead())
}

/// Every other live actor on the acting actor's tile trades blows with
/// it: each side takes the other's combat power.
pub fn fight(ctx: &mut SimContext, entity: Entity) {
    let (tile, power) = {
        let Ok(pos) = ctx.world.get::<&Position>(entity) else {
            return;
        };
        let power = ctx.world.get::<&Combat>(entity).map_or(0, |c| c.power);
        (pos.tile(), power)
    };
    if is_dead(ctx.world, entity) {
        return;
    }

    let opponents: Vec<(Entity, i32)> = ctx
        .world
        .query::<(&Position, &Motion, &Combat)>()
        .iter()
        .filter(|(other, (pos, motion, _))| {
            *other != entity && !motion.is_dead() && pos.tile() == tile
        })
        .map(|(other, (_, _, combat))| (other, combat.power))
        .collect();

    for (other, other_power) in opponents {
        if is_dead(ctx.world, entity) {
            break;
        }
        if apply_damage(ctx.world, other, power) {
            log::debug!("actor {:?} killed {:?} at {:?}", entity, other, tile);
        }
        if apply_damage(ctx.world, entity, other_power) {
            log::debug!("actor {:?} killed {:?} at {:?}", other, entity, tile);
        }
    }
}
