//! Movement state machine.
//!
//! Walking is a chain of discrete move events, one per half-tile
//! boundary. Each event re-derives the distance travelled from the time
//! actually elapsed since it was created, so early settlement and
//! scheduling jitter never lose or invent distance beyond one rounding.

use hecs::{Entity, World};
use rand::seq::SliceRandom;

use digblast_core::components::{Digger, Motion, Wallet};
use digblast_core::enums::{ActorState, Direction, EventType, TileType};
use digblast_core::pickup::PickupKind;
use digblast_core::tile::Tile;
use digblast_core::types::{Position, TileCoord};
use digblast_events::ResolveFlags;

use crate::action::SimAction;
use crate::systems::{bombs, combat, dig, dispatch, SimContext};

/// Position and motion of a live-or-dead actor.
pub(crate) fn read(world: &World, entity: Entity) -> Option<(Position, Motion)> {
    let pos = *world.get::<&Position>(entity).ok()?;
    let motion = *world.get::<&Motion>(entity).ok()?;
    Some((pos, motion))
}

/// Change the animation state. Dead actors stay dead.
pub(crate) fn set_state(world: &World, entity: Entity, state: ActorState) {
    if let Ok(mut motion) = world.get::<&mut Motion>(entity) {
        if !motion.is_dead() {
            motion.state = state;
        }
    }
}

fn write_position(world: &World, entity: Entity, pos: Position) {
    if let Ok(mut current) = world.get::<&mut Position>(entity) {
        *current = pos;
    }
}

/// Turn an actor and start walking or digging in the new direction.
///
/// In-flight digging and walking are settled first, so progress made so
/// far is kept, then the actor is centred on its new lane. Returns the
/// resulting state; `Idle` means the way ahead is blocked.
pub fn set_direction(ctx: &mut SimContext, entity: Entity, direction: Direction) -> ActorState {
    let Some(id) = ctx.actor_id(entity) else {
        return ActorState::Idle;
    };
    match read(ctx.world, entity) {
        Some((_, motion)) if !motion.is_dead() => {}
        _ => return ActorState::Dead,
    }

    dispatch::settle(ctx, id, Some(EventType::Dig));
    dispatch::settle(ctx, id, Some(EventType::Move));

    let Some((mut pos, _)) = read(ctx.world, entity) else {
        return ActorState::Idle;
    };
    if let Ok(mut motion) = ctx.world.get::<&mut Motion>(entity) {
        motion.facing = direction;
    }
    pos.center_lane(direction);
    write_position(ctx.world, entity, pos);

    route_ahead(ctx, entity, ResolveFlags::default())
}

/// Decide what to do about the tile in the facing direction: walk into
/// it, dig it, use it, or stop.
pub fn route_ahead(ctx: &mut SimContext, entity: Entity, flags: ResolveFlags) -> ActorState {
    let Some((pos, motion)) = read(ctx.world, entity) else {
        return ActorState::Idle;
    };
    if motion.is_dead() {
        return ActorState::Dead;
    }

    match ctx.arena.grid.neighbor(pos.tile(), motion.facing).cloned() {
        Some(tile) if !tile.solid => {
            start_walk(ctx, entity);
            ActorState::Walk
        }
        Some(tile) => collide(ctx, entity, &tile, flags),
        None => {
            set_state(ctx.world, entity, ActorState::Idle);
            ActorState::Idle
        }
    }
}

/// React to a solid tile ahead.
fn collide(ctx: &mut SimContext, entity: Entity, tile: &Tile, flags: ResolveFlags) -> ActorState {
    let can_dig = ctx.world.get::<&Digger>(entity).is_ok();
    if tile.diggable && can_dig && flags.spawn {
        dig::start_dig(ctx, entity);
        return ActorState::Dig;
    }
    if tile.tile_type == TileType::Switch {
        ctx.arena.toggle_doors();
    }
    set_state(ctx.world, entity, ActorState::Idle);
    ActorState::Idle
}

/// Set the actor walking and schedule its next step.
pub fn start_walk(ctx: &mut SimContext, entity: Entity) {
    set_state(ctx.world, entity, ActorState::Walk);
    schedule_step(ctx, entity);
}

/// Distance from `coord` to the next half-tile boundary when travelling
/// in `dir`. Sitting exactly on a boundary counts as a full half tile.
pub fn distance_to_boundary(coord: f64, dir: Direction) -> f64 {
    let frac = coord - coord.floor();
    let d = if dir.is_positive() {
        if frac > 0.5 {
            1.0 - frac
        } else {
            0.5 - frac
        }
    } else if frac < 0.5 {
        frac
    } else {
        frac - 0.5
    };
    if d.abs() < 1e-9 {
        0.5
    } else {
        d
    }
}

/// Schedule the move event that carries a walking actor to its next
/// half-tile boundary.
pub fn schedule_step(ctx: &mut SimContext, entity: Entity) {
    let Some((pos, motion)) = read(ctx.world, entity) else {
        return;
    };
    if motion.state != ActorState::Walk || motion.speed <= 0.0 {
        return;
    }
    let Some(id) = ctx.actor_id(entity) else {
        return;
    };

    let d = distance_to_boundary(pos.along(motion.facing), motion.facing);
    let dt = d / motion.speed + ctx.config.move_slack_secs;
    ctx.schedule(
        SimAction::Move {
            actor: entity,
            direction: motion.facing,
        },
        dt,
        Some(id),
    );
}

/// Apply a fired move event.
pub fn resolve_movement(
    ctx: &mut SimContext,
    entity: Entity,
    direction: Direction,
    created_at: f64,
    flags: ResolveFlags,
) {
    let Some((mut pos, motion)) = read(ctx.world, entity) else {
        return;
    };
    if motion.is_dead() {
        return;
    }

    let elapsed = (ctx.now - created_at).max(0.0);
    pos.advance(direction, elapsed * motion.speed);
    pos.quantize();
    write_position(ctx.world, entity, pos);

    let moved = pos.along(direction);
    let frac = moved - moved.floor();
    let tolerance = ctx.config.crossing_tolerance;
    let mut blocked = false;

    if frac < tolerance || frac > 1.0 - tolerance {
        enter_tile(ctx, pos.tile());
    }

    if (frac - 0.5).abs() < tolerance {
        reach_center(ctx, entity);

        if let Some((pos, motion)) = read(ctx.world, entity) {
            match ctx.arena.grid.neighbor(pos.tile(), motion.facing).cloned() {
                Some(tile) if !tile.solid => {}
                Some(tile) => {
                    blocked = true;
                    collide(ctx, entity, &tile, flags);
                }
                None => {
                    blocked = true;
                    set_state(ctx.world, entity, ActorState::Idle);
                }
            }
        }
    }

    if flags.spawn && !blocked {
        schedule_step(ctx, entity);
    }

    combat::fight(ctx, entity);
}

/// An actor crossed into `tile`: set off any landmine lying there.
pub fn enter_tile(ctx: &mut SimContext, tile: TileCoord) {
    for mine in bombs::landmines_at(ctx.world, tile) {
        log::debug!("landmine at {:?} stepped on", tile);
        bombs::reschedule_explosion(ctx, mine, 0.0);
    }
}

/// An actor reached the centre of its tile: collect the pickup there and
/// ride any tunnel.
pub fn reach_center(ctx: &mut SimContext, entity: Entity) {
    let Some((pos, _)) = read(ctx.world, entity) else {
        return;
    };
    let tile = pos.tile();

    if let Some(kind) = ctx.arena.pickup_at(tile) {
        collect(ctx, entity, tile, kind);
    }

    let on_tunnel = ctx
        .arena
        .grid
        .get(tile)
        .is_some_and(|t| t.tile_type == TileType::Tunnel);
    if on_tunnel {
        let exits: Vec<TileCoord> = ctx
            .arena
            .grid
            .positions_of(TileType::Tunnel)
            .into_iter()
            .filter(|t| *t != tile)
            .collect();
        if let Some(exit) = exits.choose(&mut *ctx.rng) {
            log::debug!("actor {:?} tunnels {:?} -> {:?}", entity, tile, exit);
            write_position(ctx.world, entity, Position::tile_center(*exit));
        }
    }
}

/// Hand a pickup to the actor if it has somewhere to keep it.
fn collect(ctx: &mut SimContext, entity: Entity, tile: TileCoord, kind: PickupKind) {
    let taken = match kind {
        PickupKind::Treasure(treasure) => match ctx.world.get::<&mut Wallet>(entity) {
            Ok(mut wallet) => {
                wallet.money += treasure.value();
                true
            }
            Err(_) => false,
        },
        PickupKind::Tool(tool) => match ctx.world.get::<&mut Digger>(entity) {
            Ok(mut digger) => {
                digger.add_tool(tool);
                true
            }
            Err(_) => false,
        },
    };
    if taken {
        ctx.arena.take_pickup(tile);
    }
}
