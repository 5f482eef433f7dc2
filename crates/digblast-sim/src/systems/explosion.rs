//! Explosion resolution: what each bomb does to the grid when it goes off.

use hecs::Entity;

use digblast_core::bomb::{Bomb, BombEffect, BombKind, Fuse};
use digblast_core::constants::{
    CRACKER_FILL_DAMAGE, CRACKER_FILL_DISTANCE, CRACKER_SCATTER_COUNT, CRACKER_SCATTER_DISTANCE,
    CRACKER_SCATTER_INTERVAL_SECS, DEFUSE_DELAY_SECS, EXTINGUISHER_DISTANCE, FLAMETHROWER_DAMAGE,
    FLAMETHROWER_DISTANCE, FLAME_BARREL_DAMAGE, FLAME_BARREL_DISTANCE,
};
use digblast_core::enums::{BombState, ExplosionShape, TileType};
use digblast_core::tile::Tile;
use digblast_core::types::{ActorId, TileCoord};
use digblast_terrain::{calculate_damage, cone_area, flood_fill, TileMask};

use crate::systems::{bombs, SimContext};

/// Go off. The bomb entity is always removed afterwards; an event whose
/// bomb is already gone does nothing.
pub fn resolve_explosion(ctx: &mut SimContext, entity: Entity) {
    let Ok(bomb) = ctx.world.get::<&Bomb>(entity).map(|b| (*b).clone()) else {
        log::trace!("explosion for vanished bomb {:?} ignored", entity);
        return;
    };
    log::debug!("{:?} at {:?} explodes", bomb.kind, bomb.tile);

    match bomb.kind.effect() {
        BombEffect::Blast => pattern_blast(ctx, entity, &bomb),
        BombEffect::Convert(material) => convert_area(ctx, &bomb, material),
        BombEffect::FloodBurn => {
            let area = open_area(ctx, bomb.tile, FLAME_BARREL_DISTANCE);
            burn(ctx, entity, &bomb, &area, FLAME_BARREL_DAMAGE);
        }
        BombEffect::Cracker => {
            let area = open_area(ctx, bomb.tile, CRACKER_FILL_DISTANCE);
            burn(ctx, entity, &bomb, &area, CRACKER_FILL_DAMAGE);
            scatter_crackers(ctx, &bomb);
        }
        BombEffect::BedrockBlast => bedrock_blast(ctx, &bomb),
        BombEffect::Place(tile_type) => place_tile(ctx, &bomb, tile_type),
        BombEffect::FlameCone => {
            let walkable = ctx.arena.grid.walkable_mask();
            let area = cone_area(&walkable, bomb.tile, bomb.direction, FLAMETHROWER_DISTANCE);
            burn(ctx, entity, &bomb, &area, FLAMETHROWER_DAMAGE);
        }
        BombEffect::ExtinguishCone => extinguish(ctx, entity, &bomb),
    }

    if let Err(e) = ctx.world.despawn(entity) {
        log::trace!("bomb {:?} already gone after exploding: {}", entity, e);
    }
}

/// Open floor reachable from `origin` within `max_dist` steps.
fn open_area(ctx: &SimContext, origin: TileCoord, max_dist: u32) -> TileMask {
    flood_fill(&ctx.arena.grid.walkable_mask(), origin, max_dist)
}

/// Damage tiles and flash the ones left open. Returns the C4 tiles hit.
fn damage_tiles(
    ctx: &mut SimContext,
    hits: impl IntoIterator<Item = (TileCoord, i32)>,
    blast: Option<ExplosionShape>,
) -> Vec<TileCoord> {
    let mut struck_c4 = Vec::new();
    for (coord, amount) in hits {
        let Some(tile) = ctx.arena.grid.get_mut(coord) else {
            continue;
        };
        if tile.tile_type == TileType::C4 {
            struck_c4.push(coord);
        }
        tile.take_damage(amount, blast);
        if !tile.solid {
            ctx.arena.flash(coord);
        }
    }
    struck_c4
}

/// One delayed secondary explosion per struck C4 tile.
fn chain_c4(ctx: &mut SimContext, struck: &[TileCoord], owner: Option<ActorId>) {
    if struck.is_empty() {
        return;
    }
    log::debug!("{} c4 tiles set off", struck.len());
    let delay = ctx.config.chain_delay_secs;
    for &tile in struck {
        bombs::spawn_chain_blast(ctx, tile, owner, delay);
    }
}

/// Uniform pattern damage around the bomb.
fn pattern_blast(ctx: &mut SimContext, entity: Entity, bomb: &Bomb) {
    let Some(shape) = bomb.shape else {
        log::warn!("{:?} has no blast shape; nothing happens", bomb.kind);
        return;
    };
    let (width, height) = (ctx.arena.grid.width(), ctx.arena.grid.height());
    let Some(damage) = calculate_damage(shape, bomb.tile, width, height) else {
        log::warn!("{:?} blast has no pattern; nothing happens", shape);
        return;
    };

    let struck = damage_tiles(
        ctx,
        damage.iter().map(|(tile, amount)| (tile, i32::from(amount))),
        Some(shape),
    );
    let delay = ctx.config.chain_delay_secs;
    bombs::trigger_in_area(ctx, entity, &damage.to_mask(), delay);
    chain_c4(ctx, &struck, bomb.owner);

    if bomb.kind.is_grasshopper() {
        bombs::spawn_grasshopper_hop(ctx, bomb);
    }
}

/// Uniform damage over an arbitrary area, setting off bombs inside it.
fn burn(ctx: &mut SimContext, entity: Entity, bomb: &Bomb, area: &TileMask, damage: i32) {
    let struck = damage_tiles(ctx, area.iter().map(|tile| (tile, damage)), None);
    let delay = ctx.config.chain_delay_secs;
    bombs::trigger_in_area(ctx, entity, area, delay);
    chain_c4(ctx, &struck, bomb.owner);
}

/// Fill reachable open floor with `material`.
fn convert_area(ctx: &mut SimContext, bomb: &Bomb, material: TileType) {
    let area = open_area(ctx, bomb.tile, ctx.config.conversion_fill_distance);
    let mut converted = 0;
    for coord in area.iter() {
        if ctx.arena.grid.get(coord).is_some_and(Tile::is_empty) {
            ctx.arena.grid.set(coord, Tile::new(material));
            converted += 1;
        }
    }
    log::debug!("{:?} converted {} tiles to {:?}", bomb.kind, converted, material);
}

/// Delayed medium blasts scattered around a cracker barrel.
fn scatter_crackers(ctx: &mut SimContext, bomb: &Bomb) {
    for i in 0..CRACKER_SCATTER_COUNT {
        let tile = bombs::scatter_tile(ctx, bomb.tile, CRACKER_SCATTER_DISTANCE);
        let delay = f64::from(i) * CRACKER_SCATTER_INTERVAL_SECS;
        let cracker = Bomb::new(BombKind::BigBomb, tile, bomb.owner, ctx.now)
            .with_fuse(Fuse::After(delay))
            .as_secondary();
        bombs::place_bomb(ctx, cracker);
    }
}

/// Large pattern that only hurts bedrock. Other bombs are left alone.
fn bedrock_blast(ctx: &mut SimContext, bomb: &Bomb) {
    let (width, height) = (ctx.arena.grid.width(), ctx.arena.grid.height());
    let Some(damage) = calculate_damage(ExplosionShape::Large, bomb.tile, width, height) else {
        return;
    };
    for (coord, amount) in damage.iter() {
        let Some(tile) = ctx.arena.grid.get_mut(coord) else {
            continue;
        };
        if tile.tile_type == TileType::Bedrock {
            tile.take_damage(i32::from(amount), None);
            ctx.arena.flash(coord);
        }
    }
}

/// Drop a single tile on the bomb's cell if nothing is there.
fn place_tile(ctx: &mut SimContext, bomb: &Bomb, tile_type: TileType) {
    let vacant = ctx.arena.grid.get(bomb.tile).is_some_and(Tile::is_empty);
    if vacant {
        ctx.arena.grid.set(bomb.tile, Tile::new(tile_type));
    } else {
        log::debug!("{:?} at {:?} landed on an occupied tile", bomb.kind, bomb.tile);
    }
}

/// Defuse every other bomb in the cone. Defused bombs stay on the grid and
/// their explosion is pushed a day out.
fn extinguish(ctx: &mut SimContext, entity: Entity, bomb: &Bomb) {
    let walkable = ctx.arena.grid.walkable_mask();
    let area = cone_area(&walkable, bomb.tile, bomb.direction, EXTINGUISHER_DISTANCE);

    let targets: Vec<Entity> = ctx
        .world
        .query::<&mut Bomb>()
        .iter()
        .filter(|(other, target)| {
            *other != entity && target.triggerable() && area.get(target.tile)
        })
        .map(|(other, target)| {
            target.state = BombState::Defused;
            other
        })
        .collect();
    for &target in &targets {
        bombs::reschedule_explosion(ctx, target, DEFUSE_DELAY_SECS);
    }
    log::debug!("extinguisher defused {} bombs", targets.len());
}
