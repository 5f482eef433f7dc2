//! Bomb placement, triggering and the bombs explosions spawn.

use glam::IVec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use digblast_core::bomb::{Bomb, BombKind, Fuse};
use digblast_core::components::{Inventory, Motion};
use digblast_core::constants::{
    GRASSHOPPER_FUSE_MAX_SECS, GRASSHOPPER_FUSE_MIN_SECS, GRASSHOPPER_HOP_DISTANCE,
    GRASSHOPPER_MAX_HOPS, GRASSHOPPER_SHRINK_CHANCE, GRASSHOPPER_STAY_CHANCE,
};
use digblast_core::enums::ExplosionShape;
use digblast_core::error::IntentError;
use digblast_core::types::{ActorId, Position, TileCoord};
use digblast_terrain::{TileGrid, TileMask};

use crate::action::SimAction;
use crate::systems::SimContext;

/// Blast sizes a grasshopper moves between from hop to hop.
const HOP_SIZES: [ExplosionShape; 3] = [
    ExplosionShape::Small,
    ExplosionShape::Medium,
    ExplosionShape::Large,
];

/// Spawn a bomb entity and schedule its fuse, if it has one.
pub fn place_bomb(ctx: &mut SimContext, bomb: Bomb) -> Entity {
    let trigger_at = bomb.trigger_at();
    let owner = bomb.owner;
    let entity = ctx.world.spawn((bomb,));
    if let Some(at) = trigger_at {
        ctx.schedule_at(SimAction::Explode { bomb: entity }, at.max(ctx.now), owner);
    }
    entity
}

/// Make `bomb` go off `delay` seconds from now, replacing any explosion
/// already pending for it. Returns `false` if the bomb no longer exists.
pub fn reschedule_explosion(ctx: &mut SimContext, bomb: Entity, delay: f64) -> bool {
    let Ok(owner) = ctx.world.get::<&Bomb>(bomb).map(|b| b.owner) else {
        return false;
    };
    let target = SimAction::Explode { bomb };
    for id in ctx.queue.ids_where(|action| *action == target) {
        ctx.queue.cancel(id);
    }
    ctx.schedule(target, delay, owner);
    true
}

/// Set off every bomb lying inside `area` except `source`. Secondary
/// blasts keep their own timing.
pub fn trigger_in_area(ctx: &mut SimContext, source: Entity, area: &TileMask, delay: f64) -> usize {
    let hits: Vec<Entity> = ctx
        .world
        .query::<&Bomb>()
        .iter()
        .filter(|(entity, bomb)| {
            *entity != source && bomb.triggerable() && area.get(bomb.tile)
        })
        .map(|(entity, _)| entity)
        .collect();
    for &bomb in &hits {
        reschedule_explosion(ctx, bomb, delay);
    }
    hits.len()
}

/// Landmines lying on `tile`.
pub fn landmines_at(world: &World, tile: TileCoord) -> Vec<Entity> {
    world
        .query::<&Bomb>()
        .iter()
        .filter(|(_, bomb)| bomb.kind == BombKind::Landmine && bomb.tile == tile)
        .map(|(entity, _)| entity)
        .collect()
}

/// Secondary explosion of a struck C4 tile.
pub fn spawn_chain_blast(
    ctx: &mut SimContext,
    tile: TileCoord,
    owner: Option<ActorId>,
    delay: f64,
) -> Entity {
    let bomb = Bomb::new(BombKind::C4Tile, tile, owner, ctx.now)
        .with_fuse(Fuse::After(delay))
        .as_secondary();
    place_bomb(ctx, bomb)
}

/// Pull `tile` inside the grid, one tile clear of the edge.
pub fn clamp_inside(grid: &TileGrid, tile: TileCoord) -> TileCoord {
    let max_x = (grid.width() as i32 - 2).max(1);
    let max_y = (grid.height() as i32 - 2).max(1);
    IVec2::new(tile.x.clamp(1, max_x), tile.y.clamp(1, max_y))
}

/// Random tile within `distance` of `origin` on both axes.
pub fn scatter_tile(ctx: &mut SimContext, origin: TileCoord, distance: i32) -> TileCoord {
    let offset = IVec2::new(
        ctx.rng.gen_range(-distance..=distance),
        ctx.rng.gen_range(-distance..=distance),
    );
    clamp_inside(&ctx.arena.grid, origin + offset)
}

/// Blast size for the hop after `source`.
fn next_hop_shape(ctx: &mut SimContext, source: &Bomb) -> ExplosionShape {
    if source.kind == BombKind::Grasshopper {
        return [ExplosionShape::Small, ExplosionShape::Medium]
            .choose(&mut *ctx.rng)
            .copied()
            .unwrap_or(ExplosionShape::Small);
    }

    let current = source
        .shape
        .and_then(|shape| HOP_SIZES.iter().position(|s| *s == shape))
        .unwrap_or(0);
    let roll: f64 = ctx.rng.gen();
    let next = if roll < GRASSHOPPER_SHRINK_CHANCE {
        current.saturating_sub(1)
    } else if roll < GRASSHOPPER_SHRINK_CHANCE + GRASSHOPPER_STAY_CHANCE {
        current
    } else {
        (current + 1).min(HOP_SIZES.len() - 1)
    };
    HOP_SIZES[next]
}

/// Schedule the grasshopper's next jump, unless it has used them all.
pub fn spawn_grasshopper_hop(ctx: &mut SimContext, source: &Bomb) -> Option<Entity> {
    let hop_count = source.hop_count + 1;
    if hop_count >= GRASSHOPPER_MAX_HOPS {
        log::debug!("grasshopper at {:?} finished after {} hops", source.tile, hop_count);
        return None;
    }

    let tile = scatter_tile(ctx, source.tile, GRASSHOPPER_HOP_DISTANCE);
    let shape = next_hop_shape(ctx, source);
    let fuse = ctx
        .rng
        .gen_range(GRASSHOPPER_FUSE_MIN_SECS..GRASSHOPPER_FUSE_MAX_SECS);

    let mut hop = Bomb::new(BombKind::GrasshopperHop, tile, source.owner, ctx.now)
        .with_shape(shape)
        .with_fuse(Fuse::After(fuse));
    hop.hop_count = hop_count;
    Some(place_bomb(ctx, hop))
}

/// Plant the actor's selected bomb on its tile.
pub fn plant(ctx: &mut SimContext, entity: Entity, id: ActorId) -> Result<BombKind, IntentError> {
    let (tile, facing) = {
        let pos = ctx
            .world
            .get::<&Position>(entity)
            .map_err(|_| IntentError::UnknownActor(id))?;
        let motion = ctx
            .world
            .get::<&Motion>(entity)
            .map_err(|_| IntentError::UnknownActor(id))?;
        (pos.tile(), motion.facing)
    };

    let kind = {
        let mut inventory = ctx
            .world
            .get::<&mut Inventory>(entity)
            .map_err(|_| IntentError::CannotPlant(id))?;
        inventory
            .take_selected()
            .ok_or(IntentError::NoBombsLeft(id))?
    };

    let mut bomb = Bomb::new(kind, tile, Some(id), ctx.now);
    if kind.is_directed() {
        bomb = bomb.with_direction(facing);
    }
    place_bomb(ctx, bomb);
    log::debug!("actor {:?} planted {:?} at {:?}", id, kind, tile);
    Ok(kind)
}

/// Detonate every remote bomb owned by `owner` right now.
pub fn detonate_remotes(ctx: &mut SimContext, owner: ActorId) -> usize {
    let remotes: Vec<Entity> = ctx
        .world
        .query::<&Bomb>()
        .iter()
        .filter(|(_, bomb)| bomb.kind.is_remote() && bomb.owner == Some(owner))
        .map(|(entity, _)| entity)
        .collect();
    for &bomb in &remotes {
        reschedule_explosion(ctx, bomb, 0.0);
    }
    remotes.len()
}
