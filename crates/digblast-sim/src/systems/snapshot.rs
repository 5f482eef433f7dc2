//! Snapshot system. Builds the `RenderSnapshot` from ECS and arena state.

use hecs::{Component, World};

use digblast_core::bomb::Bomb;
use digblast_core::components::{
    Actor, Digger, Inventory, Monster, Motion, Player, Vitality, Wallet,
};
use digblast_core::state::{ActorView, BombView, RenderSnapshot};
use digblast_core::types::Position;

use crate::arena::Arena;

/// Views of every actor carrying the marker component `M`, by id.
fn actor_views<M: Component>(world: &World) -> Vec<ActorView> {
    let mut query = world.query::<(
        &M,
        &Actor,
        &Position,
        &Motion,
        &Vitality,
        Option<&Wallet>,
        Option<&Digger>,
        Option<&Inventory>,
    )>();
    let mut views: Vec<ActorView> = query
        .iter()
        .map(
            |(_entity, (_, actor, pos, motion, vitality, wallet, digger, inventory))| ActorView {
                id: actor.id,
                kind: actor.kind,
                name: actor.name.clone(),
                sprite_id: actor.sprite_id,
                position: *pos,
                facing: motion.facing,
                state: motion.state,
                health: vitality.health,
                money: wallet.map_or(0, |w| w.money),
                dig_power: digger.map_or(0, Digger::power),
                selected_bomb: inventory.and_then(Inventory::selected_kind),
            },
        )
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

/// Build the complete visible state. `flashes` is the flash array taken
/// from the arena for this snapshot.
pub fn build_snapshot(world: &World, arena: &Arena, flashes: Vec<u8>, time: f64) -> RenderSnapshot {
    let players = actor_views::<Player>(world);
    let monsters = actor_views::<Monster>(world);

    let bombs = world
        .query::<&Bomb>()
        .iter()
        .map(|(_, bomb)| BombView {
            kind: bomb.kind,
            owner: bomb.owner,
            tile: bomb.tile,
            state: bomb.state,
            placed_at: bomb.placed_at,
        })
        .collect();

    RenderSnapshot {
        time,
        width: arena.grid.width(),
        height: arena.grid.height(),
        tiles: arena.grid.visual_ids(),
        flashes,
        players,
        monsters,
        pickups: arena.pickups(),
        bombs,
    }
}
