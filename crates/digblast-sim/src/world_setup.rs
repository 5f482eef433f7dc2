//! Entity spawn factories for players and monsters.

use hecs::{Entity, World};

use digblast_core::components::*;
use digblast_core::constants::MONSTER_HEALTH;
use digblast_core::enums::{ActorKind, ActorState};
use digblast_core::map::{MonsterSpawn, PlayerSpec};
use digblast_core::types::{ActorId, Position, TileCoord};

use crate::engine::SimConfig;

/// Spawn a player at the centre of `tile`. An empty `PlayerSpec` inventory falls
/// back to the configured starting inventory.
pub fn spawn_player(
    world: &mut World,
    id: ActorId,
    sprite_id: u8,
    spec: &PlayerSpec,
    tile: TileCoord,
    config: &SimConfig,
) -> Entity {
    let bombs = if spec.inventory.is_empty() {
        config.starting_inventory.clone()
    } else {
        spec.inventory.clone()
    };

    world.spawn((
        Actor {
            id,
            kind: ActorKind::Player,
            name: spec.name.clone(),
            sprite_id,
        },
        Player,
        Position::tile_center(tile),
        Motion {
            facing: spec.facing,
            state: ActorState::Idle,
            speed: config.player_speed,
        },
        Vitality {
            health: config.player_health,
        },
        Combat {
            power: ActorKind::Player.fight_power(),
        },
        Digger::default(),
        Inventory::with_slots(bombs),
        Wallet::default(),
    ))
}

/// Spawn an idle monster. Monsters cannot dig, collect or plant.
pub fn spawn_monster(world: &mut World, id: ActorId, spawn: &MonsterSpawn, speed: f64) -> Entity {
    world.spawn((
        Actor {
            id,
            kind: spawn.kind,
            name: format!("{:?}", spawn.kind),
            sprite_id: 0,
        },
        Monster,
        Position::tile_center(spawn.tile),
        Motion {
            facing: spawn.facing,
            state: ActorState::Idle,
            speed,
        },
        Vitality {
            health: MONSTER_HEALTH,
        },
        Combat {
            power: spawn.kind.fight_power(),
        },
    ))
}
