use glam::IVec2;

use crate::bomb::{Bomb, BombEffect, BombKind, Fuse};
use crate::commands::PlayerIntent;
use crate::components::{Digger, Inventory};
use crate::constants::*;
use crate::enums::*;
use crate::map::{MapData, MonsterSpawn};
use crate::pickup::{PickupKind, ToolKind, TreasureKind};
use crate::tile::Tile;
use crate::types::{ActorId, Position};

// ---- Serde ----

#[test]
fn test_direction_serde() {
    for v in Direction::ALL {
        let json = serde_json::to_string(&v).unwrap();
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
    assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
}

#[test]
fn test_intent_tagged_json() {
    let intent = PlayerIntent::SetDirection {
        actor: ActorId(3),
        direction: Direction::Up,
    };
    let json = serde_json::to_string(&intent).unwrap();
    assert!(json.contains("\"type\":\"SetDirection\""));
    let back: PlayerIntent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, intent);
    assert_eq!(back.actor(), ActorId(3));

    let parsed: PlayerIntent =
        serde_json::from_str(r#"{"type":"PlantBomb","actor":7}"#).unwrap();
    assert_eq!(parsed, PlayerIntent::PlantBomb { actor: ActorId(7) });
}

#[test]
fn test_map_data_serde_defaults() {
    let map = MapData::bordered(4, 3);
    let mut value = serde_json::to_value(&map).unwrap();
    value.as_object_mut().unwrap().remove("monsters");
    value.as_object_mut().unwrap().remove("pickups");
    let back: MapData = serde_json::from_value(value).unwrap();
    assert_eq!(back.tiles, map.tiles);
    assert!(back.monsters.is_empty());
}

// ---- Tiles ----

#[test]
fn test_tile_destroyed_in_one_step() {
    let mut tile = Tile::bedrock(BEDROCK_TILE_ID, 10);
    assert!(tile.take_damage(15, None));
    assert_eq!(tile.tile_type, TileType::Empty);
    assert_eq!(tile.health, 0);
    assert!(!tile.solid);
    assert!(!tile.diggable);
    assert!(!tile.interactable);
    assert_eq!(tile.visual_id, EMPTY_TILE_ID);
}

#[test]
fn test_zero_damage_changes_nothing() {
    let samples = [
        Tile::dirt(52),
        Tile::bedrock(LIGHT_ROCK_TILE_ID, LIGHT_ROCK_HEALTH),
        Tile::c4(),
        Tile::switch(),
        Tile::tunnel(),
        Tile::empty(),
    ];
    for original in samples {
        let mut tile = original.clone();
        assert!(!tile.take_damage(0, Some(ExplosionShape::Medium)));
        assert_eq!(tile, original);
    }
}

#[test]
fn test_dirt_takes_double_from_basic_blasts() {
    let mut blasted = Tile::dirt(DIRT_TILE_ID);
    blasted.take_damage(30, Some(ExplosionShape::Large));
    assert_eq!(blasted.health, 40);

    let mut crossed = Tile::dirt(DIRT_TILE_ID);
    crossed.take_damage(30, Some(ExplosionShape::SmallCross));
    assert_eq!(crossed.health, 70);

    let mut dug = Tile::dirt(DIRT_TILE_ID);
    dug.take_damage(30, None);
    assert_eq!(dug.health, 70);
}

#[test]
fn test_indestructible_tiles_ignore_damage() {
    for mut tile in [Tile::concrete(), Tile::security_door(), Tile::switch()] {
        let before = tile.clone();
        assert!(!tile.take_damage(500, Some(ExplosionShape::Nuke)));
        assert_eq!(tile, before);
    }
}

#[test]
fn test_bedrock_and_bricks_visual_progression() {
    let mut rock = Tile::bedrock(BEDROCK_TILE_ID, 100);
    rock.take_damage(50, None);
    assert_eq!(rock.visual_id, HEAVY_ROCK_TILE_ID);
    rock.take_damage(25, None);
    assert_eq!(rock.visual_id, LIGHT_ROCK_TILE_ID);

    let mut bricks = Tile::bricks();
    bricks.take_damage(60, None);
    assert_eq!(bricks.visual_id, BRICKS_DAMAGED_TILE_ID);
    bricks.take_damage(20, None);
    assert_eq!(bricks.visual_id, BRICKS_BROKEN_TILE_ID);
}

#[test]
fn test_tile_from_visual_id() {
    assert_eq!(Tile::from_visual_id(LIGHT_ROCK_TILE_ID).health, LIGHT_ROCK_HEALTH);
    assert_eq!(Tile::from_visual_id(HEAVY_ROCK_TILE_ID).health, HEAVY_ROCK_HEALTH);
    assert_eq!(Tile::from_visual_id(55).health, BEDROCK_CORNER_HEALTH);
    assert_eq!(Tile::from_visual_id(53).tile_type, TileType::Dirt);
    assert_eq!(Tile::from_visual_id(URETHANE_TILE_ID).health, URETHANE_HEALTH);
    assert_eq!(Tile::from_visual_id(BOULDER_TILE_ID).tile_type, TileType::Boulder);
    // Pickup markers sit on empty floor.
    assert!(Tile::from_visual_id(150).is_empty());
    assert!(Tile::from_visual_id(TUNNEL_TILE_ID).interactable);
}

// ---- Positions ----

#[test]
fn test_position_tile_threshold() {
    assert_eq!(Position::new(5.5, 2.5).tile(), IVec2::new(5, 2));
    assert_eq!(Position::new(5.995, 2.0).tile(), IVec2::new(6, 2));
    assert_eq!(Position::new(5.98, 2.99).tile(), IVec2::new(5, 3));
}

#[test]
fn test_position_quantize_and_lane() {
    let mut p = Position::new(6.02, 3.74);
    p.quantize();
    assert_eq!(p, Position::new(6.0, 3.5));

    let mut q = Position::new(4.0, 7.9);
    q.center_lane(Direction::Right);
    assert_eq!(q, Position::new(4.0, 7.5));
    q.center_lane(Direction::Up);
    assert_eq!(q, Position::new(4.5, 7.5));
}

#[test]
fn test_position_advance() {
    let mut p = Position::new(5.5, 5.5);
    p.advance(Direction::Left, 0.5);
    p.advance(Direction::Down, 1.0);
    assert_eq!(p, Position::new(5.0, 6.5));
    assert_eq!(p.along(Direction::Up), 6.5);
}

// ---- Actors ----

#[test]
fn test_inventory_take_and_cycle() {
    let mut inv = Inventory::with_slots([
        (BombKind::SmallBomb, 1),
        (BombKind::Landmine, 2),
        (BombKind::Nuke, 0),
    ]);
    assert_eq!(inv.slots.len(), 2);
    assert_eq!(inv.select_next(), Some(BombKind::Landmine));
    assert_eq!(inv.take_selected(), Some(BombKind::Landmine));
    assert_eq!(inv.take_selected(), Some(BombKind::Landmine));
    // Landmine slot emptied, selection falls back onto the last slot.
    assert_eq!(inv.selected_kind(), Some(BombKind::SmallBomb));
    assert_eq!(inv.take_selected(), Some(BombKind::SmallBomb));
    assert_eq!(inv.take_selected(), None);
    assert_eq!(inv.select_next(), None);
}

#[test]
fn test_digger_power_counts_tools() {
    let mut digger = Digger::default();
    assert_eq!(digger.power(), BASE_DIG_POWER);
    digger.add_tool(ToolKind::Drill);
    digger.add_tool(ToolKind::SmallPick);
    digger.add_tool(ToolKind::SmallPick);
    digger.add_tool(ToolKind::Medpack);
    assert_eq!(digger.power(), BASE_DIG_POWER + 5 + 2);
}

#[test]
fn test_monster_fight_power() {
    assert_eq!(ActorKind::Player.fight_power(), PLAYER_FIGHT_POWER);
    assert_eq!(ActorKind::Slime.fight_power(), 2);
}

// ---- Bombs and pickups ----

#[test]
fn test_bomb_fuse_and_trigger_time() {
    let bomb = Bomb::new(BombKind::BigBomb, IVec2::new(3, 4), Some(ActorId(1)), 10.0);
    assert_eq!(bomb.trigger_at(), Some(13.0));
    assert_eq!(bomb.shape, Some(ExplosionShape::Medium));

    let remote = Bomb::new(BombKind::SmallRemote, IVec2::ZERO, None, 1.0);
    assert_eq!(remote.trigger_at(), None);
    assert!(remote.kind.is_remote());

    let hop = Bomb::new(BombKind::GrasshopperHop, IVec2::ZERO, None, 2.0)
        .with_fuse(Fuse::After(0.25))
        .with_shape(ExplosionShape::Large);
    assert_eq!(hop.trigger_at(), Some(2.25));
    assert_eq!(hop.shape, Some(ExplosionShape::Large));
}

#[test]
fn test_secondary_bombs_are_not_triggerable() {
    let planted = Bomb::new(BombKind::BigBomb, IVec2::new(2, 2), None, 0.0);
    assert!(planted.triggerable());
    let chained = Bomb::new(BombKind::C4Tile, IVec2::new(2, 2), None, 0.0).as_secondary();
    assert!(!chained.triggerable());

    // Older bomb records without the flag still load.
    let mut value = serde_json::to_value(&planted).unwrap();
    value.as_object_mut().unwrap().remove("secondary");
    let loaded: Bomb = serde_json::from_value(value).unwrap();
    assert_eq!(loaded, planted);
}

#[test]
fn test_bomb_effects() {
    assert_eq!(BombKind::C4.effect(), BombEffect::Convert(TileType::C4));
    assert_eq!(BombKind::Urethane.effect(), BombEffect::Convert(TileType::Urethane));
    assert_eq!(BombKind::Teleport.effect(), BombEffect::Place(TileType::Tunnel));
    assert_eq!(BombKind::C4Tile.effect(), BombEffect::Blast);
    assert!(!BombKind::PLANTABLE.contains(&BombKind::C4Tile));
    assert!(!BombKind::PLANTABLE.contains(&BombKind::GrasshopperHop));
}

#[test]
fn test_pickup_ids_and_values() {
    let crown = PickupKind::from_visual_id(154).unwrap();
    assert_eq!(crown, PickupKind::Treasure(TreasureKind::Crown));
    assert_eq!(crown.visual_id(), 154);
    assert_eq!(TreasureKind::Ruby.value(), 65);
    assert_eq!(PickupKind::from_visual_id(145), Some(PickupKind::Tool(ToolKind::Drill)));
    assert_eq!(PickupKind::from_visual_id(48), None);
}

// ---- Maps ----

#[test]
fn test_monster_spawn_decoding() {
    let spawn = MonsterSpawn::from_visual_id(80, IVec2::new(2, 2)).unwrap();
    assert_eq!(spawn.kind, ActorKind::Slime);
    assert_eq!(spawn.facing, Direction::Left);
    assert!(MonsterSpawn::from_visual_id(87, IVec2::ZERO).is_none());
}

#[test]
fn test_bordered_map() {
    let map = MapData::bordered(5, 4);
    assert_eq!(map.tiles.len(), 20);
    assert_eq!(map.tiles[0].tile_type, TileType::Concrete);
    assert!(map.tiles[6].is_empty());
    assert_eq!(map.spawn_corners()[3], IVec2::new(3, 2));
    assert!(!map.in_bounds(IVec2::new(5, 0)));
}
