//! Grid tiles and their damage rules.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{ExplosionShape, TileType};

/// One cell of the arena. Position is implicit from its grid index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    pub health: i32,
    /// Blocks movement and flood fills.
    pub solid: bool,
    pub diggable: bool,
    pub interactable: bool,
    /// Sprite index, for renderers only.
    pub visual_id: u8,
}

impl Default for Tile {
    fn default() -> Self {
        Self::empty()
    }
}

impl Tile {
    fn build(
        tile_type: TileType,
        solid: bool,
        diggable: bool,
        interactable: bool,
        visual_id: u8,
        health: i32,
    ) -> Self {
        Self {
            tile_type,
            health,
            solid,
            diggable,
            interactable,
            visual_id,
        }
    }

    /// Default tile of the given type.
    pub fn new(tile_type: TileType) -> Self {
        match tile_type {
            TileType::Empty => Self::empty(),
            TileType::Bedrock => Self::bedrock(BEDROCK_TILE_ID, DEFAULT_TILE_HEALTH),
            TileType::Dirt => Self::dirt(DIRT_TILE_ID),
            TileType::Concrete => Self::concrete(),
            TileType::Urethane => Self::urethane(),
            TileType::Bioslime => Self::bioslime(),
            TileType::C4 => Self::c4(),
            TileType::Boulder => Self::boulder(BOULDER_TILE_ID),
            TileType::Bricks => Self::bricks(),
            TileType::Switch => Self::switch(),
            TileType::SecurityDoor => Self::security_door(),
            TileType::Tunnel => Self::tunnel(),
        }
    }

    /// Decode a raw map byte. Unknown ids (including pickup and monster
    /// spawn markers) decode to empty floor.
    pub fn from_visual_id(id: u8) -> Self {
        match id {
            LIGHT_ROCK_TILE_ID => Self::bedrock(id, LIGHT_ROCK_HEALTH),
            HEAVY_ROCK_TILE_ID => Self::bedrock(id, HEAVY_ROCK_HEALTH),
            _ if BEDROCK_CORNER_TILE_IDS.contains(&id) => {
                Self::bedrock(id, BEDROCK_CORNER_HEALTH)
            }
            _ if BEDROCK_TILE_IDS.contains(&id) => Self::bedrock(id, DEFAULT_TILE_HEALTH),
            _ if DIRT_TILE_IDS.contains(&id) => Self::dirt(id),
            BOULDER_TILE_ID => Self::boulder(id),
            CONCRETE_TILE_ID => Self::concrete(),
            URETHANE_TILE_ID => Self::urethane(),
            BIOSLIME_TILE_ID => Self::bioslime(),
            BRICKS_TILE_ID => Self::bricks(),
            SWITCH_TILE_ID => Self::switch(),
            SECURITY_DOOR_TILE_ID => Self::security_door(),
            TUNNEL_TILE_ID => Self::tunnel(),
            C4_TILE_ID => Self::c4(),
            _ => Self::empty(),
        }
    }

    pub fn empty() -> Self {
        Self::build(TileType::Empty, false, false, false, EMPTY_TILE_ID, DEFAULT_TILE_HEALTH)
    }

    pub fn bedrock(visual_id: u8, health: i32) -> Self {
        Self::build(TileType::Bedrock, true, true, false, visual_id, health)
    }

    pub fn dirt(visual_id: u8) -> Self {
        Self::build(TileType::Dirt, true, true, false, visual_id, DEFAULT_TILE_HEALTH)
    }

    pub fn concrete() -> Self {
        Self::build(TileType::Concrete, true, false, false, CONCRETE_TILE_ID, DEFAULT_TILE_HEALTH)
    }

    pub fn urethane() -> Self {
        Self::build(TileType::Urethane, true, true, false, URETHANE_TILE_ID, URETHANE_HEALTH)
    }

    pub fn bioslime() -> Self {
        Self::build(TileType::Bioslime, true, true, false, BIOSLIME_TILE_ID, DEFAULT_TILE_HEALTH)
    }

    pub fn c4() -> Self {
        Self::build(TileType::C4, true, true, false, C4_TILE_ID, C4_TILE_HEALTH)
    }

    pub fn boulder(visual_id: u8) -> Self {
        Self::build(TileType::Boulder, true, false, true, visual_id, DEFAULT_TILE_HEALTH)
    }

    pub fn bricks() -> Self {
        Self::build(TileType::Bricks, true, true, false, BRICKS_TILE_ID, DEFAULT_TILE_HEALTH)
    }

    pub fn switch() -> Self {
        Self::build(TileType::Switch, true, false, true, SWITCH_TILE_ID, DEFAULT_TILE_HEALTH)
    }

    pub fn security_door() -> Self {
        Self::build(
            TileType::SecurityDoor,
            true,
            false,
            false,
            SECURITY_DOOR_TILE_ID,
            DEFAULT_TILE_HEALTH,
        )
    }

    pub fn tunnel() -> Self {
        Self::build(TileType::Tunnel, false, false, true, TUNNEL_TILE_ID, DEFAULT_TILE_HEALTH)
    }

    pub fn is_empty(&self) -> bool {
        self.tile_type == TileType::Empty
    }

    /// Apply `amount` damage, optionally tagged with the blast that caused it.
    ///
    /// Returns `true` when this call destroyed the tile. A destroyed tile
    /// becomes empty floor in one step. Non-positive amounts and
    /// indestructible tiles are left untouched.
    pub fn take_damage(&mut self, amount: i32, blast: Option<ExplosionShape>) -> bool {
        if amount <= 0 || self.tile_type.is_indestructible() || self.is_empty() {
            return false;
        }

        let mut damage = amount;
        if self.tile_type == TileType::Dirt && blast.is_some_and(ExplosionShape::is_basic_blast) {
            damage *= 2;
        }

        self.health = (self.health - damage).max(0);
        if self.health == 0 {
            *self = Self {
                health: 0,
                ..Self::empty()
            };
            return true;
        }

        match self.tile_type {
            TileType::Bedrock => {
                if self.health <= BROKEN_VISUAL_THRESHOLD {
                    self.visual_id = LIGHT_ROCK_TILE_ID;
                } else if self.health <= DAMAGED_VISUAL_THRESHOLD {
                    self.visual_id = HEAVY_ROCK_TILE_ID;
                }
            }
            TileType::Bricks => {
                if self.health <= BROKEN_VISUAL_THRESHOLD {
                    self.visual_id = BRICKS_BROKEN_TILE_ID;
                } else if self.health <= DAMAGED_VISUAL_THRESHOLD {
                    self.visual_id = BRICKS_DAMAGED_TILE_ID;
                }
            }
            _ => {}
        }
        false
    }
}
