//! Initial arena description supplied by a map loader.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::bomb::BombKind;
use crate::enums::{ActorKind, Direction};
use crate::pickup::Pickup;
use crate::tile::Tile;
use crate::types::TileCoord;

/// A monster placed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSpawn {
    pub kind: ActorKind,
    pub tile: TileCoord,
    pub facing: Direction,
}

impl MonsterSpawn {
    /// Decode a monster marker byte (71-86) into a spawn at `tile`.
    pub fn from_visual_id(id: u8, tile: TileCoord) -> Option<Self> {
        if !(71..=86).contains(&id) {
            return None;
        }
        let offset = id - 71;
        let kind = match offset / 4 {
            0 => ActorKind::Furryman,
            1 => ActorKind::GrenadeMonster,
            2 => ActorKind::Slime,
            _ => ActorKind::Alien,
        };
        let facing = match offset % 4 {
            0 => Direction::Right,
            1 => Direction::Left,
            2 => Direction::Up,
            _ => Direction::Down,
        };
        Some(Self { kind, tile, facing })
    }
}

/// Tiles plus initial monster and pickup placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` long.
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub monsters: Vec<MonsterSpawn>,
    #[serde(default)]
    pub pickups: Vec<Pickup>,
}

impl MapData {
    /// All-empty map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::empty(); (width * height) as usize],
            monsters: Vec::new(),
            pickups: Vec::new(),
        }
    }

    /// Open arena ringed with concrete.
    pub fn bordered(width: u32, height: u32) -> Self {
        let mut map = Self::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if x == 0 || y == 0 || x == width as i32 - 1 || y == height as i32 - 1 {
                    map.set_tile(IVec2::new(x, y), Tile::concrete());
                }
            }
        }
        map
    }

    pub fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    pub fn set_tile(&mut self, tile: TileCoord, value: Tile) -> bool {
        if !self.in_bounds(tile) {
            return false;
        }
        let index = tile.y as usize * self.width as usize + tile.x as usize;
        self.tiles[index] = value;
        true
    }

    /// Default player spawn tiles: one tile in from each corner.
    pub fn spawn_corners(&self) -> [TileCoord; 4] {
        let right = self.width as i32 - 2;
        let bottom = self.height as i32 - 2;
        [
            IVec2::new(1, 1),
            IVec2::new(right, 1),
            IVec2::new(1, bottom),
            IVec2::new(right, bottom),
        ]
    }
}

/// Player to add to a running arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    /// Spawn tile. Defaults to the next free arena corner.
    #[serde(default)]
    pub spawn: Option<TileCoord>,
    #[serde(default)]
    pub facing: Direction,
    #[serde(default)]
    pub inventory: Vec<(BombKind, u32)>,
}

impl PlayerSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spawn: None,
            facing: Direction::default(),
            inventory: Vec::new(),
        }
    }

    pub fn at(mut self, tile: TileCoord) -> Self {
        self.spawn = Some(tile);
        self
    }

    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_bombs(mut self, kind: BombKind, count: u32) -> Self {
        self.inventory.push((kind, count));
        self
    }
}
