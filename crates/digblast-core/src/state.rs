//! Render snapshot: the complete visible state handed to renderers.

use serde::{Deserialize, Serialize};

use crate::bomb::BombKind;
use crate::enums::*;
use crate::pickup::Pickup;
use crate::types::{ActorId, Position, TileCoord};

/// Immutable view of the arena at one instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Simulation clock reading when the snapshot was taken (seconds).
    pub time: f64,
    pub width: u32,
    pub height: u32,
    /// Row-major tile visual ids.
    pub tiles: Vec<u8>,
    /// Row-major explosion flashes since the previous snapshot.
    pub flashes: Vec<u8>,
    pub players: Vec<ActorView>,
    pub monsters: Vec<ActorView>,
    pub pickups: Vec<Pickup>,
    pub bombs: Vec<BombView>,
}

impl RenderSnapshot {
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn tile_id(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).and_then(|i| self.tiles.get(i).copied())
    }

    pub fn flash(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).and_then(|i| self.flashes.get(i).copied())
    }

    pub fn player(&self, id: ActorId) -> Option<&ActorView> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// A player or monster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub kind: ActorKind,
    pub name: String,
    pub sprite_id: u8,
    pub position: Position,
    pub facing: Direction,
    pub state: ActorState,
    pub health: i32,
    pub money: u32,
    pub dig_power: i32,
    pub selected_bomb: Option<BombKind>,
}

/// A bomb lying on the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BombView {
    pub kind: BombKind,
    pub owner: Option<ActorId>,
    pub tile: TileCoord,
    pub state: BombState,
    pub placed_at: f64,
}
