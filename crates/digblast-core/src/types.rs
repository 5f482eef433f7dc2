//! Fundamental geometric and identity types.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constants::TILE_SNAP_THRESHOLD;
use crate::enums::Direction;

/// Integer tile coordinate (x = column, y = row).
pub type TileCoord = IVec2;

/// Stable identity of an actor. Used as the creator id on events and in
/// render snapshots, independent of ECS entity handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Continuous actor position in tile units. Tile (x, y) spans
/// `[x, x + 1) x [y, y + 1)` and its centre is at `(x + 0.5, y + 0.5)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Centre of the given tile.
    pub fn tile_center(tile: TileCoord) -> Self {
        Self::new(tile.x as f64 + 0.5, tile.y as f64 + 0.5)
    }

    /// Tile this position belongs to. A coordinate within 0.01 below the
    /// next integer already counts as the next tile.
    pub fn tile(&self) -> TileCoord {
        IVec2::new(snap_axis(self.x), snap_axis(self.y))
    }

    /// The coordinate that changes when moving in `dir`.
    pub fn along(&self, dir: Direction) -> f64 {
        if dir.is_horizontal() {
            self.x
        } else {
            self.y
        }
    }

    /// Move `distance` tiles in `dir`.
    pub fn advance(&mut self, dir: Direction, distance: f64) {
        let signed = if dir.is_positive() { distance } else { -distance };
        if dir.is_horizontal() {
            self.x += signed;
        } else {
            self.y += signed;
        }
    }

    /// Round both components to the nearest half tile.
    pub fn quantize(&mut self) {
        self.x = (self.x * 2.0).round() / 2.0;
        self.y = (self.y * 2.0).round() / 2.0;
    }

    /// Snap the coordinate perpendicular to `dir` onto the lane centre.
    pub fn center_lane(&mut self, dir: Direction) {
        if dir.is_horizontal() {
            self.y = self.y.floor() + 0.5;
        } else {
            self.x = self.x.floor() + 0.5;
        }
    }
}

fn snap_axis(v: f64) -> i32 {
    let base = v.floor();
    if v - base >= TILE_SNAP_THRESHOLD {
        base as i32 + 1
    } else {
        base as i32
    }
}
