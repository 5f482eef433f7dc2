//! TileGrid: the mutable arena of tiles.

use glam::IVec2;

use digblast_core::enums::{Direction, TileType};
use digblast_core::map::MapData;
use digblast_core::tile::Tile;
use digblast_core::types::TileCoord;

use crate::mask::TileMask;

/// Fixed-size row-major tile array. Every accessor is bounds checked and
/// treats out-of-range coordinates as absent.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// All-empty grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::empty(); (width * height) as usize],
        }
    }

    /// Build from loader output. Missing cells are padded with empty floor.
    pub fn from_map(map: &MapData) -> Self {
        let len = (map.width * map.height) as usize;
        let mut tiles: Vec<Tile> = map.tiles.iter().take(len).cloned().collect();
        tiles.resize(len, Tile::empty());
        Self {
            width: map.width,
            height: map.height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| tile.y as usize * self.width as usize + tile.x as usize)
    }

    pub fn get(&self, tile: TileCoord) -> Option<&Tile> {
        self.index(tile).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, tile: TileCoord) -> Option<&mut Tile> {
        self.index(tile).map(|i| &mut self.tiles[i])
    }

    /// Replace a tile. Returns false outside the grid.
    pub fn set(&mut self, tile: TileCoord, value: Tile) -> bool {
        match self.get_mut(tile) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Neighbour of `tile` one step in `dir`, if inside the grid.
    pub fn neighbor(&self, tile: TileCoord, dir: Direction) -> Option<&Tile> {
        self.get(tile + dir.offset())
    }

    pub fn neighbor_mut(&mut self, tile: TileCoord, dir: Direction) -> Option<&mut Tile> {
        self.get_mut(tile + dir.offset())
    }

    /// Non-solid tiles.
    pub fn walkable_mask(&self) -> TileMask {
        let mut mask = TileMask::new(self.width, self.height);
        for (i, tile) in self.tiles.iter().enumerate() {
            if !tile.solid {
                mask.set(self.coord(i), true);
            }
        }
        mask
    }

    /// Coordinates of every tile of the given type, row-major.
    pub fn positions_of(&self, tile_type: TileType) -> Vec<TileCoord> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.tile_type == tile_type)
            .map(|(i, _)| self.coord(i))
            .collect()
    }

    pub fn visual_ids(&self) -> Vec<u8> {
        self.tiles.iter().map(|t| t.visual_id).collect()
    }

    fn coord(&self, index: usize) -> TileCoord {
        let width = self.width as usize;
        IVec2::new((index % width) as i32, (index / width) as i32)
    }
}
