//! Boolean per-tile masks.

use glam::IVec2;

use digblast_core::types::TileCoord;

/// Row-major boolean grid the same size as the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl TileMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
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

    /// Out-of-bounds tiles read as unset.
    pub fn get(&self, tile: TileCoord) -> bool {
        self.index(tile).is_some_and(|i| self.cells[i])
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, tile: TileCoord, value: bool) {
        if let Some(i) = self.index(tile) {
            self.cells[i] = value;
        }
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|c| *c)
    }

    /// Set tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(i, _)| IVec2::new((i % width) as i32, (i / width) as i32))
    }

    /// Cells set in both masks.
    pub fn intersect(&self, other: &TileMask) -> TileMask {
        let mut out = TileMask::new(self.width, self.height);
        for tile in self.iter() {
            if other.get(tile) {
                out.set(tile, true);
            }
        }
        out
    }
}
