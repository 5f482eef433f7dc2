//! Non-ECS arena state: tiles, pickups, explosion flashes and doors.

use digblast_core::constants::{FLASH_BLAST, FLASH_NONE};
use digblast_core::enums::TileType;
use digblast_core::map::MapData;
use digblast_core::pickup::{Pickup, PickupKind};
use digblast_core::tile::Tile;
use digblast_core::types::TileCoord;
use digblast_terrain::TileGrid;

/// Everything about the arena that is indexed by tile.
#[derive(Debug, Clone)]
pub struct Arena {
    pub grid: TileGrid,
    /// Sparse per-tile pickups, row-major.
    pickups: Vec<Option<PickupKind>>,
    /// Explosion flashes since the last snapshot, row-major.
    flashes: Vec<u8>,
    /// Security doors as loaded, restored when the switch closes them.
    doors: Vec<(TileCoord, Tile)>,
    doors_open: bool,
}

impl Arena {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_map(&MapData::new(width, height))
    }

    pub fn from_map(map: &MapData) -> Self {
        let grid = TileGrid::from_map(map);
        let cells = (grid.width() * grid.height()) as usize;
        let doors = grid
            .positions_of(TileType::SecurityDoor)
            .into_iter()
            .filter_map(|tile| grid.get(tile).map(|t| (tile, t.clone())))
            .collect();

        let mut arena = Self {
            grid,
            pickups: vec![None; cells],
            flashes: vec![FLASH_NONE; cells],
            doors,
            doors_open: false,
        };
        for pickup in &map.pickups {
            arena.put_pickup(pickup.tile, pickup.kind);
        }
        arena
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        self.grid
            .in_bounds(tile)
            .then(|| tile.y as usize * self.grid.width() as usize + tile.x as usize)
    }

    pub fn put_pickup(&mut self, tile: TileCoord, kind: PickupKind) -> bool {
        match self.index(tile) {
            Some(i) => {
                self.pickups[i] = Some(kind);
                true
            }
            None => false,
        }
    }

    pub fn pickup_at(&self, tile: TileCoord) -> Option<PickupKind> {
        self.index(tile).and_then(|i| self.pickups[i])
    }

    pub fn take_pickup(&mut self, tile: TileCoord) -> Option<PickupKind> {
        self.index(tile).and_then(|i| self.pickups[i].take())
    }

    /// Live pickups in row-major order.
    pub fn pickups(&self) -> Vec<Pickup> {
        let width = self.grid.width() as usize;
        self.pickups
            .iter()
            .enumerate()
            .filter_map(|(i, kind)| {
                kind.map(|kind| Pickup {
                    tile: TileCoord::new((i % width) as i32, (i / width) as i32),
                    kind,
                })
            })
            .collect()
    }

    pub fn flash(&mut self, tile: TileCoord) {
        if let Some(i) = self.index(tile) {
            self.flashes[i] = FLASH_BLAST;
        }
    }

    /// Hand out the flash array and reset it to none.
    pub fn take_flashes(&mut self) -> Vec<u8> {
        let fresh = vec![FLASH_NONE; self.flashes.len()];
        std::mem::replace(&mut self.flashes, fresh)
    }

    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    /// Open every security door, or restore them all if already open.
    pub fn toggle_doors(&mut self) {
        if self.doors_open {
            for (tile, door) in &self.doors {
                self.grid.set(*tile, door.clone());
            }
        } else {
            for (tile, _) in &self.doors {
                self.grid.set(*tile, Tile::empty());
            }
        }
        self.doors_open = !self.doors_open;
        log::debug!(
            "switch used: {} doors now {}",
            self.doors.len(),
            if self.doors_open { "open" } else { "closed" }
        );
    }
}
