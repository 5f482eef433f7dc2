//! Explosion pattern masks and the uniform damage they produce.
//!
//! Masks are square, odd-sized and centred on the bomb. They are built
//! once on first use and shared.

use std::sync::OnceLock;

use glam::IVec2;

use digblast_core::constants::PATTERN_DAMAGE;
use digblast_core::enums::ExplosionShape;
use digblast_core::types::TileCoord;

use crate::mask::TileMask;

/// Arm length of the small cross pattern (tiles from centre).
pub const SMALL_CROSS_ARM: i32 = 3;
/// Arm length of the big cross pattern.
pub const BIG_CROSS_ARM: i32 = 6;

/// Precomputed square boolean pattern.
#[derive(Debug, Clone)]
pub struct PatternMask {
    size: i32,
    cells: Vec<bool>,
}

impl PatternMask {
    /// Disc of the given diameter: cells strictly closer than
    /// `diameter / 2` to the centre cell.
    pub fn circular(diameter: i32) -> Self {
        let radius = diameter as f64 / 2.0;
        let center = diameter / 2;
        let mut cells = Vec::with_capacity((diameter * diameter) as usize);
        for y in 0..diameter {
            for x in 0..diameter {
                let dx = (x - center) as f64;
                let dy = (y - center) as f64;
                cells.push((dx * dx + dy * dy).sqrt() < radius);
            }
        }
        Self {
            size: diameter,
            cells,
        }
    }

    /// Plus sign with arms of `arm` tiles.
    pub fn cross(arm: i32) -> Self {
        let size = arm * 2 + 1;
        let mut cells = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                cells.push(x == arm || y == arm);
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn radius(&self) -> i32 {
        self.size / 2
    }

    /// Whether the offset from the centre is part of the pattern.
    pub fn contains(&self, offset: IVec2) -> bool {
        let r = self.radius();
        let (x, y) = (offset.x + r, offset.y + r);
        if x < 0 || y < 0 || x >= self.size || y >= self.size {
            return false;
        }
        self.cells[(y * self.size + x) as usize]
    }
}

struct PatternTable {
    small: PatternMask,
    medium: PatternMask,
    large: PatternMask,
    nuke: PatternMask,
    small_cross: PatternMask,
    big_cross: PatternMask,
}

fn table() -> &'static PatternTable {
    static TABLE: OnceLock<PatternTable> = OnceLock::new();
    TABLE.get_or_init(|| PatternTable {
        small: PatternMask::circular(3),
        medium: PatternMask::circular(5),
        large: PatternMask::circular(7),
        nuke: PatternMask::circular(25),
        small_cross: PatternMask::cross(SMALL_CROSS_ARM),
        big_cross: PatternMask::cross(BIG_CROSS_ARM),
    })
}

/// Mask for a pattern shape. Flame shapes have none.
pub fn pattern_for(shape: ExplosionShape) -> Option<&'static PatternMask> {
    let t = table();
    match shape {
        ExplosionShape::Small => Some(&t.small),
        ExplosionShape::Medium => Some(&t.medium),
        ExplosionShape::Large => Some(&t.large),
        ExplosionShape::Nuke => Some(&t.nuke),
        ExplosionShape::SmallCross => Some(&t.small_cross),
        ExplosionShape::BigCross => Some(&t.big_cross),
        ExplosionShape::Flame | ExplosionShape::DirectedFlame => None,
    }
}

/// Per-tile damage values, row-major, 0 = untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageMap {
    width: u32,
    height: u32,
    values: Vec<u8>,
}

impl DamageMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0; (width * height) as usize],
        }
    }

    pub fn get(&self, tile: TileCoord) -> u8 {
        if tile.x < 0 || tile.y < 0 || tile.x as u32 >= self.width || tile.y as u32 >= self.height {
            return 0;
        }
        self.values[tile.y as usize * self.width as usize + tile.x as usize]
    }

    /// Damaged tiles with their damage, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, u8)> + '_ {
        let width = self.width as usize;
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0)
            .map(move |(i, v)| (IVec2::new((i % width) as i32, (i / width) as i32), *v))
    }

    pub fn to_mask(&self) -> TileMask {
        let mut mask = TileMask::new(self.width, self.height);
        for (tile, _) in self.iter() {
            mask.set(tile, true);
        }
        mask
    }
}

/// Stamp `shape` centred on `origin`, clipped to a `width` x `height`
/// grid. Returns `None` for shapes without a pattern.
pub fn calculate_damage(
    shape: ExplosionShape,
    origin: TileCoord,
    width: u32,
    height: u32,
) -> Option<DamageMap> {
    let pattern = pattern_for(shape)?;
    let mut damage = DamageMap::new(width, height);
    let r = pattern.radius();

    let x0 = (origin.x - r).max(0);
    let y0 = (origin.y - r).max(0);
    let x1 = (origin.x + r).min(width as i32 - 1);
    let y1 = (origin.y + r).min(height as i32 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            if pattern.contains(IVec2::new(x, y) - origin) {
                damage.values[y as usize * width as usize + x as usize] = PATTERN_DAMAGE;
            }
        }
    }
    Some(damage)
}
