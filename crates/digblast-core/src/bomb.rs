//! Bomb kinds and planted bomb data.

use serde::{Deserialize, Serialize};

use crate::enums::{BombState, Direction, ExplosionShape, TileType};
use crate::types::{ActorId, TileCoord};

/// Every bomb variant the simulation knows, including internal ones that
/// are only ever spawned by other explosions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BombKind {
    SmallBomb,
    BigBomb,
    Dynamite,
    Nuke,
    SmallCrossBomb,
    BigCrossBomb,
    SmallRemote,
    BigRemote,
    Landmine,
    C4,
    Urethane,
    /// Internal: detonation of a struck C4 tile.
    C4Tile,
    FlameBarrel,
    CrackerBarrel,
    DiggerBomb,
    Bioslime,
    MetalPlate,
    Teleport,
    Flamethrower,
    FireExtinguisher,
    Grasshopper,
    /// Internal: follow-up jump of a grasshopper.
    GrasshopperHop,
}

/// When a freshly planted bomb goes off on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fuse {
    /// Seconds after placement.
    After(f64),
    /// Only by remote, proximity, or another explosion.
    Never,
}

impl Fuse {
    pub fn seconds(self) -> Option<f64> {
        match self {
            Fuse::After(secs) => Some(secs),
            Fuse::Never => None,
        }
    }
}

/// What resolving a bomb's explode event does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombEffect {
    /// Uniform damage over the bomb's pattern mask.
    Blast,
    /// Flood-fill empty floor with the given material.
    Convert(TileType),
    /// Flood-fill damage over open floor.
    FloodBurn,
    /// Short flood burn plus scattered delayed blasts.
    Cracker,
    /// Large pattern that only damages bedrock.
    BedrockBlast,
    /// Put a single tile on the bomb's cell if it is empty.
    Place(TileType),
    /// Damage over a cone in the planter's facing direction.
    FlameCone,
    /// Defuse bombs in a cone in the planter's facing direction.
    ExtinguishCone,
}

impl BombKind {
    /// Kinds a player may carry and plant, in default inventory order.
    pub const PLANTABLE: [BombKind; 20] = [
        BombKind::SmallBomb,
        BombKind::BigBomb,
        BombKind::Dynamite,
        BombKind::C4,
        BombKind::Landmine,
        BombKind::SmallRemote,
        BombKind::BigRemote,
        BombKind::Urethane,
        BombKind::SmallCrossBomb,
        BombKind::BigCrossBomb,
        BombKind::Nuke,
        BombKind::FlameBarrel,
        BombKind::CrackerBarrel,
        BombKind::DiggerBomb,
        BombKind::Bioslime,
        BombKind::MetalPlate,
        BombKind::Teleport,
        BombKind::Flamethrower,
        BombKind::FireExtinguisher,
        BombKind::Grasshopper,
    ];

    pub fn fuse(self) -> Fuse {
        match self {
            BombKind::SmallBomb => Fuse::After(2.0),
            BombKind::BigBomb => Fuse::After(3.0),
            BombKind::Dynamite => Fuse::After(3.0),
            BombKind::Nuke => Fuse::After(6.0),
            BombKind::SmallCrossBomb => Fuse::After(3.0),
            BombKind::BigCrossBomb => Fuse::After(4.0),
            BombKind::C4 | BombKind::Urethane => Fuse::After(4.0),
            BombKind::C4Tile => Fuse::After(0.0),
            BombKind::DiggerBomb => Fuse::After(3.0),
            BombKind::Bioslime | BombKind::MetalPlate | BombKind::Teleport => Fuse::After(1.0),
            BombKind::Flamethrower | BombKind::FireExtinguisher => Fuse::After(0.0),
            BombKind::Grasshopper => Fuse::After(3.0),
            // Hops always carry a rolled fuse.
            BombKind::GrasshopperHop => Fuse::After(0.5),
            BombKind::SmallRemote
            | BombKind::BigRemote
            | BombKind::Landmine
            | BombKind::FlameBarrel
            | BombKind::CrackerBarrel => Fuse::Never,
        }
    }

    /// Default explosion shape, if the kind has an area shape at all.
    pub fn shape(self) -> Option<ExplosionShape> {
        match self {
            BombKind::SmallBomb
            | BombKind::SmallRemote
            | BombKind::Landmine
            | BombKind::Grasshopper
            | BombKind::GrasshopperHop => Some(ExplosionShape::Small),
            BombKind::BigBomb | BombKind::BigRemote | BombKind::C4Tile => {
                Some(ExplosionShape::Medium)
            }
            BombKind::Dynamite | BombKind::DiggerBomb => Some(ExplosionShape::Large),
            BombKind::Nuke => Some(ExplosionShape::Nuke),
            BombKind::SmallCrossBomb => Some(ExplosionShape::SmallCross),
            BombKind::BigCrossBomb => Some(ExplosionShape::BigCross),
            BombKind::Flamethrower | BombKind::FireExtinguisher => {
                Some(ExplosionShape::DirectedFlame)
            }
            BombKind::C4
            | BombKind::Urethane
            | BombKind::FlameBarrel
            | BombKind::CrackerBarrel
            | BombKind::Bioslime
            | BombKind::MetalPlate
            | BombKind::Teleport => None,
        }
    }

    pub fn effect(self) -> BombEffect {
        match self {
            BombKind::C4 => BombEffect::Convert(TileType::C4),
            BombKind::Urethane => BombEffect::Convert(TileType::Urethane),
            BombKind::FlameBarrel => BombEffect::FloodBurn,
            BombKind::CrackerBarrel => BombEffect::Cracker,
            BombKind::DiggerBomb => BombEffect::BedrockBlast,
            BombKind::Bioslime => BombEffect::Place(TileType::Bioslime),
            BombKind::MetalPlate => BombEffect::Place(TileType::Concrete),
            BombKind::Teleport => BombEffect::Place(TileType::Tunnel),
            BombKind::Flamethrower => BombEffect::FlameCone,
            BombKind::FireExtinguisher => BombEffect::ExtinguishCone,
            _ => BombEffect::Blast,
        }
    }

    pub fn is_remote(self) -> bool {
        matches!(self, BombKind::SmallRemote | BombKind::BigRemote)
    }

    pub fn is_grasshopper(self) -> bool {
        matches!(self, BombKind::Grasshopper | BombKind::GrasshopperHop)
    }

    /// Kinds that aim along the planter's facing direction.
    pub fn is_directed(self) -> bool {
        matches!(self, BombKind::Flamethrower | BombKind::FireExtinguisher)
    }
}

/// A bomb lying on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub kind: BombKind,
    pub owner: Option<ActorId>,
    pub tile: TileCoord,
    pub fuse: Fuse,
    /// Simulation clock reading at placement (seconds).
    pub placed_at: f64,
    pub shape: Option<ExplosionShape>,
    pub state: BombState,
    /// Aim of directed kinds.
    pub direction: Direction,
    /// Explosions so far in a grasshopper chain.
    pub hop_count: u32,
    /// Spawned by another explosion (C4 chain, cracker scatter). Other
    /// explosions neither trigger nor defuse it.
    #[serde(default)]
    pub secondary: bool,
}

impl Bomb {
    pub fn new(kind: BombKind, tile: TileCoord, owner: Option<ActorId>, placed_at: f64) -> Self {
        Self {
            kind,
            owner,
            tile,
            fuse: kind.fuse(),
            placed_at,
            shape: kind.shape(),
            state: BombState::Active,
            direction: Direction::default(),
            hop_count: 0,
            secondary: false,
        }
    }

    pub fn with_shape(mut self, shape: ExplosionShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_fuse(mut self, fuse: Fuse) -> Self {
        self.fuse = fuse;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn as_secondary(mut self) -> Self {
        self.secondary = true;
        self
    }

    /// Whether explosions and extinguishers can act on this bomb.
    pub fn triggerable(&self) -> bool {
        !self.secondary
    }

    /// Absolute time of the automatic explosion, if any.
    pub fn trigger_at(&self) -> Option<f64> {
        self.fuse.seconds().map(|secs| self.placed_at + secs)
    }
}
