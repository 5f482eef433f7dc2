//! Enumeration types used throughout the simulation.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Cardinal facing / travel direction. Screen coordinates: +y points down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit tile offset for one step in this direction.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Whether travel in this direction increases the moving coordinate.
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Terrain material of a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    #[default]
    Empty,
    Bedrock,
    Dirt,
    Concrete,
    Urethane,
    Bioslime,
    /// Chain-reactive material left behind by C4 bombs.
    C4,
    Boulder,
    Bricks,
    Switch,
    SecurityDoor,
    Tunnel,
}

impl TileType {
    /// Types that ignore all incoming damage.
    pub fn is_indestructible(self) -> bool {
        matches!(
            self,
            TileType::Concrete | TileType::SecurityDoor | TileType::Switch
        )
    }
}

/// Kind of dynamic actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    #[default]
    Player,
    Furryman,
    Slime,
    Alien,
    GrenadeMonster,
}

impl ActorKind {
    /// Damage dealt to every other live actor sharing a tile.
    pub fn fight_power(self) -> i32 {
        match self {
            ActorKind::Player => crate::constants::PLAYER_FIGHT_POWER,
            ActorKind::Furryman => 10,
            ActorKind::Slime => 2,
            ActorKind::Alien => 20,
            ActorKind::GrenadeMonster => 10,
        }
    }
}

/// Animation / behaviour state of an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorState {
    #[default]
    Idle,
    Walk,
    Dig,
    /// Terminal. Dead actors never move, dig or fight again.
    Dead,
}

/// Area shape of an explosion. Also passed to tile damage so that
/// materials can react to specific blast types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplosionShape {
    Small,
    Medium,
    Large,
    Nuke,
    SmallCross,
    BigCross,
    /// Undirected flame. Reserved: has no area computation.
    Flame,
    /// Cone in the planter's facing direction.
    DirectedFlame,
}

impl ExplosionShape {
    /// Dirt takes double damage from these blasts.
    pub fn is_basic_blast(self) -> bool {
        matches!(
            self,
            ExplosionShape::Small | ExplosionShape::Medium | ExplosionShape::Large
        )
    }
}

/// Lifecycle of a planted bomb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BombState {
    #[default]
    Active,
    /// Extinguished: its explosion is pushed a day into the future.
    Defused,
}

/// What a scheduled event does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Explode,
    Move,
    Dig,
}
