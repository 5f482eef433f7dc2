//! Simulation constants and tuning parameters.

// --- Timing ---

/// Extra time added to every movement event so threshold crossings land
/// past the boundary rather than just short of it (seconds).
pub const MOVE_SLACK_SECS: f64 = 0.01;

/// Delay between consecutive dig strikes (seconds).
pub const DIG_INTERVAL_SECS: f64 = 0.1;

/// Delay before a chain-reaction or area-triggered explosion fires (seconds).
pub const CHAIN_DELAY_SECS: f64 = 1.0 / 60.0;

/// Fuse pushed onto defused bombs: effectively never (24 hours).
pub const DEFUSE_DELAY_SECS: f64 = 24.0 * 60.0 * 60.0;

// --- Movement ---

/// Distance tolerance when classifying tile-edge and tile-centre crossings.
pub const CROSSING_TOLERANCE: f64 = 0.05;

/// Fractional part above which a coordinate counts as the next tile.
pub const TILE_SNAP_THRESHOLD: f64 = 0.99;

// --- Actors ---

pub const PLAYER_SPEED: f64 = 3.0;
pub const PLAYER_HEALTH: i32 = 100;
pub const PLAYER_FIGHT_POWER: i32 = 20;
pub const MONSTER_HEALTH: i32 = 100;

/// Dig damage dealt per strike before tool bonuses.
pub const BASE_DIG_POWER: i32 = 10;

// --- Tiles ---

pub const DEFAULT_TILE_HEALTH: i32 = 100;
pub const LIGHT_ROCK_HEALTH: i32 = 25;
pub const HEAVY_ROCK_HEALTH: i32 = 50;
pub const BEDROCK_CORNER_HEALTH: i32 = 60;
pub const URETHANE_HEALTH: i32 = 200;
pub const C4_TILE_HEALTH: i32 = 100;

/// Health at or below which bedrock and bricks show their damaged sprite.
pub const DAMAGED_VISUAL_THRESHOLD: i32 = 50;
/// Health at or below which bedrock and bricks show their broken sprite.
pub const BROKEN_VISUAL_THRESHOLD: i32 = 25;

// --- Explosions ---

/// Damage every pattern explosion deals to each affected tile.
pub const PATTERN_DAMAGE: u8 = 51;

/// Flood-fill reach of C4 and urethane conversion bombs (tiles).
pub const CONVERSION_FILL_DISTANCE: u32 = 8;

pub const FLAME_BARREL_DISTANCE: u32 = 4;
pub const FLAME_BARREL_DAMAGE: i32 = 60;

pub const CRACKER_FILL_DISTANCE: u32 = 2;
pub const CRACKER_FILL_DAMAGE: i32 = 40;
pub const CRACKER_SCATTER_COUNT: u32 = 6;
pub const CRACKER_SCATTER_DISTANCE: i32 = 4;
pub const CRACKER_SCATTER_INTERVAL_SECS: f64 = 1.0 / 60.0;

pub const FLAMETHROWER_DISTANCE: u32 = 6;
pub const FLAMETHROWER_DAMAGE: i32 = 40;
pub const EXTINGUISHER_DISTANCE: u32 = 6;

pub const GRASSHOPPER_MAX_HOPS: u32 = 13;
pub const GRASSHOPPER_HOP_DISTANCE: i32 = 3;
pub const GRASSHOPPER_FUSE_MIN_SECS: f64 = 0.3;
pub const GRASSHOPPER_FUSE_MAX_SECS: f64 = 0.8;
pub const GRASSHOPPER_SHRINK_CHANCE: f64 = 0.3;
pub const GRASSHOPPER_STAY_CHANCE: f64 = 0.4;

// --- Render ---

/// Explosion-flash cell values in the render snapshot.
pub const FLASH_NONE: u8 = 0;
pub const FLASH_BLAST: u8 = 1;

// --- Visual ids (sprite sheet indices) ---

pub const EMPTY_TILE_ID: u8 = 48;
pub const CONCRETE_TILE_ID: u8 = 49;
pub const DIRT_TILE_ID: u8 = 50;
pub const BEDROCK_TILE_ID: u8 = 67;
pub const BOULDER_TILE_ID: u8 = 66;
pub const SECURITY_DOOR_TILE_ID: u8 = 108;
pub const BIOSLIME_TILE_ID: u8 = 111;
pub const HEAVY_ROCK_TILE_ID: u8 = 112;
pub const LIGHT_ROCK_TILE_ID: u8 = 113;
pub const URETHANE_TILE_ID: u8 = 155;
pub const TUNNEL_TILE_ID: u8 = 156;
pub const C4_TILE_ID: u8 = 157;
pub const BRICKS_TILE_ID: u8 = 172;
pub const BRICKS_DAMAGED_TILE_ID: u8 = 173;
pub const BRICKS_BROKEN_TILE_ID: u8 = 174;
pub const SWITCH_TILE_ID: u8 = 180;

pub const BEDROCK_TILE_IDS: [u8; 8] = [55, 56, 57, 65, 67, 68, 69, 70];
pub const BEDROCK_CORNER_TILE_IDS: [u8; 4] = [55, 56, 57, 65];
pub const DIRT_TILE_IDS: [u8; 5] = [50, 51, 52, 53, 54];
