//! Terrain system for digblast.
//!
//! The mutable tile grid plus the area computations that explosions and
//! terrain-mutation bombs are built from: bounded flood fill, pattern
//! masks and directional cones.

pub use digblast_core as core;

pub mod cone;
pub mod flood;
pub mod grid;
pub mod mask;
pub mod pattern;

// Re-export key types for convenience.
pub use cone::cone_area;
pub use flood::flood_fill;
pub use grid::TileGrid;
pub use mask::TileMask;
pub use pattern::{calculate_damage, DamageMap};
