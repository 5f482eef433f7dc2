//! Simulation engine for digblast.
//!
//! Owns the hecs ECS world, the tile grid and the event queue, resolves
//! due events (movement, digging, explosions), applies player intents,
//! and produces `RenderSnapshot`s for renderers.

pub mod action;
pub mod arena;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use action::SimAction;
pub use digblast_core as core;
pub use engine::{SimConfig, SimulationEngine};
