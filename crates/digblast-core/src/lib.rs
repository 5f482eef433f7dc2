//! Core types and definitions for the digblast arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tiles, actor components, bombs, pickups, intents, render snapshots
//! and tuning constants. It has no dependency on the ECS or any runtime.

pub mod bomb;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod map;
pub mod pickup;
pub mod state;
pub mod tile;
pub mod types;

#[cfg(test)]
mod tests;
