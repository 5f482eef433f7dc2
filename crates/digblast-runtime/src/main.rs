//! Headless digblast: runs a scripted two-player round on the resolver
//! thread and logs what happens.
//!
//! Usage: `digblast-headless [config.json]`. The optional file holds a
//! partial `SimConfig`; missing fields keep their defaults.

use std::error::Error;
use std::time::Duration;

use glam::IVec2;

use digblast_core::commands::PlayerIntent;
use digblast_core::constants::FLASH_NONE;
use digblast_core::enums::{Direction, TileType};
use digblast_core::map::{MapData, PlayerSpec};
use digblast_core::pickup::{Pickup, PickupKind, ToolKind, TreasureKind};
use digblast_core::state::RenderSnapshot;
use digblast_core::tile::Tile;
use digblast_runtime::{EventResolver, ResolverHandle};
use digblast_sim::{SimConfig, SimulationEngine};

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn load_config(path: &str) -> Result<SimConfig, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Concrete-ringed arena with a dirt pillar on every even tile and a few
/// pickups in the open rows.
fn demo_map() -> MapData {
    let (width, height) = (21, 15);
    let mut map = MapData::bordered(width, height);
    for y in (2..height as i32 - 1).step_by(2) {
        for x in (2..width as i32 - 1).step_by(2) {
            map.set_tile(IVec2::new(x, y), Tile::new(TileType::Dirt));
        }
    }
    map.set_tile(IVec2::new(10, 7), Tile::c4());
    map.pickups.push(Pickup {
        tile: IVec2::new(5, 1),
        kind: PickupKind::Treasure(TreasureKind::Ruby),
    });
    map.pickups.push(Pickup {
        tile: IVec2::new(15, 1),
        kind: PickupKind::Tool(ToolKind::Drill),
    });
    map
}

fn log_summary(snapshot: &RenderSnapshot) {
    let flashed = snapshot.flashes.iter().filter(|f| **f != FLASH_NONE).count();
    log::info!(
        "t={:.2}s bombs={} flashed={} pickups={}",
        snapshot.time,
        snapshot.bombs.len(),
        flashed,
        snapshot.pickups.len()
    );
    for player in &snapshot.players {
        log::info!(
            "  {} at ({:.1}, {:.1}) {:?} hp={} money={} dig={}",
            player.name,
            player.position.x,
            player.position.y,
            player.state,
            player.health,
            player.money,
            player.dig_power
        );
    }
}

fn play(handle: &ResolverHandle, pause_ms: u64, intent: PlayerIntent) -> Result<(), Box<dyn Error>> {
    std::thread::sleep(Duration::from_millis(pause_ms));
    match handle.request(intent.clone())? {
        Ok(outcome) => log::info!("{:?} -> {:?}", intent, outcome),
        Err(e) => log::warn!("{:?} refused: {}", intent, e),
    }
    log_summary(&handle.snapshot()?);
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {path}");
            load_config(&path)?
        }
        None => SimConfig::default(),
    };

    let mut engine = SimulationEngine::new(config);
    engine.load_map(&demo_map());
    let red = engine.add_player(PlayerSpec::new("red"));
    let blue = engine.add_player(PlayerSpec::new("blue"));

    let handle = EventResolver::spawn(engine)?;
    handle.start()?;

    let turn = |actor, direction| PlayerIntent::SetDirection { actor, direction };
    play(&handle, 0, turn(red, Direction::Right))?;
    play(&handle, 0, turn(blue, Direction::Left))?;
    play(&handle, 600, PlayerIntent::PlantBomb { actor: red })?;
    play(&handle, 100, turn(red, Direction::Down))?;
    play(&handle, 800, PlayerIntent::SelectNextBomb { actor: blue })?;
    play(&handle, 0, PlayerIntent::PlantBomb { actor: blue })?;
    play(&handle, 200, turn(blue, Direction::Down))?;

    for _ in 0..4 {
        std::thread::sleep(Duration::from_secs(1));
        log_summary(&handle.snapshot()?);
    }

    handle.stop()?;
    handle.shutdown()?;
    Ok(())
}
