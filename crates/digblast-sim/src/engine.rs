//! Simulation engine: the authoritative game state.
//!
//! `SimulationEngine` owns the hecs ECS world, the arena and the event
//! queue, applies player intents, resolves due events against an
//! injectable clock, and produces `RenderSnapshot`s. It has no threads of
//! its own; `digblast-runtime` wraps it in the resolver loop.

use std::collections::HashMap;
use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use digblast_core::bomb::{Bomb, BombKind};
use digblast_core::commands::{IntentOutcome, PlayerIntent};
use digblast_core::components::{Inventory, Motion, Vitality};
use digblast_core::constants::*;
use digblast_core::enums::{ActorState, Direction, EventType};
use digblast_core::error::IntentError;
use digblast_core::map::{MapData, PlayerSpec};
use digblast_core::state::RenderSnapshot;
use digblast_core::tile::Tile;
use digblast_core::types::{ActorId, Position, TileCoord};
use digblast_events::{Clock, Event, EventId, EventQueue, SystemClock};
use digblast_terrain::TileGrid;

use crate::action::SimAction;
use crate::arena::Arena;
use crate::systems::{self, bombs, dispatch, movement, SimContext};
use crate::world_setup;

/// Configuration for a simulation. Every field has a default, so partial
/// JSON files deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Added to every movement wait so boundary checks land past the
    /// boundary.
    pub move_slack_secs: f64,
    pub dig_interval_secs: f64,
    /// Delay before bombs and C4 tiles caught in a blast go off.
    pub chain_delay_secs: f64,
    /// How close to a tile edge or centre counts as reaching it.
    pub crossing_tolerance: f64,
    /// Flood-fill reach of C4 and urethane conversion.
    pub conversion_fill_distance: u32,
    pub player_speed: f64,
    pub player_health: i32,
    /// Bombs given to players whose `PlayerSpec` carries none.
    pub starting_inventory: Vec<(BombKind, u32)>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            move_slack_secs: MOVE_SLACK_SECS,
            dig_interval_secs: DIG_INTERVAL_SECS,
            chain_delay_secs: CHAIN_DELAY_SECS,
            crossing_tolerance: CROSSING_TOLERANCE,
            conversion_fill_distance: CONVERSION_FILL_DISTANCE,
            player_speed: PLAYER_SPEED,
            player_health: PLAYER_HEALTH,
            starting_inventory: vec![
                (BombKind::SmallBomb, 50),
                (BombKind::BigBomb, 50),
                (BombKind::Dynamite, 20),
                (BombKind::Nuke, 5),
                (BombKind::SmallCrossBomb, 10),
                (BombKind::BigCrossBomb, 5),
                (BombKind::BigRemote, 20),
                (BombKind::Landmine, 20),
                (BombKind::C4, 10),
            ],
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    arena: Arena,
    queue: EventQueue<SimAction>,
    clock: Arc<dyn Clock>,
    rng: ChaCha8Rng,
    config: SimConfig,
    actors: HashMap<ActorId, Entity>,
    next_actor_id: u32,
    player_count: usize,
    spawn_points: [TileCoord; 4],
}

impl SimulationEngine {
    /// Create an engine on the system clock with an empty arena.
    pub fn new(config: SimConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create an engine reading time from `clock`.
    pub fn with_clock(config: SimConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            world: World::new(),
            arena: Arena::new(0, 0),
            queue: EventQueue::new(),
            clock,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            actors: HashMap::new(),
            next_actor_id: 0,
            player_count: 0,
            spawn_points: MapData::new(0, 0).spawn_corners(),
        }
    }

    /// Replace the arena with `map`, dropping every actor, bomb and
    /// pending event, then spawn the map's monsters.
    pub fn load_map(&mut self, map: &MapData) {
        self.world.clear();
        self.queue.clear();
        self.actors.clear();
        self.player_count = 0;
        self.arena = Arena::from_map(map);
        self.spawn_points = map.spawn_corners();

        for spawn in &map.monsters {
            let id = self.allocate_id();
            let entity =
                world_setup::spawn_monster(&mut self.world, id, spawn, self.config.player_speed);
            self.actors.insert(id, entity);
        }
        log::info!(
            "loaded {}x{} map with {} monsters and {} pickups",
            map.width,
            map.height,
            map.monsters.len(),
            map.pickups.len()
        );
    }

    /// Add a player. Without an explicit spawn the players fill the four
    /// arena corners in turn.
    pub fn add_player(&mut self, spec: PlayerSpec) -> ActorId {
        let id = self.allocate_id();
        let tile = spec
            .spawn
            .unwrap_or(self.spawn_points[self.player_count % self.spawn_points.len()]);
        let sprite_id = (self.player_count % 4) as u8 + 1;

        let entity =
            world_setup::spawn_player(&mut self.world, id, sprite_id, &spec, tile, &self.config);
        self.actors.insert(id, entity);
        self.player_count += 1;
        log::info!("player {:?} '{}' joined at {:?}", id, spec.name, tile);
        id
    }

    fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        id
    }

    fn context(&mut self) -> SimContext<'_> {
        SimContext {
            now: self.clock.now(),
            world: &mut self.world,
            arena: &mut self.arena,
            queue: &mut self.queue,
            rng: &mut self.rng,
            config: &self.config,
        }
    }

    // ---- Intents ----

    /// Apply one player intent.
    pub fn apply_intent(&mut self, intent: PlayerIntent) -> Result<IntentOutcome, IntentError> {
        match intent {
            PlayerIntent::SetDirection { actor, direction } => self.set_direction(actor, direction),
            PlayerIntent::PlantBomb { actor } => self.plant_bomb(actor),
            PlayerIntent::TriggerRemote { actor } => self.trigger_remote(actor),
            PlayerIntent::SelectNextBomb { actor } => self.select_next_bomb(actor),
        }
    }

    /// Turn and start walking or digging. A blocked way ahead still turns
    /// the actor but leaves it idle.
    pub fn set_direction(
        &mut self,
        actor: ActorId,
        direction: Direction,
    ) -> Result<IntentOutcome, IntentError> {
        let entity = self.live_actor(actor)?;
        let mut ctx = self.context();
        let state = movement::set_direction(&mut ctx, entity, direction);
        log::debug!("actor {:?} turned {:?}: {:?}", actor, direction, state);
        Ok(IntentOutcome::Turned { state })
    }

    /// Plant the selected bomb on the actor's tile.
    pub fn plant_bomb(&mut self, actor: ActorId) -> Result<IntentOutcome, IntentError> {
        let entity = self.live_actor(actor)?;
        let mut ctx = self.context();
        let kind = bombs::plant(&mut ctx, entity, actor)?;
        Ok(IntentOutcome::Planted { kind })
    }

    /// Detonate all of the actor's remote bombs now.
    pub fn trigger_remote(&mut self, actor: ActorId) -> Result<IntentOutcome, IntentError> {
        self.live_actor(actor)?;
        let mut ctx = self.context();
        let count = bombs::detonate_remotes(&mut ctx, actor);
        log::debug!("actor {:?} triggered {} remotes", actor, count);
        Ok(IntentOutcome::Detonated { count })
    }

    /// Cycle the actor's selected inventory slot.
    pub fn select_next_bomb(&mut self, actor: ActorId) -> Result<IntentOutcome, IntentError> {
        let entity = self.live_actor(actor)?;
        let mut inventory = self
            .world
            .get::<&mut Inventory>(entity)
            .map_err(|_| IntentError::CannotPlant(actor))?;
        Ok(IntentOutcome::Selected {
            kind: inventory.select_next(),
        })
    }

    fn live_actor(&self, actor: ActorId) -> Result<Entity, IntentError> {
        let entity = self
            .actor_entity(actor)
            .ok_or(IntentError::UnknownActor(actor))?;
        let dead = self
            .world
            .get::<&Motion>(entity)
            .map_or(true, |motion| motion.is_dead());
        if dead {
            return Err(IntentError::ActorDead(actor));
        }
        Ok(entity)
    }

    // ---- Events ----

    /// Current clock reading.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn schedule(&mut self, event: Event<SimAction>) -> EventId {
        self.queue.add(event)
    }

    pub fn cancel(&mut self, id: EventId) -> bool {
        self.queue.cancel(id)
    }

    pub fn cancel_all(&mut self, creator: ActorId, tag: Option<EventType>) -> usize {
        self.queue.cancel_all(creator, tag)
    }

    /// Fire every live event of `creator` (optionally of one type)
    /// immediately, without continuation. Returns how many fired.
    pub fn resolve_now(&mut self, creator: ActorId, tag: Option<EventType>) -> usize {
        let mut ctx = self.context();
        dispatch::settle(&mut ctx, creator, tag)
    }

    /// Fire every event that is due, earliest first. Returns how many
    /// fired.
    pub fn dispatch_due(&mut self) -> usize {
        let mut ctx = self.context();
        dispatch::run_due(&mut ctx)
    }

    pub fn next_trigger_time(&mut self) -> Option<f64> {
        self.queue.next_trigger_time()
    }

    pub fn queue(&self) -> &EventQueue<SimAction> {
        &self.queue
    }

    /// Place a bomb directly, scheduling its fuse. Scripted setups use
    /// this; players plant through intents.
    pub fn place_bomb(&mut self, bomb: Bomb) -> Entity {
        let mut ctx = self.context();
        bombs::place_bomb(&mut ctx, bomb)
    }

    // ---- State access ----

    /// Build a render snapshot. Explosion flashes are handed out once and
    /// then cleared.
    pub fn snapshot(&mut self) -> RenderSnapshot {
        let flashes = self.arena.take_flashes();
        systems::snapshot::build_snapshot(&self.world, &self.arena, flashes, self.clock.now())
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn grid(&self) -> &TileGrid {
        &self.arena.grid
    }

    /// Overwrite one tile. Returns `false` outside the grid.
    pub fn set_tile(&mut self, tile: TileCoord, value: Tile) -> bool {
        self.arena.grid.set(tile, value)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn actor_entity(&self, actor: ActorId) -> Option<Entity> {
        self.actors.get(&actor).copied()
    }

    pub fn position_of(&self, actor: ActorId) -> Option<Position> {
        let entity = self.actor_entity(actor)?;
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn state_of(&self, actor: ActorId) -> Option<ActorState> {
        let entity = self.actor_entity(actor)?;
        self.world.get::<&Motion>(entity).ok().map(|m| m.state)
    }

    pub fn health_of(&self, actor: ActorId) -> Option<i32> {
        let entity = self.actor_entity(actor)?;
        self.world.get::<&Vitality>(entity).ok().map(|v| v.health)
    }

    /// Bombs currently on the grid.
    pub fn bombs(&self) -> Vec<(Entity, Bomb)> {
        self.world
            .query::<&Bomb>()
            .iter()
            .map(|(entity, bomb)| (entity, bomb.clone()))
            .collect()
    }
}
