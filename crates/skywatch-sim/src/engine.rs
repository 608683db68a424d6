//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world and the item registry,
//! processes queued commands, runs all systems, and produces `SimSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use skywatch_core::commands::RadarCommand;
use skywatch_core::config::{RadarConfig, TargetingConfig};
use skywatch_core::entity::{EntityRef, WeaponId};
use skywatch_core::error::ConfigError;
use skywatch_core::events::TargetEvent;
use skywatch_core::state::SimSnapshot;
use skywatch_core::types::{SimTime, Transform};
use skywatch_radar::ItemRegistry;

use crate::components::{entity_of, Despawned, Hardpoint, Hardpoints, Motion, RadarIdentity};
use crate::los::{Obstacle, ObstacleField};
use crate::systems;
use crate::world_setup::{self, CarrierSpec};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Patrol units spawned by `setup_scenario`.
    pub patrol_count: usize,
    pub radar: RadarConfig,
    pub targeting: TargetingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            patrol_count: 8,
            radar: RadarConfig::default(),
            targeting: TargetingConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        if let Err(err) = config.validate() {
            warn!(%err, "rejected simulation config");
            return Err(err);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radar.validate()?;
        self.targeting.validate()
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    registry: ItemRegistry,
    obstacles: ObstacleField,
    config: SimConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<RadarCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<TargetEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        info!(seed = config.seed, "simulation engine started");
        Self {
            world: World::new(),
            registry: ItemRegistry::new(&config.radar),
            obstacles: ObstacleField::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Spawn the default scenario and return the player's carrier.
    pub fn setup_scenario(&mut self) -> Entity {
        world_setup::setup_scenario(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            self.config.patrol_count,
        )
    }

    pub fn spawn_player_carrier(&mut self) -> Entity {
        world_setup::spawn_player_carrier(&mut self.world, &mut self.registry)
    }

    pub fn spawn_carrier(&mut self, spec: &CarrierSpec) -> Entity {
        world_setup::spawn_carrier(&mut self.world, &mut self.registry, spec)
    }

    pub fn spawn_location(&mut self, position: DVec3, content_hash: u64) -> Entity {
        world_setup::spawn_location(&mut self.world, &mut self.registry, position, content_hash)
    }

    pub fn spawn_object(
        &mut self,
        identity: RadarIdentity,
        transform: Transform,
        motion: Motion,
    ) -> Entity {
        world_setup::spawn_object(&mut self.world, &mut self.registry, identity, transform, motion)
    }

    pub fn spawn_patrol_wave(&mut self, count: usize) -> Vec<Entity> {
        world_setup::spawn_patrol_wave(&mut self.world, &mut self.registry, &mut self.rng, count)
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: RadarCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = RadarCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.registry, &self.time, events)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Commands naming an entity that no longer exists are dropped.
    fn handle_command(&mut self, command: RadarCommand) {
        match command {
            RadarCommand::SetVisibility { entity, visible } => {
                self.with_identity(entity, |identity| identity.visible = visible);
            }
            RadarCommand::SetFaction { entity, faction } => {
                self.with_identity(entity, |identity| identity.faction = faction);
            }
            RadarCommand::SetSquadron { entity, squadron } => {
                self.with_identity(entity, |identity| identity.squadron = squadron);
            }
            RadarCommand::SetWeaponLock { weapon, locked } => {
                self.with_hardpoint(weapon, |hardpoint| hardpoint.locked = locked);
            }
            RadarCommand::SetWeaponArmed { weapon, armed } => {
                self.with_hardpoint(weapon, |hardpoint| hardpoint.armed = armed);
            }
            RadarCommand::Despawn { entity } => {
                let inserted = entity_of(entity)
                    .is_some_and(|id| self.world.insert_one(id, Despawned).is_ok());
                if !inserted {
                    debug!(?entity, "despawn for unknown entity ignored");
                }
            }
        }
    }

    fn with_identity(&mut self, entity: EntityRef, apply: impl FnOnce(&mut RadarIdentity)) {
        let Some(id) = entity_of(entity) else {
            return;
        };
        match self.world.query_one_mut::<&mut RadarIdentity>(id) {
            Ok(identity) => apply(identity),
            Err(_) => debug!(?entity, "command for unknown entity ignored"),
        }
    }

    fn with_hardpoint(&mut self, weapon: WeaponId, apply: impl FnOnce(&mut Hardpoint)) {
        let Some(id) = entity_of(weapon.carrier) else {
            return;
        };
        let hardpoint = self
            .world
            .query_one_mut::<&mut Hardpoints>(id)
            .ok()
            .and_then(|hardpoints| hardpoints.weapons.get_mut(weapon.slot as usize));
        match hardpoint {
            Some(hardpoint) => apply(hardpoint),
            None => debug!(?weapon, "command for unknown weapon ignored"),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Movement integration
        systems::movement::run(&mut self.world);
        // 2. Broadcast entity state into the registry
        systems::broadcast::run(&self.world, &mut self.registry);
        // 3. Radar scopes
        systems::scan::run(&mut self.world, &self.registry);
        // 4. Target acquisition
        systems::targeting::run(
            &self.world,
            &self.obstacles,
            &self.config.targeting,
            &mut self.events,
        );
        // 5. Cleanup (despawned, out of bounds)
        systems::cleanup::run(&mut self.world, &mut self.registry, &mut self.despawn_buffer);
    }
}
