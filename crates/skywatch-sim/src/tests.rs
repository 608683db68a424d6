//! Tests for the simulation engine: broadcast, scopes, acquisition and commands.

use glam::DVec3;
use hecs::Entity;

use skywatch_core::commands::RadarCommand;
use skywatch_core::config::WeaponProfile;
use skywatch_core::constants::*;
use skywatch_core::entity::{EntityRef, SubComponentRef, WeaponId};
use skywatch_core::enums::{BlipCategory, MountType, TargetingState};
use skywatch_core::error::ConfigError;
use skywatch_core::events::TargetEvent;
use skywatch_core::state::{SimSnapshot, WeaponView};
use skywatch_core::types::{ItemKey, Transform};

use crate::components::{carrier_ref, object_ref, DamageRegions, Motion, RadarIdentity, RadarTrack};
use crate::engine::{SimConfig, SimulationEngine};
use crate::los::Obstacle;
use crate::world_setup::{CarrierSpec, PATROL_FACTION, PLAYER_FACTION};

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

fn spawn_player(engine: &mut SimulationEngine) -> Entity {
    engine.spawn_player_carrier()
}

fn spawn_turret_only(engine: &mut SimulationEngine, profile: WeaponProfile) -> Entity {
    engine.spawn_carrier(&CarrierSpec {
        faction: PLAYER_FACTION,
        weapons: vec![(profile, Transform::default())],
        ..Default::default()
    })
}

fn spawn_hostile(engine: &mut SimulationEngine, position: DVec3) -> Entity {
    engine.spawn_carrier(&CarrierSpec {
        transform: Transform::from_position(position),
        faction: PATROL_FACTION,
        ..Default::default()
    })
}

fn track_key(engine: &SimulationEngine, entity: Entity) -> ItemKey {
    engine.world().get::<&RadarTrack>(entity).unwrap().key
}

fn weapon_view(snapshot: &SimSnapshot, carrier: Entity, slot: u16) -> &WeaponView {
    let id = WeaponId::new(carrier_ref(carrier), slot);
    snapshot
        .weapons
        .iter()
        .find(|view| view.weapon == id)
        .expect("weapon missing from snapshot")
}

fn acquired_by(snapshot: &SimSnapshot, carrier: Entity) -> Vec<(u16, ItemKey)> {
    snapshot
        .events
        .iter()
        .filter_map(|event| match event {
            TargetEvent::Acquired { weapon, key, .. } if weapon.carrier == carrier_ref(carrier) => {
                Some((weapon.slot, *key))
            }
            _ => None,
        })
        .collect()
}

fn cleared_by(snapshot: &SimSnapshot, carrier: Entity) -> usize {
    snapshot
        .events
        .iter()
        .filter(|event| match event {
            TargetEvent::Cleared { weapon, .. } => weapon.carrier == carrier_ref(carrier),
            _ => false,
        })
        .count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);
    engine_a.setup_scenario();
    engine_b.setup_scenario();

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.setup_scenario();
    engine_b.setup_scenario();

    let mut diverged = false;
    for _ in 0..30 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

#[test]
fn test_scenario_registers_every_entity() {
    let mut engine = engine();
    engine.setup_scenario();
    let snapshot = engine.tick();

    // Player + 4 locations + one carrier entry and one region entry per patrol unit.
    let patrols = engine.config().patrol_count;
    assert_eq!(snapshot.tracked_items, 1 + 4 + patrols * 2);
    assert_eq!(snapshot.scopes.len(), 1 + patrols);
}

// ---- Broadcast and movement ----

#[test]
fn test_movement_is_broadcast_into_registry() {
    let mut engine = engine();
    let drifter = engine.spawn_object(
        RadarIdentity {
            category: BlipCategory::GenericObject,
            faction: FACTION_NEUTRAL,
            squadron: SQUADRON_UNSET,
            visible: true,
            blip_size: 1,
            content_hash: CONTENT_HASH_UNSET,
        },
        Transform::default(),
        Motion {
            velocity: DVec3::new(30.0, 0.0, 0.0),
            yaw_rate: 0.0,
        },
    );
    let key = track_key(&engine, drifter);

    for _ in 0..TICK_RATE {
        engine.tick();
    }

    let entry = engine.registry().resolve(key).unwrap();
    assert_eq!(entry.owner, object_ref(drifter));
    assert!((entry.position.x - 30.0).abs() < 1e-9, "x = {}", entry.position.x);
    assert_eq!(entry.velocity, DVec3::new(30.0, 0.0, 0.0));
}

#[test]
fn test_damage_regions_follow_carrier() {
    let mut engine = engine();
    let carrier = engine.spawn_carrier(&CarrierSpec {
        transform: Transform::from_position_yaw(
            DVec3::new(100.0, 0.0, 0.0),
            std::f64::consts::FRAC_PI_2,
        ),
        motion: Motion {
            velocity: DVec3::new(0.0, 0.0, 15.0),
            yaw_rate: 0.0,
        },
        regions: vec![(0xAB, 2, DVec3::new(0.0, 0.0, 10.0))],
        ..Default::default()
    });
    engine.tick();

    let region_key = {
        let regions = engine.world().get::<&DamageRegions>(carrier).unwrap();
        regions.regions[0].key.unwrap()
    };
    let carrier_pos = engine.registry().resolve(track_key(&engine, carrier)).unwrap().position;
    let region = engine.registry().resolve(region_key).unwrap();

    assert_eq!(region.category, BlipCategory::SubComponent);
    assert_eq!(region.content_hash, 0xAB);
    assert_eq!(region.owner, carrier_ref(carrier));
    // Carrier faces +x, so its local +z offset lands along world +x.
    assert!((region.position - (carrier_pos + DVec3::new(10.0, 0.0, 0.0))).length() < 1e-9);
}

// ---- Radar scopes ----

#[test]
fn test_scope_excludes_own_faction() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    let ally = engine.spawn_carrier(&CarrierSpec {
        transform: Transform::from_position(DVec3::new(0.0, 0.0, 300.0)),
        faction: PLAYER_FACTION,
        ..Default::default()
    });
    let hostile = spawn_hostile(&mut engine, DVec3::new(0.0, 0.0, 500.0));

    let snapshot = engine.tick();
    let scope = snapshot
        .scopes
        .iter()
        .find(|scope| scope.owner == carrier_ref(player))
        .unwrap();

    assert_eq!(scope.result_count, 1);
    assert_eq!(scope.blips[0].key, track_key(&engine, hostile));
    assert!(scope.blips.iter().all(|blip| blip.key != track_key(&engine, ally)));
    assert!((scope.blips[0].distance - 500.0).abs() < 1e-9);
}

#[test]
fn test_hidden_entity_drops_out_of_scope_and_target() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    let hostile = spawn_hostile(&mut engine, DVec3::new(0.0, 100.0, 600.0));
    let first = engine.tick();
    assert_eq!(acquired_by(&first, player).len(), 3);

    engine.queue_command(RadarCommand::SetVisibility {
        entity: carrier_ref(hostile),
        visible: false,
    });
    let snapshot = engine.tick();

    let scope = snapshot
        .scopes
        .iter()
        .find(|scope| scope.owner == carrier_ref(player))
        .unwrap();
    assert_eq!(scope.result_count, 0);
    assert_eq!(cleared_by(&snapshot, player), 3);
    assert_eq!(weapon_view(&snapshot, player, 0).state, TargetingState::NoTarget);
}

#[test]
fn test_faction_change_moves_entity_between_scopes() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    let other = spawn_hostile(&mut engine, DVec3::new(0.0, 0.0, 400.0));
    engine.tick();

    engine.queue_command(RadarCommand::SetFaction {
        entity: carrier_ref(other),
        faction: PLAYER_FACTION,
    });
    let snapshot = engine.tick();
    let scope = snapshot
        .scopes
        .iter()
        .find(|scope| scope.owner == carrier_ref(player))
        .unwrap();
    assert_eq!(scope.result_count, 0);
}

// ---- Acquisition ----

#[test]
fn test_player_weapons_acquire_hostile() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    let hostile = spawn_hostile(&mut engine, DVec3::new(0.0, 100.0, 600.0));
    let key = track_key(&engine, hostile);

    let snapshot = engine.tick();

    let mut acquired = acquired_by(&snapshot, player);
    acquired.sort_unstable_by_key(|(slot, _)| *slot);
    assert_eq!(acquired, vec![(0, key), (1, key), (2, key)]);
    for slot in 0..3 {
        let view = weapon_view(&snapshot, player, slot);
        assert_eq!(view.state, TargetingState::Locked);
        assert_eq!(view.target, Some(key));
    }

    // Held targets are not re-announced.
    let next = engine.tick();
    assert!(acquired_by(&next, player).is_empty());
}

#[test]
fn test_obstacle_blocks_turret_but_not_fixed_guns() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    spawn_hostile(&mut engine, DVec3::new(0.0, 100.0, 600.0));
    engine.add_obstacle(Obstacle::new(DVec3::new(0.0, 50.0, 300.0), 80.0));

    let snapshot = engine.tick();

    assert_eq!(weapon_view(&snapshot, player, 0).target, None);
    assert_eq!(weapon_view(&snapshot, player, 0).state, TargetingState::NoTarget);
    assert!(weapon_view(&snapshot, player, 1).target.is_some());
    assert!(weapon_view(&snapshot, player, 2).target.is_some());
}

#[test]
fn test_turret_resolves_sub_component() {
    let mut engine = engine();
    let player = spawn_turret_only(
        &mut engine,
        WeaponProfile {
            mount: MountType::Turret,
            range: 2_000.0,
            ..Default::default()
        },
    );
    let hostile = engine.spawn_carrier(&CarrierSpec {
        transform: Transform::from_position(DVec3::new(0.0, 0.0, 600.0)),
        faction: PATROL_FACTION,
        regions: vec![(0xBEEF, 7, DVec3::new(0.0, 0.0, -100.0))],
        ..Default::default()
    });

    let snapshot = engine.tick();

    let sub_component = snapshot.events.iter().find_map(|event| match event {
        TargetEvent::Acquired {
            weapon,
            sub_component,
            ..
        } if weapon.carrier == carrier_ref(player) => Some(*sub_component),
        _ => None,
    });
    assert_eq!(
        sub_component,
        Some(Some(SubComponentRef {
            carrier: carrier_ref(hostile),
            content_hash: 0xBEEF,
            region: 7,
        }))
    );
}

#[test]
fn test_weapon_lock_command() {
    let mut engine = engine();
    let player = spawn_turret_only(
        &mut engine,
        WeaponProfile {
            mount: MountType::Turret,
            require_lock: true,
            ..Default::default()
        },
    );
    spawn_hostile(&mut engine, DVec3::new(0.0, 0.0, 500.0));

    let snapshot = engine.tick();
    assert_eq!(weapon_view(&snapshot, player, 0).state, TargetingState::Evaluating);

    engine.queue_command(RadarCommand::SetWeaponLock {
        weapon: WeaponId::new(carrier_ref(player), 0),
        locked: true,
    });
    let snapshot = engine.tick();
    let view = weapon_view(&snapshot, player, 0);
    assert_eq!(view.state, TargetingState::Locked);
    assert_eq!(view.invalid_secs, 0.0);
}

#[test]
fn test_disarm_command() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    spawn_hostile(&mut engine, DVec3::new(0.0, 100.0, 600.0));
    engine.tick();

    engine.queue_command(RadarCommand::SetWeaponArmed {
        weapon: WeaponId::new(carrier_ref(player), 0),
        armed: false,
    });
    let snapshot = engine.tick();

    assert_eq!(weapon_view(&snapshot, player, 0).state, TargetingState::Unarmed);
    assert_eq!(weapon_view(&snapshot, player, 1).state, TargetingState::Locked);
}

// ---- Lifecycle ----

#[test]
fn test_despawn_unregisters_and_clears_targets() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    let hostile = spawn_hostile(&mut engine, DVec3::new(0.0, 100.0, 600.0));
    let key = track_key(&engine, hostile);
    engine.tick();

    engine.queue_command(RadarCommand::Despawn {
        entity: carrier_ref(hostile),
    });
    engine.tick();
    assert!(!engine.world().contains(hostile));
    assert!(!engine.registry().contains_key(key));

    let snapshot = engine.tick();
    assert_eq!(cleared_by(&snapshot, player), 3);
    assert_eq!(snapshot.tracked_items, 1);
}

#[test]
fn test_released_slot_is_reused_with_new_generation() {
    let mut engine = engine();
    let first = spawn_hostile(&mut engine, DVec3::new(0.0, 0.0, 100.0));
    let old_key = track_key(&engine, first);
    engine.queue_command(RadarCommand::Despawn {
        entity: carrier_ref(first),
    });
    engine.tick();

    let second = spawn_hostile(&mut engine, DVec3::new(0.0, 0.0, 200.0));
    let new_key = track_key(&engine, second);

    assert_eq!(new_key.index, old_key.index);
    assert_ne!(new_key.generation, old_key.generation);
    assert!(engine.registry().resolve(old_key).is_none());
}

#[test]
fn test_out_of_bounds_entities_removed() {
    let mut engine = engine();
    let runaway = engine.spawn_carrier(&CarrierSpec {
        transform: Transform::from_position(DVec3::new(WORLD_RADIUS - 1.0, 0.0, 0.0)),
        motion: Motion {
            velocity: DVec3::new(100.0, 0.0, 0.0),
            yaw_rate: 0.0,
        },
        ..Default::default()
    });
    engine.tick();

    assert!(!engine.world().contains(runaway));
    assert!(engine.registry().is_empty());
}

#[test]
fn test_commands_for_unknown_entities_ignored() {
    let mut engine = engine();
    let player = spawn_player(&mut engine);
    engine.queue_commands([
        RadarCommand::SetFaction {
            entity: EntityRef::None,
            faction: 3,
        },
        RadarCommand::SetVisibility {
            entity: EntityRef::Carrier(u64::MAX),
            visible: false,
        },
        RadarCommand::SetWeaponArmed {
            weapon: WeaponId::new(carrier_ref(player), 99),
            armed: false,
        },
        RadarCommand::Despawn {
            entity: EntityRef::None,
        },
    ]);
    engine.tick();

    assert!(engine.world().contains(player));
    assert_eq!(engine.registry().len(), 1);
}

// ---- Config ----

#[test]
fn test_config_from_json_partial() {
    let json = r#"{"seed": 7, "targeting": {"target_lost_secs": 1.5}}"#;
    let config = SimConfig::from_json(json).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.patrol_count, SimConfig::default().patrol_count);
    assert_eq!(config.targeting.target_lost_secs, 1.5);
    assert_eq!(config.radar.grow_by, DEFAULT_POOL_GROWTH);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    let err = SimConfig::from_json(r#"{"radar": {"grow_by": 0}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "grow_by", .. }));

    let err = SimConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
