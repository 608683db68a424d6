//! Entity spawn factories for setting up the simulation world.
//!
//! Every factory registers the new entity with the item registry
//! immediately, so it shows up on radar scopes from the next scan.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skywatch_core::config::{FiringCone, WeaponProfile};
use skywatch_core::constants::*;
use skywatch_core::entity::EntityRef;
use skywatch_core::enums::{BlipCategory, MountType, SortOrder};
use skywatch_core::types::Transform;
use skywatch_radar::{EntryUpdate, ItemRegistry, NewEntry, RadarQuery, RadarScope};

use crate::components::*;

/// Faction of the player's carrier in the default scenario.
pub const PLAYER_FACTION: i32 = 1;

/// Faction of patrol units in the default scenario.
pub const PATROL_FACTION: i32 = 2;

/// Everything needed to spawn a carrier.
#[derive(Debug, Clone)]
pub struct CarrierSpec {
    pub transform: Transform,
    pub motion: Motion,
    pub category: BlipCategory,
    pub faction: i32,
    pub squadron: i32,
    pub blip_size: u8,
    pub scan_range: f64,
    /// Weapon profile and mount transform relative to the carrier.
    pub weapons: Vec<(WeaponProfile, Transform)>,
    /// Damage regions: content hash, region index, carrier-space offset.
    pub regions: Vec<(u64, u32, DVec3)>,
}

impl Default for CarrierSpec {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            motion: Motion::default(),
            category: BlipCategory::PatrolUnit,
            faction: FACTION_NEUTRAL,
            squadron: SQUADRON_UNSET,
            blip_size: 2,
            scan_range: DEFAULT_SCAN_RANGE,
            weapons: Vec::new(),
            regions: Vec::new(),
        }
    }
}

/// Set up the default scenario: the player carrier, a ring of static
/// locations, and a seeded patrol wave.
pub fn setup_scenario(
    world: &mut World,
    registry: &mut ItemRegistry,
    rng: &mut ChaCha8Rng,
    patrol_count: usize,
) -> Entity {
    let player = spawn_player_carrier(world, registry);
    for i in 0..4u64 {
        let angle = i as f64 * std::f64::consts::FRAC_PI_2;
        let position = DVec3::new(angle.sin(), 0.0, angle.cos()) * 2_000.0;
        spawn_location(world, registry, position, 0x10C0_0000 + i);
    }
    spawn_patrol_wave(world, registry, rng, patrol_count);
    player
}

/// The player's carrier at the origin: one dorsal turret, two forward fixed guns.
pub fn spawn_player_carrier(world: &mut World, registry: &mut ItemRegistry) -> Entity {
    let turret = WeaponProfile {
        mount: MountType::Turret,
        range: 2_000.0,
        firing_cone: FiringCone {
            min_azimuth: -150.0,
            max_azimuth: 150.0,
            min_altitude: -5.0,
            max_altitude: 85.0,
        },
        require_line_of_sight: true,
        require_lock: false,
    };
    let fixed = WeaponProfile {
        mount: MountType::Fixed,
        range: DEFAULT_WEAPON_RANGE,
        ..Default::default()
    };

    spawn_carrier(
        world,
        registry,
        &CarrierSpec {
            category: BlipCategory::PlayerUnit,
            faction: PLAYER_FACTION,
            blip_size: 3,
            weapons: vec![
                (turret, Transform::from_position(DVec3::new(0.0, 4.0, 0.0))),
                (fixed, Transform::from_position(DVec3::new(-3.0, 0.0, 8.0))),
                (fixed, Transform::from_position(DVec3::new(3.0, 0.0, 8.0))),
            ],
            ..Default::default()
        },
    )
}

/// Spawn a carrier with its radar scope, hardpoints and damage regions.
pub fn spawn_carrier(world: &mut World, registry: &mut ItemRegistry, spec: &CarrierSpec) -> Entity {
    let identity = RadarIdentity {
        category: spec.category,
        faction: spec.faction,
        squadron: spec.squadron,
        visible: true,
        blip_size: spec.blip_size,
        content_hash: CONTENT_HASH_UNSET,
    };

    let hardpoints = Hardpoints {
        weapons: spec
            .weapons
            .iter()
            .map(|(profile, local)| Hardpoint::new(*profile, *local))
            .collect(),
    };

    let entity = world.spawn((Carrier, spec.transform, spec.motion, identity, hardpoints));
    let owner = carrier_ref(entity);

    let query = RadarQuery {
        factions_to_exclude: vec![spec.faction],
        ..RadarQuery::new(spec.transform.position, spec.scan_range).sorted(SortOrder::DistanceAsc3D)
    };
    let key = registry.add_keyed(new_entry(owner, &identity, &spec.transform, &spec.motion));

    let regions = DamageRegions {
        regions: spec
            .regions
            .iter()
            .map(|&(content_hash, region, offset)| {
                let sub = RadarIdentity {
                    category: BlipCategory::SubComponent,
                    blip_size: BLIP_SIZE_MIN,
                    content_hash,
                    ..identity
                };
                let at = Transform::from_position(spec.transform.transform_point(offset));
                DamageRegion {
                    content_hash,
                    region,
                    offset,
                    key: Some(registry.add_keyed(new_entry(owner, &sub, &at, &spec.motion))),
                }
            })
            .collect(),
    };

    // The entity was spawned just above, so these inserts cannot miss.
    let _ = world.insert(entity, (RadarTrack { key }, RadarScope::new(owner, query), regions));
    entity
}

/// A static location marker (objective, waypoint, base).
pub fn spawn_location(
    world: &mut World,
    registry: &mut ItemRegistry,
    position: DVec3,
    content_hash: u64,
) -> Entity {
    spawn_object(
        world,
        registry,
        RadarIdentity {
            category: BlipCategory::StaticLocation,
            faction: FACTION_NEUTRAL,
            squadron: SQUADRON_UNSET,
            visible: true,
            blip_size: 4,
            content_hash,
        },
        Transform::from_position(position),
        Motion::default(),
    )
}

/// Spawn a non-carrier object and register it.
pub fn spawn_object(
    world: &mut World,
    registry: &mut ItemRegistry,
    identity: RadarIdentity,
    transform: Transform,
    motion: Motion,
) -> Entity {
    let entity = world.spawn((transform, motion, identity));
    let key = registry.add_keyed(new_entry(object_ref(entity), &identity, &transform, &motion));
    let _ = world.insert_one(entity, RadarTrack { key });
    entity
}

/// Spawn `count` patrol carriers at random bearings, heading toward the origin.
/// Each carries a single forward fixed gun.
pub fn spawn_patrol_wave(
    world: &mut World,
    registry: &mut ItemRegistry,
    rng: &mut ChaCha8Rng,
    count: usize,
) -> Vec<Entity> {
    let gun = WeaponProfile {
        mount: MountType::Fixed,
        range: 800.0,
        ..Default::default()
    };

    (0..count)
        .map(|i| {
            let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let range: f64 = rng.gen_range(1_500.0..4_500.0);
            let altitude: f64 = rng.gen_range(50.0..400.0);
            let speed: f64 = rng.gen_range(40.0..90.0);

            let position = DVec3::new(range * bearing.sin(), altitude, range * bearing.cos());
            // Facing the origin: yaw is measured from +z toward +x.
            let heading = bearing + std::f64::consts::PI;
            let transform = Transform::from_position_yaw(position, heading);
            let velocity = transform.forward() * speed;

            spawn_carrier(
                world,
                registry,
                &CarrierSpec {
                    transform,
                    motion: Motion {
                        velocity,
                        yaw_rate: 0.0,
                    },
                    faction: PATROL_FACTION,
                    squadron: (i % 3) as i32,
                    weapons: vec![(gun, Transform::from_position(DVec3::new(0.0, 0.0, 2.0)))],
                    regions: vec![(0xE000_0000 + i as u64, 0, DVec3::new(0.0, 1.0, -4.0))],
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn new_entry(
    owner: EntityRef,
    identity: &RadarIdentity,
    transform: &Transform,
    motion: &Motion,
) -> NewEntry {
    NewEntry::new(
        identity.category,
        owner,
        EntryUpdate {
            position: transform.position,
            velocity: motion.velocity,
            visible: identity.visible,
            faction: identity.faction,
            squadron: identity.squadron,
        },
    )
    .with_content_hash(identity.content_hash)
    .with_blip_size(identity.blip_size)
}
