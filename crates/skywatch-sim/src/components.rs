//! ECS components for carriers and world objects.
//!
//! The world `Transform` is itself a component (from `skywatch_core`).
//! Everything here is plain data; systems do the work.

use glam::DVec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use skywatch_core::config::WeaponProfile;
use skywatch_core::entity::EntityRef;
use skywatch_core::enums::BlipCategory;
use skywatch_core::types::{ItemKey, Transform};
use skywatch_targeting::WeaponTargeting;

/// Marker: the entity can mount weapons and owns a radar scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct Carrier;

/// Marker: the entity is removed (and unregistered) at the end of the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Despawned;

/// World-frame velocity plus a turn rate about `+y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub velocity: DVec3,
    /// Radians per second.
    pub yaw_rate: f64,
}

/// How the entity appears on radar. Broadcast into the registry every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarIdentity {
    pub category: BlipCategory,
    pub faction: i32,
    pub squadron: i32,
    pub visible: bool,
    pub blip_size: u8,
    pub content_hash: u64,
}

/// The registry slot this entity broadcasts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarTrack {
    pub key: ItemKey,
}

/// One weapon mounted on a carrier.
#[derive(Debug, Clone)]
pub struct Hardpoint {
    pub profile: WeaponProfile,
    /// Mount transform relative to the carrier.
    pub local: Transform,
    pub armed: bool,
    pub locked: bool,
    pub targeting: WeaponTargeting,
}

impl Hardpoint {
    pub fn new(profile: WeaponProfile, local: Transform) -> Self {
        Self {
            profile,
            local,
            armed: true,
            locked: false,
            targeting: WeaponTargeting::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Hardpoints {
    pub weapons: Vec<Hardpoint>,
}

/// A targetable region of a carrier's damage model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRegion {
    pub content_hash: u64,
    pub region: u32,
    /// Offset from the carrier origin, in carrier space.
    pub offset: DVec3,
    /// Registry slot the region broadcasts into as a sub-component blip.
    pub key: Option<ItemKey>,
}

#[derive(Debug, Clone, Default)]
pub struct DamageRegions {
    pub regions: Vec<DamageRegion>,
}

impl DamageRegions {
    pub fn find(&self, content_hash: u64) -> Option<&DamageRegion> {
        self.regions
            .iter()
            .find(|region| region.content_hash == content_hash)
    }
}

/// Back-reference for a carrier entity.
pub fn carrier_ref(entity: Entity) -> EntityRef {
    EntityRef::Carrier(entity.to_bits().get())
}

/// Back-reference for a non-carrier entity.
pub fn object_ref(entity: Entity) -> EntityRef {
    EntityRef::Object(entity.to_bits().get())
}

/// Resolve a back-reference into a hecs entity id. The entity may no longer exist.
pub fn entity_of(entity: EntityRef) -> Option<Entity> {
    entity.bits().and_then(Entity::from_bits)
}
