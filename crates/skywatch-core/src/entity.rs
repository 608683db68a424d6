//! Opaque references to objects owned by the simulation layer.
//!
//! The registry stores and returns these but never dereferences them.

use serde::{Deserialize, Serialize};

/// Back-reference from a registry entry to whatever owns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    /// No owner (free-standing marker).
    #[default]
    None,
    /// A carrier: ship, vehicle or battery able to mount weapons.
    Carrier(u64),
    /// Any other world object (location marker, debris, pickup).
    Object(u64),
}

impl EntityRef {
    pub fn is_none(&self) -> bool {
        matches!(self, EntityRef::None)
    }

    /// Raw simulation-layer id, if any.
    pub fn bits(&self) -> Option<u64> {
        match self {
            EntityRef::None => None,
            EntityRef::Carrier(bits) | EntityRef::Object(bits) => Some(*bits),
        }
    }
}

/// A damage region on a carrier, resolved from a sub-component blip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubComponentRef {
    pub carrier: EntityRef,
    pub content_hash: u64,
    /// Region index within the carrier's damage model.
    pub region: u32,
}

/// Identifies one weapon hardpoint on a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponId {
    pub carrier: EntityRef,
    pub slot: u16,
}

impl WeaponId {
    pub fn new(carrier: EntityRef, slot: u16) -> Self {
        Self { carrier, slot }
    }
}
