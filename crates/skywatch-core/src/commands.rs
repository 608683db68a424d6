//! Commands sent to the simulation from outside the tick loop.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityRef, WeaponId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RadarCommand {
    /// Show or hide an entity on every radar scope.
    SetVisibility { entity: EntityRef, visible: bool },
    /// Move an entity to another faction.
    SetFaction { entity: EntityRef, faction: i32 },
    /// Move an entity to another squadron (`-1` clears it).
    SetSquadron { entity: EntityRef, squadron: i32 },
    /// Report whether a weapon's seeker currently holds a lock.
    SetWeaponLock { weapon: WeaponId, locked: bool },
    /// Arm or disarm a weapon.
    SetWeaponArmed { weapon: WeaponId, armed: bool },
    /// Remove an entity from the world and every radar scope.
    Despawn { entity: EntityRef },
}
