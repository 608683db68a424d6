//! Events emitted by the targeting system for UI and audio feedback.
//!
//! Pushed into a caller-owned buffer and drained once per tick.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityRef, SubComponentRef, WeaponId};
use crate::types::ItemKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TargetEvent {
    /// A weapon picked up a new target. Emitted once per acquisition.
    Acquired {
        weapon: WeaponId,
        key: ItemKey,
        entity: EntityRef,
        sub_component: Option<SubComponentRef>,
    },
    /// A weapon dropped its target.
    Cleared { weapon: WeaponId, key: ItemKey },
}

impl TargetEvent {
    pub fn weapon(&self) -> WeaponId {
        match self {
            TargetEvent::Acquired { weapon, .. } | TargetEvent::Cleared { weapon, .. } => *weapon,
        }
    }
}
