//! Snapshot views: the read-only state handed to presentation each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::entity::{EntityRef, WeaponId};
use crate::enums::{BlipCategory, TargetingState};
use crate::events::TargetEvent;
use crate::types::{ItemKey, SimTime};

/// Complete simulation state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    /// Number of claimed registry slots.
    pub tracked_items: usize,
    pub scopes: Vec<ScopeView>,
    pub weapons: Vec<WeaponView>,
    pub events: Vec<TargetEvent>,
}

/// One carrier's radar scope, as drawn by a minimap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeView {
    pub owner: EntityRef,
    pub centre: DVec3,
    pub range: f64,
    pub result_count: usize,
    pub blips: Vec<BlipView>,
}

/// A blip relative to its scope centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlipView {
    pub key: ItemKey,
    pub category: BlipCategory,
    /// Offset from the scope centre (world axes).
    pub offset: DVec3,
    /// Straight-line distance from the scope centre (meters).
    pub distance: f64,
    pub faction: i32,
    pub squadron: i32,
    pub size: u8,
    pub entity: EntityRef,
}

/// Acquisition status of a weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub weapon: WeaponId,
    pub state: TargetingState,
    pub target: Option<ItemKey>,
    pub invalid_secs: f64,
    pub assigned_secs: f64,
}
