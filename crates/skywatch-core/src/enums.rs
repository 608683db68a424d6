//! Enumeration types used throughout the radar and targeting stack.

use serde::{Deserialize, Serialize};

/// What kind of object a registry entry (and its blips) stands for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlipCategory {
    /// AI-controlled unit on patrol.
    PatrolUnit,
    /// Unit controlled by a player.
    PlayerUnit,
    /// Fixed location marker (station, waypoint, objective).
    StaticLocation,
    /// Anything else worth showing on the scope.
    #[default]
    GenericObject,
    /// Damage region on a carrier, resolved through its content hash.
    SubComponent,
}

/// Result ordering for a radar query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Registry order, no sort.
    #[default]
    None,
    DistanceAsc2D,
    DistanceDesc2D,
    DistanceAsc3D,
    DistanceDesc3D,
}

/// How a weapon is attached to its carrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MountType {
    /// Shares the carrier's aim direction. Targets are picked by best score
    /// across all fixed weapons on the carrier.
    #[default]
    Fixed,
    /// Rotates independently inside a firing cone. Targets are picked by
    /// first match in query order.
    Turret,
}

/// Per-weapon acquisition state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingState {
    /// Weapon disarmed; updates are skipped.
    Unarmed,
    /// No target assigned.
    #[default]
    NoTarget,
    /// Target assigned but line of sight or lock is currently missing.
    Evaluating,
    /// Target assigned and every requirement satisfied.
    Locked,
}
