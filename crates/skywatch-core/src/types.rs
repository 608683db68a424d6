//! Fundamental geometric and simulation types.
//!
//! World space follows a y-up convention: `x` and `z` span the horizontal
//! plane, `y` is altitude. Forward is `+z`, up is `+y`.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of a carrier, turret or object in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            rotation: DQuat::IDENTITY,
        }
    }

    /// Transform rotated `yaw` radians about `+y` (positive yaw turns `+z` toward `+x`).
    pub fn from_position_yaw(position: DVec3, yaw: f64) -> Self {
        Self {
            position,
            rotation: DQuat::from_rotation_y(yaw),
        }
    }

    /// Unit forward direction (`+z` rotated into world space).
    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    /// Unit up direction (`+y` rotated into world space).
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// Map a world-space point into this transform's local space.
    pub fn inverse_transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation.inverse() * (point - self.position)
    }

    /// Map a local-space point into world space.
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.rotation * local
    }

    /// Compose a child transform expressed in this transform's local space.
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            position: self.transform_point(local.position),
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }
}

/// Handle to a registry slot: index plus the generation it was claimed with.
///
/// A key is only valid while the slot is claimed and still carries the same
/// generation. Holding a key across ticks is safe; resolving it after the
/// slot was reused yields nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub index: usize,
    pub generation: u32,
}

impl ItemKey {
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
