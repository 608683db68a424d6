//! Tunable configuration for the registry, radar scopes and weapons.
//!
//! Every struct deserializes with defaults for missing fields, so a config
//! file only needs to name what it overrides. Call `validate` after loading.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::MountType;
use crate::error::ConfigError;

/// Slot pool sizing for an item registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Slots allocated up front.
    pub initial_capacity: usize,
    /// Slots added whenever the pool is full.
    pub grow_by: usize,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_POOL_CAPACITY,
            grow_by: DEFAULT_POOL_GROWTH,
        }
    }
}

impl RadarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grow_by == 0 {
            return Err(ConfigError::invalid("grow_by", "must be at least 1"));
        }
        Ok(())
    }
}

/// Angular bounds, in degrees, within which a turret can aim.
///
/// Azimuth is measured in the turret's horizontal plane from `+z` toward `+x`;
/// altitude is the elevation above that plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiringCone {
    pub min_azimuth: f64,
    pub max_azimuth: f64,
    pub min_altitude: f64,
    pub max_altitude: f64,
}

impl Default for FiringCone {
    fn default() -> Self {
        Self {
            min_azimuth: -180.0,
            max_azimuth: 180.0,
            min_altitude: -90.0,
            max_altitude: 90.0,
        }
    }
}

impl FiringCone {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_azimuth > self.max_azimuth {
            return Err(ConfigError::invalid(
                "firing_cone.azimuth",
                format!("min {} exceeds max {}", self.min_azimuth, self.max_azimuth),
            ));
        }
        if self.min_altitude > self.max_altitude {
            return Err(ConfigError::invalid(
                "firing_cone.altitude",
                format!("min {} exceeds max {}", self.min_altitude, self.max_altitude),
            ));
        }
        Ok(())
    }
}

/// Static description of one weapon hardpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponProfile {
    pub mount: MountType,
    /// Estimated effective range (meters). Targets beyond it are dropped.
    pub range: f64,
    /// Only consulted for turret mounts.
    pub firing_cone: FiringCone,
    pub require_line_of_sight: bool,
    /// Turrets must hold a lock to keep a target; fixed mounts are exempt.
    pub require_lock: bool,
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self {
            mount: MountType::Fixed,
            range: DEFAULT_WEAPON_RANGE,
            firing_cone: FiringCone::default(),
            require_line_of_sight: false,
            require_lock: false,
        }
    }
}

impl WeaponProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.range > 0.0) || !self.range.is_finite() {
            return Err(ConfigError::invalid(
                "range",
                format!("must be positive and finite, got {}", self.range),
            ));
        }
        self.firing_cone.validate()
    }
}

/// Acquisition timing shared by every weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Seconds without line of sight / lock before a target is dropped.
    pub target_lost_secs: f64,
    /// When set, a target held this long is re-evaluated.
    pub reassign_interval_secs: Option<f64>,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            target_lost_secs: DEFAULT_TARGET_LOST_SECS,
            reassign_interval_secs: None,
        }
    }
}

impl TargetingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_lost_secs < 0.0 {
            return Err(ConfigError::invalid(
                "target_lost_secs",
                format!("must not be negative, got {}", self.target_lost_secs),
            ));
        }
        if let Some(interval) = self.reassign_interval_secs {
            if !(interval > 0.0) {
                return Err(ConfigError::invalid(
                    "reassign_interval_secs",
                    format!("must be positive, got {interval}"),
                ));
            }
        }
        Ok(())
    }
}
