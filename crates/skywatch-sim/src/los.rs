//! Line-of-sight against a field of spherical occluders.
//!
//! Uses stepped ray traversal: the segment between weapon and target is
//! sampled every `LOS_SAMPLE_INTERVAL` meters and each sample is tested
//! against every obstacle sphere.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use skywatch_core::constants::LOS_SAMPLE_INTERVAL;
use skywatch_radar::Blip;
use skywatch_targeting::{LineOfSight, WeaponContext};

/// A solid sphere that blocks line of sight (hill, building, wreck).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub centre: DVec3,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(centre: DVec3, radius: f64) -> Self {
        Self { centre, radius }
    }

    fn contains(&self, point: DVec3) -> bool {
        point.distance_squared(self.centre) < self.radius * self.radius
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Whether no obstacle intersects the segment from `from` to `to`.
    ///
    /// Endpoints are not tested, so a weapon or target sitting inside an
    /// obstacle is not blocked by that obstacle alone.
    pub fn is_clear(&self, from: DVec3, to: DVec3) -> bool {
        if self.obstacles.is_empty() {
            return true;
        }
        let delta = to - from;
        let length = delta.length();
        if length < LOS_SAMPLE_INTERVAL {
            return true;
        }

        let samples = ((length / LOS_SAMPLE_INTERVAL).ceil() as usize).max(2);
        for i in 1..samples {
            let t = i as f64 / samples as f64;
            let point = from + delta * t;
            if self.obstacles.iter().any(|obstacle| obstacle.contains(point)) {
                return false;
            }
        }
        true
    }
}

impl LineOfSight for ObstacleField {
    fn has_line_of_sight(&self, weapon: &WeaponContext<'_>, target: &Blip) -> bool {
        self.is_clear(weapon.transform.position, target.position)
    }
}
