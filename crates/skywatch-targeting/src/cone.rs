//! Turret firing cone geometry.

use glam::DVec3;

use skywatch_core::config::FiringCone;
use skywatch_core::types::Transform;

/// Azimuth and altitude of `target` in the turret's local frame, in degrees.
///
/// Azimuth is `atan2(x, z)`: 0 dead ahead, positive toward `+x`. Altitude is
/// `atan(y / horizontal)`: positive above the turret's horizontal plane.
pub fn local_angles(turret: &Transform, target: DVec3) -> (f64, f64) {
    let local = turret.inverse_transform_point(target);
    let azimuth = local.x.atan2(local.z).to_degrees();
    let horizontal = (local.x * local.x + local.z * local.z).sqrt();
    let altitude = if horizontal > 0.0 {
        (local.y / horizontal).atan().to_degrees()
    } else if local.y > 0.0 {
        90.0
    } else if local.y < 0.0 {
        -90.0
    } else {
        0.0
    };
    (azimuth, altitude)
}

pub fn in_firing_cone(cone: &FiringCone, turret: &Transform, target: DVec3) -> bool {
    let (azimuth, altitude) = local_angles(turret, target);
    (cone.min_azimuth..=cone.max_azimuth).contains(&azimuth)
        && (cone.min_altitude..=cone.max_altitude).contains(&altitude)
}
