//! Desirability scoring for fixed-mount target selection.

use glam::DVec3;

use skywatch_core::constants::*;
use skywatch_core::types::Transform;

/// Score a candidate at `target` as seen from `from`.
///
/// Candidates behind (or level with) the forward plane score
/// `SCORE_INVALID`. Otherwise the score is the cosine of the off-axis angle
/// scaled to `SCORE_MAX`, divided by `SCORE_DISTANCE_FALLOFF` once per decade
/// of distance beyond `SCORE_REFERENCE_DISTANCE`.
pub fn desirability(from: &Transform, target: DVec3) -> f64 {
    let to_target = target - from.position;
    let along = from.forward().dot(to_target);
    if along <= 0.0 {
        return SCORE_INVALID;
    }
    let distance = to_target.length();
    let decades = (distance / SCORE_REFERENCE_DISTANCE).log10().max(0.0);
    SCORE_MAX * (along / distance) / SCORE_DISTANCE_FALLOFF.powf(decades)
}
