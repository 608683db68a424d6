//! Kinematic integration system.
//!
//! position += velocity * dt, and the heading turns by yaw_rate * dt.

use glam::DQuat;
use hecs::World;

use skywatch_core::constants::DT;
use skywatch_core::types::Transform;

use crate::components::Motion;

/// Run kinematic integration for all entities with Transform + Motion.
pub fn run(world: &mut World) {
    for (_entity, (transform, motion)) in world.query_mut::<(&mut Transform, &Motion)>() {
        transform.position += motion.velocity * DT;
        if motion.yaw_rate != 0.0 {
            let turn = DQuat::from_rotation_y(motion.yaw_rate * DT);
            transform.rotation = (turn * transform.rotation).normalize();
        }
    }
}
