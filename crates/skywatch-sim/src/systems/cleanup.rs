//! Cleanup system: unregisters and removes despawned or out-of-bounds entities.

use hecs::{Entity, World};
use tracing::debug;

use skywatch_core::constants::WORLD_RADIUS;
use skywatch_core::types::{ItemKey, Transform};
use skywatch_radar::ItemRegistry;

use crate::components::{DamageRegions, Despawned, RadarTrack};

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, registry: &mut ItemRegistry, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let radius_sq = WORLD_RADIUS * WORLD_RADIUS;
    for (entity, transform) in world.query_mut::<&Transform>() {
        let p = transform.position;
        if p.x * p.x + p.z * p.z > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    for (entity, _) in world.query_mut::<&Despawned>() {
        if !despawn_buffer.contains(&entity) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Ok(track) = world.get::<&RadarTrack>(entity) {
            release(registry, track.key);
        }
        if let Ok(regions) = world.get::<&DamageRegions>(entity) {
            for key in regions.regions.iter().filter_map(|region| region.key) {
                release(registry, key);
            }
        }
        debug!(?entity, "entity despawned");
        let _ = world.despawn(entity);
    }
}

/// Release a slot only if it still belongs to the key's holder.
fn release(registry: &mut ItemRegistry, key: ItemKey) {
    if registry.contains_key(key) {
        registry.remove(key.index);
    }
}
