//! Broadcast system: pushes every entity's latest state into the registry.
//!
//! Owners write, scopes read. An entity whose key no longer resolves (its
//! slot was released) is skipped rather than writing into someone else's slot.

use hecs::World;

use skywatch_core::types::Transform;
use skywatch_radar::{EntryUpdate, ItemRegistry};

use crate::components::{DamageRegions, Motion, RadarIdentity, RadarTrack};

pub fn run(world: &World, registry: &mut ItemRegistry) {
    for (_entity, (transform, identity, track, motion, regions)) in world
        .query::<(
            &Transform,
            &RadarIdentity,
            &RadarTrack,
            Option<&Motion>,
            Option<&DamageRegions>,
        )>()
        .iter()
    {
        let velocity = motion.map(|m| m.velocity).unwrap_or_default();
        let update = EntryUpdate {
            position: transform.position,
            velocity,
            visible: identity.visible,
            faction: identity.faction,
            squadron: identity.squadron,
        };
        if registry.contains_key(track.key) {
            registry.update(track.key.index, &update);
        }

        let Some(regions) = regions else {
            continue;
        };
        for region in &regions.regions {
            let Some(key) = region.key.filter(|key| registry.contains_key(*key)) else {
                continue;
            };
            registry.update(
                key.index,
                &EntryUpdate {
                    position: transform.transform_point(region.offset),
                    ..update
                },
            );
        }
    }
}
