//! Targeting system: runs every carrier's weapons against its radar scope.
//!
//! Turret hardpoints update one by one; all fixed hardpoints on a carrier
//! update together so they share the best-scoring target.

use hecs::World;

use skywatch_core::config::TargetingConfig;
use skywatch_core::constants::DT;
use skywatch_core::entity::WeaponId;
use skywatch_core::enums::MountType;
use skywatch_core::events::TargetEvent;
use skywatch_core::types::Transform;
use skywatch_radar::RadarScope;
use skywatch_targeting::{
    update_fixed_group, update_turret, Collaborators, FixedWeapon, LineOfSight, WeaponContext,
};

use crate::components::{carrier_ref, Carrier, Hardpoint, Hardpoints};
use crate::regions::WorldRegions;

pub fn run(
    world: &World,
    line_of_sight: &dyn LineOfSight,
    config: &TargetingConfig,
    events: &mut Vec<TargetEvent>,
) {
    let regions = WorldRegions::new(world);
    let collaborators = Collaborators::new(Some(line_of_sight), Some(&regions));

    for (entity, (transform, scope, hardpoints)) in world
        .query::<(&Transform, &RadarScope, &mut Hardpoints)>()
        .with::<&Carrier>()
        .iter()
    {
        let carrier = carrier_ref(entity);
        let candidates = scope.blips();
        let mut fixed = Vec::new();

        for (slot, hardpoint) in hardpoints.weapons.iter_mut().enumerate() {
            let Hardpoint {
                profile,
                local,
                armed,
                locked,
                targeting,
            } = hardpoint;
            let ctx = WeaponContext {
                id: WeaponId::new(carrier, slot as u16),
                profile,
                transform: transform.compose(local),
                armed: *armed,
                locked: *locked,
            };
            match profile.mount {
                MountType::Turret => {
                    update_turret(targeting, &ctx, candidates, &collaborators, config, DT, events)
                }
                MountType::Fixed => fixed.push(FixedWeapon { ctx, targeting }),
            }
        }

        if !fixed.is_empty() {
            update_fixed_group(
                transform,
                &mut fixed,
                candidates,
                &collaborators,
                config,
                DT,
                events,
            );
        }
    }
}
