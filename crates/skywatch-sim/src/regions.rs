//! Sub-component resolution against carriers' `DamageRegions`.

use hecs::World;

use skywatch_core::entity::{EntityRef, SubComponentRef};
use skywatch_targeting::SubComponentLookup;

use crate::components::{entity_of, DamageRegions};

/// Looks damage regions up directly in the ECS world.
pub struct WorldRegions<'w> {
    world: &'w World,
}

impl<'w> WorldRegions<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

impl SubComponentLookup for WorldRegions<'_> {
    fn sub_component(&self, carrier: EntityRef, content_hash: u64) -> Option<SubComponentRef> {
        let entity = entity_of(carrier)?;
        let regions = self.world.get::<&DamageRegions>(entity).ok()?;
        regions.find(content_hash).map(|region| SubComponentRef {
            carrier,
            content_hash,
            region: region.region,
        })
    }
}
