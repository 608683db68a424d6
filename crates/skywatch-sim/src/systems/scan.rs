//! Scan system: recentres every radar scope on its owner and re-runs its query.

use hecs::World;
use tracing::warn;

use skywatch_core::types::Transform;
use skywatch_radar::{ItemRegistry, RadarScope};

pub fn run(world: &mut World, registry: &ItemRegistry) {
    for (entity, (transform, scope)) in world.query_mut::<(&Transform, &mut RadarScope)>() {
        scope.recentre(transform.position);
        if !scope.refresh(registry) {
            warn!(?entity, range = scope.query.range, "radar scope query rejected");
        }
    }
}
