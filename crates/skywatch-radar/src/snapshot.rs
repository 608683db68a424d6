//! Read-only views of radar scopes for presentation.

use skywatch_core::state::{BlipView, ScopeView};

use crate::scope::RadarScope;

/// Build the minimap view of a scope. Blip offsets are relative to the
/// scope centre.
pub fn build_scope_view(scope: &RadarScope) -> ScopeView {
    let centre = scope.query.centre;
    ScopeView {
        owner: scope.owner,
        centre,
        range: scope.query.range,
        result_count: scope.result_count(),
        blips: scope
            .blips()
            .iter()
            .map(|blip| BlipView {
                key: blip.key,
                category: blip.category,
                offset: blip.position - centre,
                distance: blip.dist3d_sq.sqrt(),
                faction: blip.faction,
                squadron: blip.squadron,
                size: blip.size,
                entity: blip.owner,
            })
            .collect(),
    }
}
