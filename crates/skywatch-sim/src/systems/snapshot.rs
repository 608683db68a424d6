//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use skywatch_core::entity::WeaponId;
use skywatch_core::events::TargetEvent;
use skywatch_core::state::{ScopeView, SimSnapshot, WeaponView};
use skywatch_core::types::SimTime;
use skywatch_radar::snapshot::build_scope_view;
use skywatch_radar::{ItemRegistry, RadarScope};

use crate::components::{carrier_ref, Hardpoints};

pub fn build_snapshot(
    world: &World,
    registry: &ItemRegistry,
    time: &SimTime,
    events: Vec<TargetEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        tracked_items: registry.len(),
        scopes: build_scopes(world),
        weapons: build_weapons(world),
        events,
    }
}

/// Scope views ordered by owner id so the output does not depend on archetype layout.
fn build_scopes(world: &World) -> Vec<ScopeView> {
    let mut scopes: Vec<ScopeView> = world
        .query::<&RadarScope>()
        .iter()
        .map(|(_, scope)| build_scope_view(scope))
        .collect();
    scopes.sort_unstable_by_key(|view| view.owner.bits());
    scopes
}

fn build_weapons(world: &World) -> Vec<WeaponView> {
    let mut weapons: Vec<WeaponView> = world
        .query::<&Hardpoints>()
        .iter()
        .flat_map(|(entity, hardpoints)| {
            let carrier = carrier_ref(entity);
            hardpoints
                .weapons
                .iter()
                .enumerate()
                .map(move |(slot, hardpoint)| WeaponView {
                    weapon: WeaponId::new(carrier, slot as u16),
                    state: hardpoint.targeting.state(),
                    target: hardpoint.targeting.target().map(|target| target.key),
                    invalid_secs: hardpoint.targeting.invalid_secs(),
                    assigned_secs: hardpoint.targeting.assigned_secs(),
                })
        })
        .collect();
    weapons.sort_unstable_by_key(|view| (view.weapon.carrier.bits(), view.weapon.slot));
    weapons
}
