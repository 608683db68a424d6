//! Proximity queries over the item registry.
//!
//! `run` is stateless: it reads the registry, fills a caller-owned result
//! buffer with blips and optionally sorts them. All distance work uses
//! squared distances.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use skywatch_core::entity::EntityRef;
use skywatch_core::enums::{BlipCategory, SortOrder};
use skywatch_core::types::ItemKey;

use crate::registry::{ItemRegistry, RegistryEntry};

/// What to look for and how to order it.
///
/// Empty include lists mean "no include filter". The faction include list
/// is only consulted when `faction` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarQuery {
    pub centre: DVec3,
    /// Must be positive.
    pub range: f64,
    /// Compare full 3D distance against the range instead of the horizontal
    /// (`x`/`z`) distance.
    pub is_3d: bool,
    pub sort: SortOrder,
    /// Exact-match faction filter.
    pub faction: Option<i32>,
    pub factions_to_include: Vec<i32>,
    pub factions_to_exclude: Vec<i32>,
    pub squadrons_to_include: Vec<i32>,
    pub squadrons_to_exclude: Vec<i32>,
}

impl Default for RadarQuery {
    fn default() -> Self {
        Self {
            centre: DVec3::ZERO,
            range: skywatch_core::constants::DEFAULT_SCAN_RANGE,
            is_3d: true,
            sort: SortOrder::None,
            faction: None,
            factions_to_include: Vec::new(),
            factions_to_exclude: Vec::new(),
            squadrons_to_include: Vec::new(),
            squadrons_to_exclude: Vec::new(),
        }
    }
}

impl RadarQuery {
    pub fn new(centre: DVec3, range: f64) -> Self {
        Self {
            centre,
            range,
            ..Default::default()
        }
    }

    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.is_3d = false;
        self
    }

    /// Whether an entry's faction/squadron pass the filter chain.
    fn admits(&self, entry: &RegistryEntry) -> bool {
        if self.factions_to_exclude.contains(&entry.faction) {
            return false;
        }
        if let Some(faction) = self.faction {
            if faction != entry.faction {
                return false;
            }
        }
        if self.squadrons_to_exclude.contains(&entry.squadron) {
            return false;
        }
        if self.faction.is_none()
            && !self.factions_to_include.is_empty()
            && !self.factions_to_include.contains(&entry.faction)
        {
            return false;
        }
        if !self.squadrons_to_include.is_empty()
            && !self.squadrons_to_include.contains(&entry.squadron)
        {
            return false;
        }
        true
    }
}

/// One query hit. Plain value, valid for the query call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blip {
    pub category: BlipCategory,
    pub position: DVec3,
    pub dist2d_sq: f64,
    pub dist3d_sq: f64,
    pub faction: i32,
    pub squadron: i32,
    pub content_hash: u64,
    pub size: u8,
    pub owner: EntityRef,
    /// Slot and generation of the producing entry, for later re-resolution.
    pub key: ItemKey,
}

/// Run `query` against `registry`, replacing the contents of `results`.
///
/// Returns false, leaving `results` untouched, when the range is not a
/// positive number.
pub fn run(registry: &ItemRegistry, query: &RadarQuery, results: &mut Vec<Blip>) -> bool {
    if !(query.range > 0.0) {
        return false;
    }

    results.clear();
    let range_sq = query.range * query.range;

    for (index, entry) in registry.iter() {
        if !entry.visible {
            continue;
        }

        let delta = entry.position - query.centre;
        let dist2d_sq = delta.x * delta.x + delta.z * delta.z;
        let dist3d_sq = dist2d_sq + delta.y * delta.y;

        let in_range = if query.is_3d {
            dist3d_sq <= range_sq
        } else {
            dist2d_sq <= range_sq
        };
        if !in_range || !query.admits(entry) {
            continue;
        }

        results.push(Blip {
            category: entry.category,
            position: entry.position,
            dist2d_sq,
            dist3d_sq,
            faction: entry.faction,
            squadron: entry.squadron,
            content_hash: entry.content_hash,
            size: entry.blip_size,
            owner: entry.owner,
            key: ItemKey::new(index, entry.generation),
        });
    }

    sort_blips(results, query.sort);
    true
}

/// Sort by the selected squared distance. Ties have no defined order.
pub fn sort_blips(blips: &mut [Blip], sort: SortOrder) {
    match sort {
        SortOrder::None => {}
        SortOrder::DistanceAsc2D => {
            blips.sort_unstable_by(|a, b| a.dist2d_sq.total_cmp(&b.dist2d_sq))
        }
        SortOrder::DistanceDesc2D => {
            blips.sort_unstable_by(|a, b| b.dist2d_sq.total_cmp(&a.dist2d_sq))
        }
        SortOrder::DistanceAsc3D => {
            blips.sort_unstable_by(|a, b| a.dist3d_sq.total_cmp(&b.dist3d_sq))
        }
        SortOrder::DistanceDesc3D => {
            blips.sort_unstable_by(|a, b| b.dist3d_sq.total_cmp(&a.dist3d_sq))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EntryUpdate, NewEntry};

    fn visible_at(position: DVec3, faction: i32, squadron: i32) -> NewEntry {
        NewEntry::new(
            BlipCategory::PatrolUnit,
            EntityRef::None,
            EntryUpdate {
                position,
                visible: true,
                faction,
                squadron,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_non_positive_range_leaves_results_untouched() {
        let registry = ItemRegistry::default();
        let sentinel = Blip {
            category: BlipCategory::GenericObject,
            position: DVec3::ONE,
            dist2d_sq: 1.0,
            dist3d_sq: 1.0,
            faction: 0,
            squadron: -1,
            content_hash: 0,
            size: 1,
            owner: EntityRef::None,
            key: ItemKey::default(),
        };
        let mut results = vec![sentinel];
        for range in [0.0, -5.0, f64::NAN] {
            let query = RadarQuery::new(DVec3::ZERO, range);
            assert!(!run(&registry, &query, &mut results));
            assert_eq!(results, vec![sentinel]);
        }
    }

    #[test]
    fn test_horizontal_mode_ignores_altitude() {
        let mut registry = ItemRegistry::default();
        registry.add(visible_at(DVec3::new(30.0, 500.0, 0.0), 1, -1));
        let mut results = Vec::new();

        let query = RadarQuery::new(DVec3::ZERO, 50.0);
        assert!(run(&registry, &query, &mut results));
        assert!(results.is_empty(), "3D mode should reject the high entry");

        let query = RadarQuery::new(DVec3::ZERO, 50.0).horizontal();
        assert!(run(&registry, &query, &mut results));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].dist2d_sq, 900.0);
        assert_eq!(results[0].dist3d_sq, 900.0 + 250_000.0);
    }

    #[test]
    fn test_range_boundary_inclusive() {
        let mut registry = ItemRegistry::default();
        registry.add(visible_at(DVec3::new(0.0, 0.0, 50.0), 0, -1));
        let mut results = Vec::new();
        assert!(run(&registry, &RadarQuery::new(DVec3::ZERO, 50.0), &mut results));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_exact_faction_filter_overrides_include_list() {
        let mut registry = ItemRegistry::default();
        registry.add(visible_at(DVec3::X, 1, -1));
        registry.add(visible_at(DVec3::X, 2, -1));
        let query = RadarQuery {
            faction: Some(1),
            factions_to_include: vec![2],
            ..RadarQuery::new(DVec3::ZERO, 10.0)
        };
        let mut results = Vec::new();
        assert!(run(&registry, &query, &mut results));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].faction, 1);
    }

    #[test]
    fn test_include_lists() {
        let mut registry = ItemRegistry::default();
        registry.add(visible_at(DVec3::X, 1, 4));
        registry.add(visible_at(DVec3::X, 2, 4));
        registry.add(visible_at(DVec3::X, 2, 5));
        let query = RadarQuery {
            factions_to_include: vec![2],
            squadrons_to_include: vec![5],
            ..RadarQuery::new(DVec3::ZERO, 10.0)
        };
        let mut results = Vec::new();
        assert!(run(&registry, &query, &mut results));
        assert_eq!(results.len(), 1);
        assert_eq!((results[0].faction, results[0].squadron), (2, 5));
    }

    #[test]
    fn test_squadron_exclude() {
        let mut registry = ItemRegistry::default();
        registry.add(visible_at(DVec3::X, 1, 3));
        registry.add(visible_at(DVec3::X, 1, -1));
        let query = RadarQuery {
            squadrons_to_exclude: vec![3],
            ..RadarQuery::new(DVec3::ZERO, 10.0)
        };
        let mut results = Vec::new();
        assert!(run(&registry, &query, &mut results));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].squadron, -1);
    }

    #[test]
    fn test_descending_2d_sort() {
        let mut registry = ItemRegistry::default();
        for z in [5.0, 20.0, 10.0] {
            registry.add(visible_at(DVec3::new(0.0, 0.0, z), 0, -1));
        }
        let query = RadarQuery::new(DVec3::ZERO, 100.0).sorted(SortOrder::DistanceDesc2D);
        let mut results = Vec::new();
        assert!(run(&registry, &query, &mut results));
        let order: Vec<f64> = results.iter().map(|b| b.dist2d_sq).collect();
        assert_eq!(order, vec![400.0, 100.0, 25.0]);
    }

    #[test]
    fn test_blip_carries_entry_key() {
        let mut registry = ItemRegistry::default();
        registry.add(visible_at(DVec3::X, 0, -1));
        let key = registry.add_keyed(visible_at(DVec3::Z, 0, -1).with_content_hash(77));
        let mut results = Vec::new();
        assert!(run(&registry, &RadarQuery::new(DVec3::ZERO, 10.0), &mut results));
        let blip = results.iter().find(|b| b.content_hash == 77).unwrap();
        assert_eq!(blip.key, key);
        assert!(registry.resolve(blip.key).is_some());
    }
}
