//! Radar scope: a standing query plus the result buffer it refills.
//!
//! One scope per carrier. The buffer is reused tick to tick, and
//! `result_count` is what a minimap reads to know how many blips to draw.

use glam::DVec3;

use skywatch_core::entity::EntityRef;

use crate::query::{self, Blip, RadarQuery};
use crate::registry::ItemRegistry;

#[derive(Debug, Clone, Default)]
pub struct RadarScope {
    pub owner: EntityRef,
    pub query: RadarQuery,
    blips: Vec<Blip>,
    result_count: usize,
}

impl RadarScope {
    pub fn new(owner: EntityRef, query: RadarQuery) -> Self {
        Self {
            owner,
            query,
            blips: Vec::new(),
            result_count: 0,
        }
    }

    /// Move the query centre, typically to the owner's latest position.
    pub fn recentre(&mut self, centre: DVec3) {
        self.query.centre = centre;
    }

    /// Re-run the query. On failure the previous results are kept.
    pub fn refresh(&mut self, registry: &ItemRegistry) -> bool {
        if !query::run(registry, &self.query, &mut self.blips) {
            return false;
        }
        self.result_count = self.blips.len();
        true
    }

    pub fn blips(&self) -> &[Blip] {
        &self.blips
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }
}
