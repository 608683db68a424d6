//! Item registry: every object the radar can see, stored in a slot pool.
//!
//! Owners claim a slot once with `add`, then push their latest state each
//! tick through `update`. Slots are released with `remove` and reused by
//! later adds, each reuse stamping a fresh generation so that stale
//! `ItemKey`s stop resolving.
//!
//! Nothing here fails loudly: bad indices, free slots and generation
//! mismatches all come back as `None`/`false` or are ignored.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use skywatch_core::config::RadarConfig;
use skywatch_core::constants::*;
use skywatch_core::entity::EntityRef;
use skywatch_core::enums::BlipCategory;
use skywatch_core::types::ItemKey;

use crate::pool::SlotPool;

/// One tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub position: DVec3,
    pub velocity: DVec3,
    pub visible: bool,
    pub faction: i32,
    pub squadron: i32,
    pub category: BlipCategory,
    /// Identity for location/sub-component/object lookups; 0 when unset.
    pub content_hash: u64,
    /// Display size, 1 to 5.
    pub blip_size: u8,
    pub owner: EntityRef,
    /// Generation stamped when the slot was last claimed.
    pub generation: u32,
}

impl Default for RegistryEntry {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            visible: false,
            faction: FACTION_NEUTRAL,
            squadron: SQUADRON_UNSET,
            category: BlipCategory::default(),
            content_hash: CONTENT_HASH_UNSET,
            blip_size: BLIP_SIZE_MIN,
            owner: EntityRef::None,
            generation: GENERATION_UNSET,
        }
    }
}

/// The frequently-changing part of an entry, broadcast by its owner every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryUpdate {
    pub position: DVec3,
    pub velocity: DVec3,
    pub visible: bool,
    pub faction: i32,
    pub squadron: i32,
}

impl Default for EntryUpdate {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            visible: false,
            faction: FACTION_NEUTRAL,
            squadron: SQUADRON_UNSET,
        }
    }
}

/// Everything needed to register a new object.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NewEntry {
    pub category: BlipCategory,
    pub owner: EntityRef,
    pub content_hash: u64,
    pub blip_size: u8,
    pub state: EntryUpdate,
}

impl NewEntry {
    pub fn new(category: BlipCategory, owner: EntityRef, state: EntryUpdate) -> Self {
        Self {
            category,
            owner,
            content_hash: CONTENT_HASH_UNSET,
            blip_size: BLIP_SIZE_MIN,
            state,
        }
    }

    pub fn with_content_hash(mut self, content_hash: u64) -> Self {
        self.content_hash = content_hash;
        self
    }

    pub fn with_blip_size(mut self, blip_size: u8) -> Self {
        self.blip_size = blip_size;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ItemRegistry {
    pool: SlotPool<RegistryEntry>,
    /// Last generation handed out. Shared by every slot.
    generation: u32,
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new(&RadarConfig::default())
    }
}

impl ItemRegistry {
    pub fn new(config: &RadarConfig) -> Self {
        Self {
            pool: SlotPool::new(config.initial_capacity, config.grow_by),
            generation: GENERATION_UNSET,
        }
    }

    /// Register an object and return its slot index.
    ///
    /// Use `key` (or `add_keyed`) to get the full handle when the index will
    /// be held across ticks.
    pub fn add(&mut self, entry: NewEntry) -> usize {
        let index = self.pool.claim();
        let generation = self.next_generation();
        if let Some(slot) = self.pool.get_mut(index) {
            *slot = RegistryEntry {
                position: entry.state.position,
                velocity: entry.state.velocity,
                visible: entry.state.visible,
                faction: entry.state.faction,
                squadron: entry.state.squadron,
                category: entry.category,
                content_hash: entry.content_hash,
                blip_size: entry.blip_size.clamp(BLIP_SIZE_MIN, BLIP_SIZE_MAX),
                owner: entry.owner,
                generation,
            };
        }
        index
    }

    /// `add`, returning the index together with its generation.
    pub fn add_keyed(&mut self, entry: NewEntry) -> ItemKey {
        let index = self.add(entry);
        ItemKey::new(index, self.generation)
    }

    /// Release a slot. The generation is left alone; the next add on this
    /// slot bumps it.
    pub fn remove(&mut self, index: usize) {
        self.pool.release(index);
    }

    pub fn remove_all(&mut self) {
        self.pool.release_all();
    }

    /// Entry in a claimed slot, whatever its generation.
    pub fn get(&self, index: usize) -> Option<&RegistryEntry> {
        self.pool.get(index)
    }

    /// Entry in a claimed slot whose generation still matches. Long-lived
    /// references must resolve through this.
    pub fn get_checked(&self, index: usize, generation: u32) -> Option<&RegistryEntry> {
        self.pool
            .get(index)
            .filter(|entry| entry.generation == generation)
    }

    pub fn resolve(&self, key: ItemKey) -> Option<&RegistryEntry> {
        self.get_checked(key.index, key.generation)
    }

    pub fn contains_key(&self, key: ItemKey) -> bool {
        self.resolve(key).is_some()
    }

    /// Full handle for a claimed slot.
    pub fn key(&self, index: usize) -> Option<ItemKey> {
        self.get(index)
            .map(|entry| ItemKey::new(index, entry.generation))
    }

    /// Index of the first claimed entry carrying `content_hash`. The unset
    /// hash never matches.
    pub fn get_by_content_hash(&self, content_hash: u64) -> Option<usize> {
        if content_hash == CONTENT_HASH_UNSET {
            return None;
        }
        self.pool
            .iter_claimed()
            .find(|(_, entry)| entry.content_hash == content_hash)
            .map(|(index, _)| index)
    }

    // Setters only check the index range. Writing to a free slot is harmless:
    // the next claim overwrites it.

    pub fn set_visibility(&mut self, index: usize, visible: bool) {
        if let Some(entry) = self.pool.slot_mut(index) {
            entry.visible = visible;
        }
    }

    pub fn set_faction(&mut self, index: usize, faction: i32) {
        if let Some(entry) = self.pool.slot_mut(index) {
            entry.faction = faction;
        }
    }

    pub fn set_squadron(&mut self, index: usize, squadron: i32) {
        if let Some(entry) = self.pool.slot_mut(index) {
            entry.squadron = squadron;
        }
    }

    pub fn set_blip_size(&mut self, index: usize, blip_size: u8) {
        if let Some(entry) = self.pool.slot_mut(index) {
            entry.blip_size = blip_size.clamp(BLIP_SIZE_MIN, BLIP_SIZE_MAX);
        }
    }

    pub fn set_position(&mut self, index: usize, position: DVec3) {
        if let Some(entry) = self.pool.slot_mut(index) {
            entry.position = position;
        }
    }

    /// Apply an owner's per-tick broadcast.
    pub fn update(&mut self, index: usize, record: &EntryUpdate) {
        if let Some(entry) = self.pool.slot_mut(index) {
            entry.position = record.position;
            entry.velocity = record.velocity;
            entry.visible = record.visible;
            entry.faction = record.faction;
            entry.squadron = record.squadron;
        }
    }

    /// Claimed entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RegistryEntry)> + '_ {
        self.pool.iter_claimed()
    }

    /// Number of claimed slots.
    pub fn len(&self) -> usize {
        self.pool.claimed()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.claimed() == 0
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Last generation handed out.
    pub fn current_generation(&self) -> u32 {
        self.generation
    }

    fn next_generation(&mut self) -> u32 {
        if self.generation >= GENERATION_WRAP_LIMIT {
            warn!(
                limit = GENERATION_WRAP_LIMIT,
                "registry generation counter wrapped"
            );
            self.generation = GENERATION_FIRST;
        } else {
            self.generation += 1;
        }
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn force_generation(&mut self, generation: u32) {
        self.generation = generation;
    }

    #[cfg(test)]
    pub(crate) fn slot_generation_for_test(&self, index: usize) -> u32 {
        self.pool
            .slot(index)
            .map_or(GENERATION_UNSET, |entry| entry.generation)
    }
}
