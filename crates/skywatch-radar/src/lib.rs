//! Pooled spatial registry and proximity queries.
//!
//! `ItemRegistry` tracks every object the radar can see in a slot pool with
//! generation-checked handles. `query::run` filters and orders registry
//! entries into blips. `RadarScope` packages a standing query with its
//! reusable result buffer.

pub mod pool;
pub mod query;
pub mod registry;
pub mod scope;
pub mod snapshot;

pub use skywatch_core as core;

pub use query::{Blip, RadarQuery};
pub use registry::{EntryUpdate, ItemRegistry, NewEntry, RegistryEntry};
pub use scope::RadarScope;
