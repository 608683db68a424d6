//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions over `&mut World` (or `&World` for read-only)
//! plus whatever engine-owned state they need passed in explicitly.

pub mod broadcast;
pub mod cleanup;
pub mod movement;
pub mod scan;
pub mod snapshot;
pub mod targeting;
