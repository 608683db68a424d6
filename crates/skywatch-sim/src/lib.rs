//! Simulation engine for SKYWATCH.
//!
//! Owns the hecs ECS world and the item registry, broadcasts entity state
//! into the registry every tick, runs radar scopes and target acquisition,
//! and produces `SimSnapshot`s for presentation.

pub mod components;
pub mod engine;
pub mod los;
pub mod regions;
pub mod systems;
pub mod world_setup;

pub use skywatch_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
