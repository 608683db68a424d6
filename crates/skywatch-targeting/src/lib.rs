//! Target acquisition for SKYWATCH weapons.
//!
//! Consumes radar scope results and drives each weapon's acquire / hold /
//! drop decisions. Turret weapons take the first candidate they can bring
//! to bear; fixed-mount weapons share the best-scoring candidate ahead of
//! the carrier. Pure logic over plain data; no ECS dependency.

pub mod acquisition;
pub mod collaborators;
pub mod cone;
pub mod fixed;
pub mod scoring;

pub use skywatch_core as core;

pub use acquisition::{update_turret, TargetRef, WeaponContext, WeaponTargeting};
pub use collaborators::{Collaborators, LineOfSight, SubComponentLookup};
pub use fixed::{select_best_target, update_fixed_group, FixedWeapon};
