//! Core types and definitions for the SKYWATCH radar and targeting stack.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, entity references, enums, constants, configuration, events,
//! commands and snapshot views. It has no dependency on the ECS layer.

pub mod commands;
pub mod config;
pub mod constants;
pub mod entity;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::ConfigError;
