//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Registry ---

/// Slots allocated when a registry is created with the default config.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// Slots added each time the pool runs out of free slots.
pub const DEFAULT_POOL_GROWTH: usize = 32;

/// Generation value that no claimed slot ever carries.
pub const GENERATION_UNSET: u32 = 0;

/// First generation handed out, and the value the counter wraps back to.
pub const GENERATION_FIRST: u32 = 1;

/// Counter value at which the generation wraps back to `GENERATION_FIRST`.
pub const GENERATION_WRAP_LIMIT: u32 = u32::MAX - 1;

/// Content hash meaning "no identity"; never matched by hash lookups.
pub const CONTENT_HASH_UNSET: u64 = 0;

// --- Factions ---

/// Faction id for neutral entries.
pub const FACTION_NEUTRAL: i32 = 0;

/// Squadron id for entries with no squadron.
pub const SQUADRON_UNSET: i32 = -1;

// --- Blip display ---

pub const BLIP_SIZE_MIN: u8 = 1;
pub const BLIP_SIZE_MAX: u8 = 5;

// --- Radar scope ---

/// Default scan range for a carrier's radar scope (meters).
pub const DEFAULT_SCAN_RANGE: f64 = 5_000.0;

// --- Targeting ---

/// Seconds a target may stay without line of sight / lock before it is dropped.
pub const DEFAULT_TARGET_LOST_SECS: f64 = 2.0;

/// Default estimated weapon range (meters).
pub const DEFAULT_WEAPON_RANGE: f64 = 1_500.0;

/// Highest possible desirability score (dead ahead, within reference distance).
pub const SCORE_MAX: f64 = 1000.0;

/// Score assigned to candidates that cannot be engaged (behind the carrier).
pub const SCORE_INVALID: f64 = -1.0;

/// Distance below which range no longer reduces the score (meters).
pub const SCORE_REFERENCE_DISTANCE: f64 = 100.0;

/// Score divisor applied per decade of distance beyond the reference distance.
pub const SCORE_DISTANCE_FALLOFF: f64 = 1.1;

// --- Line of sight ---

/// Ray sampling interval for occlusion checks (meters).
pub const LOS_SAMPLE_INTERVAL: f64 = 10.0;

// --- Simulation ---

/// Horizontal distance from the origin beyond which simulated entities are removed (meters).
pub const WORLD_RADIUS: f64 = 50_000.0;
