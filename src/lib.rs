//! Keyfall - a typing-defense round simulation engine
//!
//! Falling targets labeled with a symbol descend toward a danger line; the
//! player types the matching symbol to launch an intercepting projectile.
//! This crate is the headless round engine only. Rendering, the on-screen
//! keyboard, and physics-shape intersection live in the embedding host.
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (targets, intercept solving, pacing)
//! - `keys`: Fixed symbol pool decorating targets
//! - `telemetry`: Per-keystroke timing collected into a round result
//! - `storage`: Round-result persistence collaborator
//! - `mode`: Capability trait shared by interchangeable game modes

pub mod config;
pub mod keys;
pub mod mode;
pub mod sim;
pub mod storage;
pub mod telemetry;

pub use config::RoundConfig;
pub use mode::TypingMode;
pub use sim::{ContactEvent, RoundEngine, RoundEvent, RoundPhase};
pub use storage::{FileRoundStore, RoundStore, StorageError};
pub use telemetry::{KeystrokeRecord, RoundResult};

/// Engine tuning constants
pub mod consts {
    /// Total targets spawned per round
    pub const ROUND_QUOTA: u32 = 20;
    /// Maximum targets alive at once
    pub const MAX_CONCURRENT_TARGETS: usize = 5;

    /// Base interval between spawns (seconds)
    pub const BASE_SPAWN_INTERVAL: f32 = 2.0;
    /// Floor for the spawn interval when ramp-up shrinks it
    pub const MIN_SPAWN_INTERVAL: f32 = 0.2;
    /// Multiplicative shrink applied per ramp-up step
    pub const RAMP_UP_FACTOR: f32 = 0.9;
    /// Consecutive destroys required before ramp-up kicks in
    pub const RAMP_UP_THRESHOLD: u32 = 1;

    /// Base descent speed of targets (units/s), scaled by difficulty
    pub const BASE_DESCENT_SPEED: f32 = 50.0;
    /// Difficulty multiplier bounds
    pub const MIN_DIFFICULTY: f32 = 0.5;
    pub const MAX_DIFFICULTY: f32 = 2.0;
    /// Difficulty step down while a target sits below the danger line
    pub const DIFFICULTY_DECAY: f32 = 0.1;
    /// Difficulty step up per clear frame
    pub const DIFFICULTY_GROWTH: f32 = 0.01;

    /// Projectile launch speed (units/s)
    pub const PROJECTILE_SPEED: f32 = 400.0;
    /// Seconds before an un-hit projectile is discarded
    pub const PROJECTILE_TTL: f32 = 3.0;

    /// Minimum vertical spacing maintained between stacked targets
    pub const MIN_VERTICAL_SPACING: f32 = 100.0;

    /// Playfield dimensions (logical units)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Danger line: below this fraction of field height, descent freezes
    pub const DANGER_LINE_FRACTION: f32 = 0.3;
    /// Launcher sits at mid-width, this fraction of field height
    pub const LAUNCH_HEIGHT_FRACTION: f32 = 0.1;
    /// Spawns appear this far above the top edge
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Horizontal spawn band as fractions of field width
    pub const SPAWN_BAND_MIN: f32 = 0.2;
    pub const SPAWN_BAND_MAX: f32 = 0.8;
}
