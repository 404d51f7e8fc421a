//! Round tuning configuration
//!
//! Everything the pacing controller and round engine read as a knob lives
//! here, so hosts (and tests) can shrink a round without touching engine
//! code. Defaults match the shipped "Alien Invasion" tuning.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tuning for one round of the typing-defense mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    // === Round shape ===
    /// Total targets spawned before the round can end
    pub quota: u32,
    /// Cap on simultaneously live targets
    pub max_concurrent: usize,

    // === Spawn pacing ===
    /// Starting interval between spawns (seconds)
    pub base_spawn_interval: f32,
    /// Ramp-up never shrinks the interval below this
    pub min_spawn_interval: f32,
    /// Whether consecutive destroys shorten the spawn interval
    pub ramp_up_enabled: bool,
    /// Consecutive destroys needed before ramp-up applies
    pub ramp_up_threshold: u32,

    // === Movement ===
    /// Base descent speed, scaled by the difficulty multiplier
    pub base_descent_speed: f32,
    /// Projectile launch speed
    pub projectile_speed: f32,
    /// Projectile lifetime before it is discarded (seconds)
    pub projectile_ttl: f32,
    /// Minimum vertical gap maintained between stacked targets
    pub min_vertical_spacing: f32,

    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
    /// Fraction of field height below which descent freezes
    pub danger_line_fraction: f32,
    /// Launcher height as a fraction of field height (at mid-width)
    pub launch_height_fraction: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            quota: consts::ROUND_QUOTA,
            max_concurrent: consts::MAX_CONCURRENT_TARGETS,

            base_spawn_interval: consts::BASE_SPAWN_INTERVAL,
            min_spawn_interval: consts::MIN_SPAWN_INTERVAL,
            ramp_up_enabled: true,
            ramp_up_threshold: consts::RAMP_UP_THRESHOLD,

            base_descent_speed: consts::BASE_DESCENT_SPEED,
            projectile_speed: consts::PROJECTILE_SPEED,
            projectile_ttl: consts::PROJECTILE_TTL,
            min_vertical_spacing: consts::MIN_VERTICAL_SPACING,

            field_width: consts::FIELD_WIDTH,
            field_height: consts::FIELD_HEIGHT,
            danger_line_fraction: consts::DANGER_LINE_FRACTION,
            launch_height_fraction: consts::LAUNCH_HEIGHT_FRACTION,
        }
    }
}

impl RoundConfig {
    /// Height of the danger line in field units.
    pub fn danger_line(&self) -> f32 {
        self.field_height * self.danger_line_fraction
    }

    /// Projectile launch origin: mid-width, near the bottom edge.
    pub fn launch_origin(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.field_width / 2.0,
            self.field_height * self.launch_height_fraction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_shipped_tuning() {
        let cfg = RoundConfig::default();
        assert_eq!(cfg.quota, 20);
        assert_eq!(cfg.max_concurrent, 5);
        assert!((cfg.base_spawn_interval - 2.0).abs() < f32::EPSILON);
        assert!(cfg.ramp_up_enabled);
        assert_eq!(cfg.ramp_up_threshold, 1);
    }

    #[test]
    fn test_danger_line_and_origin() {
        let cfg = RoundConfig::default();
        assert!((cfg.danger_line() - 180.0).abs() < 1e-4);
        let origin = cfg.launch_origin();
        assert!((origin.x - 400.0).abs() < 1e-4);
        assert!((origin.y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_serde_round_trip() {
        let cfg = RoundConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RoundConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.quota, cfg.quota);
        assert!((back.base_spawn_interval - cfg.base_spawn_interval).abs() < f32::EPSILON);
    }
}
