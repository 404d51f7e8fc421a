//! Spawn timing and adaptive difficulty
//!
//! The pacer decides when a new target may spawn and how fast the live ones
//! descend. Two feedback loops drive it: consecutive destroys shrink the
//! spawn interval (ramp-up), and any target sitting below the danger line
//! freezes descent while the difficulty multiplier decays.

use crate::config::RoundConfig;

use super::registry::TargetRegistry;

/// Spawn/difficulty controller state. Owned by the round engine; all methods
/// are called from the engine's tick.
#[derive(Debug)]
pub struct SpawnPacer {
    current_spawn_interval: f32,
    spawn_timer: f32,
    consecutive_destroys: u32,
    difficulty: f32,
    total_spawned: u32,
}

impl SpawnPacer {
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            current_spawn_interval: config.base_spawn_interval,
            spawn_timer: 0.0,
            consecutive_destroys: 0,
            difficulty: 1.0,
            total_spawned: 0,
        }
    }

    /// Advance the spawn timer by `dt` and report whether a target should
    /// spawn this frame. The timer resets whenever it elapses under the
    /// concurrency cap, even if the quota suppresses the actual spawn.
    pub fn should_spawn(&mut self, dt: f32, live_targets: usize, config: &RoundConfig) -> bool {
        self.spawn_timer += dt;
        if self.spawn_timer < self.current_spawn_interval || live_targets >= config.max_concurrent {
            return false;
        }
        self.spawn_timer = 0.0;
        self.total_spawned < config.quota
    }

    /// Record a completed spawn: counts toward the quota and breaks the
    /// destroy streak.
    pub fn note_spawned(&mut self) {
        self.total_spawned += 1;
        self.consecutive_destroys = 0;
    }

    /// Record a destroyed target; past the threshold (and with ramp-up
    /// enabled) each further destroy shrinks the spawn interval down to the
    /// configured floor. Mistypes never touch the streak.
    pub fn note_destroyed(&mut self, config: &RoundConfig) {
        self.consecutive_destroys += 1;
        if config.ramp_up_enabled && self.consecutive_destroys > config.ramp_up_threshold {
            let shrunk = self.current_spawn_interval * crate::consts::RAMP_UP_FACTOR;
            self.current_spawn_interval = shrunk.max(config.min_spawn_interval);
            log::debug!(
                "ramp-up: spawn interval now {:.3}s after {} consecutive destroys",
                self.current_spawn_interval,
                self.consecutive_destroys
            );
        }
    }

    /// Per-frame movement regulation: the danger throttle and vertical
    /// spacing enforcement.
    ///
    /// When the lowest target (fired or not) is below the danger line, every
    /// target freezes and difficulty decays toward its floor. Otherwise
    /// difficulty creeps toward its cap, targets too close to the one below
    /// them snap upward to keep the minimum gap (the lowest never moves), and
    /// every target gets the current descent velocity.
    pub fn regulate(&mut self, registry: &mut TargetRegistry, config: &RoundConfig) {
        let Some(lowest_y) = registry
            .iter()
            .map(|t| t.pos.y)
            .min_by(f32::total_cmp)
        else {
            return;
        };

        if lowest_y < config.danger_line() {
            self.difficulty = (self.difficulty - crate::consts::DIFFICULTY_DECAY)
                .max(crate::consts::MIN_DIFFICULTY);
            for target in registry.iter_mut() {
                target.vel = glam::Vec2::ZERO;
            }
            return;
        }

        self.difficulty =
            (self.difficulty + crate::consts::DIFFICULTY_GROWTH).min(crate::consts::MAX_DIFFICULTY);

        let ordered = registry.height_ordered();
        let mut floor_y = f32::NEG_INFINITY;
        for (rank, id) in ordered.iter().enumerate() {
            let min_y = floor_y + config.min_vertical_spacing;
            if let Some(target) = registry.get_mut(*id) {
                if rank > 0 && target.pos.y < min_y {
                    target.pos.y = min_y;
                }
                target.vel.y = -config.base_descent_speed * self.difficulty;
                floor_y = target.pos.y;
            }
        }
    }

    pub fn current_spawn_interval(&self) -> f32 {
        self.current_spawn_interval
    }

    pub fn consecutive_destroys(&self) -> u32 {
        self.consecutive_destroys
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    pub fn quota_reached(&self, config: &RoundConfig) -> bool {
        self.total_spawned >= config.quota
    }
}
