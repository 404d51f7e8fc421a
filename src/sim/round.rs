//! Round orchestration: lifecycle, tick loop, input, and contacts
//!
//! The engine owns the target registry, the spawn pacer, and the in-flight
//! projectiles. The host drives it with `tick(dt)` from its own frame loop
//! and feeds it keystrokes and physics contacts; the engine never assumes
//! who is calling.

use chrono::Utc;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::RoundConfig;
use crate::keys;
use crate::telemetry::{KeystrokeRecord, RoundResult};

use super::intercept::launch_velocity;
use super::pacing::SpawnPacer;
use super::registry::TargetRegistry;
use super::target::{contact_category, Projectile, ProjectileId, Target, TargetId};

/// Display name of this game mode.
pub const FRIENDLY_NAME: &str = "Alien Invasion";

/// Round lifecycle. `Running` carries an orthogonal paused flag on the
/// engine; `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    NotStarted,
    Running,
    Ended,
}

/// One body in a reported physics contact: the substrate's opaque id plus
/// its category bit (see [`contact_category`]).
#[derive(Debug, Clone, Copy)]
pub struct ContactBody {
    pub id: u32,
    pub category: u32,
}

/// A contact-began report from the physics substrate. The engine classifies
/// the pair by OR-ing the category bits; unknown pairs are ignored.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    pub body_a: ContactBody,
    pub body_b: ContactBody,
}

impl ContactEvent {
    /// Convenience constructor for a projectile hitting a target.
    pub fn projectile_hit(projectile: ProjectileId, target: TargetId) -> Self {
        Self {
            body_a: ContactBody {
                id: projectile.0,
                category: contact_category::PROJECTILE,
            },
            body_b: ContactBody {
                id: target.0,
                category: contact_category::TARGET,
            },
        }
    }

    fn body_with_category(&self, category: u32) -> Option<ContactBody> {
        if self.body_a.category == category {
            Some(self.body_a)
        } else if self.body_b.category == category {
            Some(self.body_b)
        } else {
            None
        }
    }
}

/// Presentation-facing happenings accumulated during a tick and drained by
/// the host. Informational only; the engine never consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    Spawned(TargetId),
    ProjectileFired {
        projectile: ProjectileId,
        target: TargetId,
    },
    Destroyed(TargetId),
    ProjectileExpired(ProjectileId),
    Mistype {
        entered: String,
    },
    RoundOver,
}

/// The per-frame orchestrator for one round of the typing-defense mode.
pub struct RoundEngine {
    config: RoundConfig,
    phase: RoundPhase,
    paused: bool,
    /// Simulation clock: sum of tick deltas while running
    sim_time: f64,
    rng: Pcg32,
    next_id: u32,
    registry: TargetRegistry,
    pacer: SpawnPacer,
    projectiles: Vec<Projectile>,
    /// Live telemetry; moved out when the round ends
    result: Option<RoundResult>,
    finished: Option<RoundResult>,
    mistypes: u32,
    /// Previous frame's lowest-unfired id, for edge-triggered timestamping
    last_lowest: Option<TargetId>,
    events: Vec<RoundEvent>,
    on_round_over: Option<Box<dyn FnMut(RoundResult)>>,
}

impl RoundEngine {
    pub fn new(config: RoundConfig, seed: u64) -> Self {
        let pacer = SpawnPacer::new(&config);
        Self {
            config,
            phase: RoundPhase::NotStarted,
            paused: false,
            sim_time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            registry: TargetRegistry::new(),
            pacer,
            projectiles: Vec::new(),
            result: None,
            finished: None,
            mistypes: 0,
            last_lowest: None,
            events: Vec::new(),
            on_round_over: None,
        }
    }

    /// Register the callback invoked exactly once with the finalized
    /// round result. Without one, the result is held for [`take_result`].
    ///
    /// [`take_result`]: Self::take_result
    pub fn set_on_round_over(&mut self, callback: impl FnMut(RoundResult) + 'static) {
        self.on_round_over = Some(Box::new(callback));
    }

    /// Activate the round: `NotStarted -> Running`. Creates the empty
    /// telemetry record and arms the spawn pacer.
    pub fn start(&mut self) {
        if self.phase != RoundPhase::NotStarted {
            log::warn!("start() called in {:?}, ignored", self.phase);
            return;
        }
        self.pacer = SpawnPacer::new(&self.config);
        self.result = Some(RoundResult::new(FRIENDLY_NAME));
        self.phase = RoundPhase::Running;
        log::info!("round started: quota {}", self.config.quota);
    }

    /// Advance the simulation by one frame. No-op unless running and
    /// unpaused; pause freezes advancement without destroying state.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != RoundPhase::Running || self.paused {
            return;
        }
        self.sim_time += f64::from(dt);

        if self.pacer.should_spawn(dt, self.registry.len(), &self.config) {
            self.spawn_target();
        }

        for target in self.registry.iter_mut() {
            target.pos += target.vel * dt;
        }

        self.mark_new_lowest();
        self.pacer.regulate(&mut self.registry, &self.config);
        self.advance_projectiles(dt);
        self.check_round_end();
    }

    /// Edge-triggered lowest-target detection: timestamp the height-ordered
    /// minimum among unfired targets only on the frame its identity changes.
    fn mark_new_lowest(&mut self) {
        let now = self.sim_time;
        let Some(lowest) = self.registry.lowest_unfired_mut() else {
            return;
        };
        if self.last_lowest != Some(lowest.id) {
            lowest.became_lowest_at = Some(now);
            self.last_lowest = Some(lowest.id);
        }
    }

    fn advance_projectiles(&mut self, dt: f32) {
        let now = self.sim_time;
        for projectile in &mut self.projectiles {
            projectile.pos += projectile.vel * dt;
        }
        let events = &mut self.events;
        self.projectiles.retain(|p| {
            if p.expired(now) {
                log::debug!("projectile {:?} expired", p.id);
                events.push(RoundEvent::ProjectileExpired(p.id));
                false
            } else {
                true
            }
        });
    }

    fn spawn_target(&mut self) {
        let key = keys::random_key(&mut self.rng);
        let x = self.rng.random_range(
            self.config.field_width * crate::consts::SPAWN_BAND_MIN
                ..self.config.field_width * crate::consts::SPAWN_BAND_MAX,
        );
        let pos = Vec2::new(x, self.config.field_height + crate::consts::SPAWN_MARGIN);
        let vel = Vec2::new(
            0.0,
            -self.config.base_descent_speed * self.pacer.difficulty(),
        );

        let id = TargetId(self.alloc_id());
        self.registry.insert(Target::new(id, key.glyph, pos, vel));
        self.pacer.note_spawned();
        self.events.push(RoundEvent::Spawned(id));
        log::debug!(
            "spawned target {:?} ({}) at x={:.1}, {} of {}",
            id,
            key.glyph,
            x,
            self.pacer.total_spawned(),
            self.config.quota
        );
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Feed one entered symbol. A match on the lowest unfired target records
    /// a keystroke and launches a projectile at it; anything else (including
    /// symbols not on the board) counts one mistype and changes nothing.
    pub fn handle_symbol_input(&mut self, entered: &str) {
        if self.phase != RoundPhase::Running {
            return;
        }
        let now = self.sim_time;
        let origin = self.config.launch_origin();
        let speed = self.config.projectile_speed;

        let Some(target) = self.registry.lowest_unfired_mut() else {
            return;
        };

        if target.symbol != entered {
            // Off-board input is just another mistype, but worth telling apart
            // in the logs from a reachable key pressed at the wrong time.
            if !keys::is_known_glyph(entered) {
                log::debug!("entered symbol {entered:?} is not on the board");
            }
            self.mistypes += 1;
            self.events.push(RoundEvent::Mistype {
                entered: entered.to_string(),
            });
            return;
        }

        target.fired_upon = true;
        let target_id = target.id;
        let symbol = target.symbol.clone();
        let appeared = target.became_lowest_at;
        let target_pos = target.pos;
        let target_vel = target.vel;

        if let Some(appeared) = appeared {
            let time_to_type = (now - appeared).max(0.0);
            if let Some(result) = self.result.as_mut() {
                result.record(KeystrokeRecord::new(&symbol, entered, time_to_type));
            }
        }

        let mut vel = launch_velocity(target_pos, target_vel, origin, speed);
        if vel == Vec2::ZERO {
            // Target sitting exactly on the launcher; fire straight up.
            log::warn!("degenerate launch at {:?}, aiming straight up", target_id);
            vel = Vec2::new(0.0, speed);
        }

        let id = ProjectileId(self.alloc_id());
        self.projectiles.push(Projectile {
            id,
            pos: origin,
            vel,
            spawned_at: now,
            ttl: self.config.projectile_ttl,
        });
        self.events.push(RoundEvent::ProjectileFired {
            projectile: id,
            target: target_id,
        });
    }

    /// Consume a contact-began report from the physics substrate.
    ///
    /// projectile|target destroys both and feeds the destroy streak.
    /// target|boundary is informational only; the danger throttle works from
    /// positions, and boundary crossing never fails the round.
    pub fn handle_contact(&mut self, contact: ContactEvent) {
        if self.phase != RoundPhase::Running {
            return;
        }
        let mask = contact.body_a.category | contact.body_b.category;

        if mask == contact_category::PROJECTILE | contact_category::TARGET {
            let Some(target) = contact.body_with_category(contact_category::TARGET) else {
                return;
            };
            let Some(projectile) = contact.body_with_category(contact_category::PROJECTILE) else {
                return;
            };
            self.resolve_hit(TargetId(target.id), ProjectileId(projectile.id));
        } else if mask == contact_category::TARGET | contact_category::BOUNDARY {
            log::debug!("target reached the boundary (informational)");
        }
    }

    fn resolve_hit(&mut self, target_id: TargetId, projectile_id: ProjectileId) {
        if self.registry.remove(target_id).is_none() {
            return;
        }
        self.projectiles.retain(|p| p.id != projectile_id);
        self.pacer.note_destroyed(&self.config);
        self.events.push(RoundEvent::Destroyed(target_id));
        log::debug!(
            "target {:?} destroyed, {} remaining",
            target_id,
            self.registry.len()
        );
        self.check_round_end();
    }

    /// `Running -> Ended` exactly when the quota is spent and the registry is
    /// empty. Finalizes and hands off the round result exactly once.
    fn check_round_end(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }
        if !self.pacer.quota_reached(&self.config) || !self.registry.is_empty() {
            return;
        }

        self.phase = RoundPhase::Ended;
        self.projectiles.clear();
        self.events.push(RoundEvent::RoundOver);

        if let Some(mut result) = self.result.take() {
            result.finalize(Utc::now());
            log::info!(
                "round over: {} keystrokes, {} mistypes",
                result.keystrokes.len(),
                self.mistypes
            );
            match self.on_round_over.as_mut() {
                Some(callback) => callback(result),
                None => self.finished = Some(result),
            }
        }
    }

    /// Freeze per-frame advancement. State is preserved.
    pub fn pause(&mut self) {
        if self.phase == RoundPhase::Running {
            self.paused = true;
        }
    }

    /// Resume per-frame advancement.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Live targets still in the registry.
    pub fn remaining_targets(&self) -> usize {
        self.registry.len()
    }

    pub fn total_mistypes(&self) -> u32 {
        self.mistypes
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pacer(&self) -> &SpawnPacer {
        &self.pacer
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Drain the events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// The finalized result, when the round has ended and no round-over
    /// callback claimed it.
    pub fn take_result(&mut self) -> Option<RoundResult> {
        self.finished.take()
    }
}
