//! Round entities: targets, projectiles, and contact categories

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identity of a falling target, unique within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Identity of an in-flight projectile, unique within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// A descending entity bearing the symbol the player must match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    /// Glyph painted on the target; matched against keystroke input
    pub symbol: String,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Set once when a projectile is launched at this target; never reset
    pub fired_upon: bool,
    /// Simulation time at which this target became the lowest unfired one
    pub became_lowest_at: Option<f64>,
}

impl Target {
    pub fn new(id: TargetId, symbol: impl Into<String>, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            pos,
            vel,
            fired_upon: false,
            became_lowest_at: None,
        }
    }
}

/// A short-lived entity launched toward a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Simulation time of launch
    pub spawned_at: f64,
    /// Seconds of flight before the projectile is discarded
    pub ttl: f32,
}

impl Projectile {
    /// True once the projectile has outlived its TTL at simulation time `now`.
    pub fn expired(&self, now: f64) -> bool {
        now - self.spawned_at >= f64::from(self.ttl)
    }
}

/// Physics contact categories, distinct bits combinable with `|` for
/// pairwise classification. The host's physics substrate tags bodies with
/// these and reports contacts back through [`ContactEvent`].
///
/// [`ContactEvent`]: super::round::ContactEvent
pub mod contact_category {
    pub const TARGET: u32 = 0b1;
    pub const PROJECTILE: u32 = 0b10;
    pub const BOUNDARY: u32 = 0b100;
}
