//! Deterministic round simulation
//!
//! All gameplay logic lives here. The module is single-writer and
//! frame-synchronous: every mutation of targets, projectiles, and the
//! registry happens inside `RoundEngine::tick`, `handle_symbol_input`, or
//! `handle_contact`, all of which take `&mut self` and must be called from
//! the host's simulation thread. Keystrokes and physics contacts arriving
//! elsewhere must be funneled onto that thread first.
//!
//! - Host-driven `tick(dt)` only; the engine owns no clock and no threads
//! - Seeded RNG only (`Pcg32`), so a seed reproduces a round
//! - Stable target ordering (insertion order breaks height ties)

pub mod intercept;
pub mod pacing;
pub mod registry;
pub mod round;
pub mod target;

pub use intercept::{intercept_time, launch_velocity};
pub use pacing::SpawnPacer;
pub use registry::TargetRegistry;
pub use round::{ContactBody, ContactEvent, RoundEngine, RoundEvent, RoundPhase, FRIENDLY_NAME};
pub use target::{contact_category, Projectile, ProjectileId, Target, TargetId};
