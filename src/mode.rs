//! Game-mode capability trait
//!
//! The host anticipates several interchangeable typing modes behind one
//! contract: a display name, the live counters its HUD shows, pause/resume,
//! and the keystroke entry point. Modes are held as `Box<dyn TypingMode>`
//! rather than subclassing anything host-provided.

use crate::sim::RoundEngine;

/// Contract shared by every typing-defense game mode.
pub trait TypingMode {
    /// Human-readable mode name for menus and round results.
    fn friendly_name(&self) -> &'static str;

    /// Live targets still on the field.
    fn remaining_targets(&self) -> usize;

    /// Mistyped symbols so far this round.
    fn total_mistypes(&self) -> u32;

    /// Freeze per-frame advancement without losing state.
    fn pause(&mut self);

    /// Undo [`pause`](Self::pause).
    fn resume(&mut self);

    /// Feed one entered symbol from the input surface.
    fn handle_symbol_input(&mut self, entered: &str);
}

impl TypingMode for RoundEngine {
    fn friendly_name(&self) -> &'static str {
        crate::sim::round::FRIENDLY_NAME
    }

    fn remaining_targets(&self) -> usize {
        RoundEngine::remaining_targets(self)
    }

    fn total_mistypes(&self) -> u32 {
        RoundEngine::total_mistypes(self)
    }

    fn pause(&mut self) {
        RoundEngine::pause(self);
    }

    fn resume(&mut self) {
        RoundEngine::resume(self);
    }

    fn handle_symbol_input(&mut self, entered: &str) {
        RoundEngine::handle_symbol_input(self, entered);
    }
}
