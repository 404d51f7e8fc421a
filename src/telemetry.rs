//! Per-keystroke timing telemetry
//!
//! A round accumulates one [`KeystrokeRecord`] per correctly entered symbol,
//! timing from the moment its target became the lowest unfired one. The
//! finished [`RoundResult`] is handed to the storage collaborator at round
//! end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One correctly matched keystroke. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeystrokeRecord {
    /// Symbol the target carried
    pub actual: String,
    /// Symbol the player entered
    pub entered: String,
    /// Seconds from the target becoming lowest to the keystroke, >= 0
    pub time_to_type: f64,
}

impl KeystrokeRecord {
    pub fn new(actual: impl Into<String>, entered: impl Into<String>, time_to_type: f64) -> Self {
        Self {
            actual: actual.into(),
            entered: entered.into(),
            time_to_type: time_to_type.max(0.0),
        }
    }
}

/// The telemetry of one bounded round, finalized exactly once when the round
/// ends and then owned by whoever stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    /// Which game mode produced this round
    pub game_mode: String,
    /// Wall-clock end of the round; set by [`finalize`]
    ///
    /// [`finalize`]: Self::finalize
    pub end_time: DateTime<Utc>,
    /// Records in keystroke order
    pub keystrokes: Vec<KeystrokeRecord>,
}

impl RoundResult {
    /// Empty result created at round start. `end_time` holds the creation
    /// instant until finalized.
    pub fn new(game_mode: impl Into<String>) -> Self {
        Self {
            game_mode: game_mode.into(),
            end_time: Utc::now(),
            keystrokes: Vec::new(),
        }
    }

    pub fn record(&mut self, keystroke: KeystrokeRecord) {
        self.keystrokes.push(keystroke);
    }

    /// Stamp the round's end.
    pub fn finalize(&mut self, end_time: DateTime<Utc>) {
        self.end_time = end_time;
    }

    /// Mean time-to-type across the round, if any keystrokes landed.
    pub fn mean_time_to_type(&self) -> Option<f64> {
        if self.keystrokes.is_empty() {
            return None;
        }
        let total: f64 = self.keystrokes.iter().map(|k| k.time_to_type).sum();
        Some(total / self.keystrokes.len() as f64)
    }
}
