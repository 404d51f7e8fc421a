//! Round-result persistence collaborator
//!
//! One JSON file per round in a data directory. Listing tolerates damage:
//! unreadable or malformed files are skipped individually with a warning so
//! one corrupt round never hides the rest.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use thiserror::Error;

use crate::telemetry::RoundResult;

/// Failures surfaced to the caller of `save`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("round storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("round encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no usable data directory")]
    NoDataDir,
}

/// Storage collaborator for finished rounds.
pub trait RoundStore {
    /// Persist one finalized round. Errors are reported to the caller and
    /// must not block round-end handling.
    fn save(&self, result: &RoundResult) -> Result<(), StorageError>;

    /// Every readable round on record. Corrupt entries are skipped, never
    /// fatal.
    fn all_rounds(&self) -> Vec<RoundResult>;
}

/// File-backed store: `round_<millis>_<n>.json` under a directory.
#[derive(Debug, Clone)]
pub struct FileRoundStore {
    dir: PathBuf,
}

impl FileRoundStore {
    /// Store rooted at an explicit directory (created on first save).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory.
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("", "", "keyfall").ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("rounds")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_file_name(&self) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        // Collision-free even for saves within one millisecond.
        let mut n = 0u32;
        loop {
            let candidate = self.dir.join(format!("round_{millis}_{n}.json"));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl RoundStore for FileRoundStore {
    fn save(&self, result: &RoundResult) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.next_file_name();
        let json = serde_json::to_vec_pretty(result)?;
        fs::write(&path, json)?;
        log::info!("saved round to {}", path.display());
        Ok(())
    }

    fn all_rounds(&self) -> Vec<RoundResult> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("cannot list {}: {err}", self.dir.display());
                return Vec::new();
            }
        };

        let mut rounds = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read(&path).map_err(StorageError::from).and_then(|bytes| {
                serde_json::from_slice::<RoundResult>(&bytes).map_err(StorageError::from)
            }) {
                Ok(round) => rounds.push(round),
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            }
        }
        rounds
    }
}
