//! Pending deltas persisted between CLI invocations, one JSON file per
//! remote directory.

use crate::core::delta_tracker::DeltaTracker;
use crate::errors::AppResult;
use crate::models::delta::Delta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Journal {
    pub schema_version: u32,
    pub remote_dir: String,
    pub deltas: Vec<Delta>,
}

impl Journal {
    pub fn tracker(&self) -> DeltaTracker {
        DeltaTracker::from_deltas(self.deltas.clone())
    }
}

/// Load the journal; a missing file is an empty journal for `remote_dir`.
pub fn load(path: &Path, remote_dir: &str) -> AppResult<Journal> {
    if !path.exists() {
        return Ok(Journal {
            schema_version: 1,
            remote_dir: remote_dir.to_string(),
            deltas: Vec::new(),
        });
    }

    let raw = fs::read_to_string(path)?;
    let journal: Journal = serde_json::from_str(&raw)?;
    if journal.remote_dir != remote_dir {
        log::warn!(
            "journal {} was written for '{}', using it for '{}'",
            path.display(),
            journal.remote_dir,
            remote_dir
        );
    }
    Ok(journal)
}

pub fn save(path: &Path, remote_dir: &str, tracker: &DeltaTracker) -> AppResult<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let journal = Journal {
        schema_version: 1,
        remote_dir: remote_dir.to_string(),
        deltas: tracker.deltas().to_vec(),
    };
    let data = serde_json::to_string_pretty(&journal)?;
    fs::write(path, format!("{data}\n"))?;
    Ok(path.to_path_buf())
}
