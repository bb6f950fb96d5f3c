//! Pending remote operations for one directory.
//!
//! Every mutation first looks for a pending delta on the same identity and
//! rewrites it in place, so the log never holds two operations for one file
//! and never uploads something only to delete it again.

use crate::models::delta::{Delta, Verb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaTracker {
    deltas: Vec<Delta>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_deltas(deltas: Vec<Delta>) -> Self {
        Self { deltas }
    }

    /// Queue a new file for upload under `filename`.
    pub fn add(&mut self, source_path: impl Into<PathBuf>, filename: &str) {
        let source_path = source_path.into();

        // Re-adding a name whose deletion is pending: overwrite instead
        if let Some(idx) = self.find(|d| d.verb == Verb::Delete && d.source_filename == filename) {
            log::debug!("add of {filename} turns pending delete into replace");
            self.deltas[idx] = Delta::replace(filename, source_path, filename);
            return;
        }

        if let Some(idx) = self.find(|d| d.verb == Verb::Add && d.target_name() == filename) {
            self.deltas[idx].source_path = source_path;
            return;
        }

        self.deltas.push(Delta::add(source_path, filename));
    }

    pub fn delete(&mut self, filename: &str) {
        let Some(idx) = self.find(|d| d.target_name() == filename) else {
            self.deltas.push(Delta::delete(filename));
            return;
        };

        match self.deltas[idx].verb {
            Verb::Add => {
                log::debug!("delete of {filename} cancels its pending add");
                self.deltas.remove(idx);
            }
            Verb::Rename | Verb::Replace => {
                let original = self.deltas[idx].source_filename.clone();
                self.deltas[idx] = Delta::delete(original);
            }
            Verb::Delete => {}
        }
    }

    pub fn rename(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }

        // A pending rename is found under its current target first, then
        // under its original name
        let pending_rename = self
            .find(|d| d.verb == Verb::Rename && d.new_source_filename == old)
            .or_else(|| self.find(|d| d.verb == Verb::Rename && d.source_filename == old));
        if let Some(idx) = pending_rename {
            if self.deltas[idx].source_filename == new {
                log::debug!("rename of {old} back to {new} cancels the pending rename");
                self.deltas.remove(idx);
            } else {
                self.deltas[idx].new_source_filename = new.to_string();
            }
            return;
        }

        if let Some(idx) = self.find(|d| {
            matches!(d.verb, Verb::Add | Verb::Replace) && d.target_name() == old
        }) {
            self.deltas[idx].new_source_filename = new.to_string();
            return;
        }

        self.deltas.push(Delta::rename(old, new));
    }

    /// Overwrite the remote `old_filename` with `new_local_file`; the upload
    /// takes the local file's name.
    pub fn replace(&mut self, old_filename: &str, new_local_file: &Path) {
        let new_name = new_local_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| old_filename.to_string());

        let Some(idx) = self.find(|d| d.target_name() == old_filename) else {
            self.deltas.push(Delta::replace(
                old_filename,
                new_local_file.to_path_buf(),
                new_name,
            ));
            return;
        };

        let existing = &mut self.deltas[idx];
        match existing.verb {
            Verb::Add => existing.source_path = new_local_file.to_path_buf(),
            Verb::Rename => {
                // a -> b followed by replace(b): upload the new content, drop a
                let original = existing.source_filename.clone();
                *existing = Delta::replace(original, new_local_file.to_path_buf(), new_name);
            }
            Verb::Replace => {
                existing.source_path = new_local_file.to_path_buf();
                existing.new_source_filename = new_name;
            }
            Verb::Delete => {
                *existing = Delta::replace(old_filename, new_local_file.to_path_buf(), new_name);
            }
        }
    }

    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn deltas_mut(&mut self) -> &mut [Delta] {
        &mut self.deltas
    }

    pub fn pending(&self) -> impl Iterator<Item = &Delta> {
        self.deltas.iter().filter(|d| d.is_pending())
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Drop every delta already applied remotely; failures stay for the next attempt.
    pub fn prune_uploaded(&mut self) -> usize {
        let before = self.deltas.len();
        self.deltas.retain(Delta::is_pending);
        before - self.deltas.len()
    }

    pub fn clear(&mut self) {
        self.deltas.clear();
    }

    fn find(&self, pred: impl Fn(&Delta) -> bool) -> Option<usize> {
        self.deltas.iter().position(|d| d.is_pending() && pred(d))
    }
}
