//! Executes a delta log against a remote store and publishes the LST.

use crate::core::delta_tracker::DeltaTracker;
use crate::errors::AppResult;
use crate::lst::{SiteRoots, save_text};
use crate::models::delta::{Delta, Verb};
use crate::models::table::Table;
use crate::remote::{RemoteStore, UploadLog, remote_path};
use chrono::Local;

/// What to do with the remaining deltas once one of them fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Continue,
    Abort,
}

#[derive(Debug, Clone)]
pub struct DeltaFailure {
    pub delta: Delta,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub applied: Vec<Delta>,
    pub failed: Vec<DeltaFailure>,
    /// Deltas not attempted because the batch was aborted
    pub skipped: usize,
}

impl UploadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0
    }
}

#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub remote_path: String,
    pub backup_path: Option<String>,
    pub bytes: usize,
}

/// One upload run: who is uploading, plus the log lines not yet written out.
#[derive(Debug, Clone)]
pub struct UploadSession {
    editor_id: String,
    pending_log: Vec<String>,
}

impl UploadSession {
    pub fn new(editor_id: impl Into<String>) -> Self {
        Self {
            editor_id: editor_id.into(),
            pending_log: Vec::new(),
        }
    }

    pub fn editor_id(&self) -> &str {
        &self.editor_id
    }

    pub fn pending_log(&self) -> &[String] {
        &self.pending_log
    }

    /// Run every pending delta in log order. Successes are marked and pruned;
    /// failures stay in the tracker for a later attempt.
    pub fn execute(
        &mut self,
        tracker: &mut DeltaTracker,
        store: &dyn RemoteStore,
        remote_dir: &str,
        policy: FailurePolicy,
    ) -> UploadReport {
        let mut report = UploadReport::default();
        let mut aborted = false;

        for delta in tracker.deltas_mut().iter_mut() {
            if !delta.is_pending() {
                continue;
            }
            if aborted {
                report.skipped += 1;
                continue;
            }

            match apply_delta(store, remote_dir, delta) {
                Ok(()) => {
                    delta.uploaded = true;
                    log::info!("{} in {remote_dir}: done", delta.describe());
                    let line = self.log_line(
                        delta.verb.as_str(),
                        &delta.source_filename,
                        delta.target_name(),
                        remote_dir,
                    );
                    self.pending_log.push(line);
                    report.applied.push(delta.clone());
                }
                Err(e) => {
                    log::warn!("{} in {remote_dir} failed: {e}", delta.describe());
                    report.failed.push(DeltaFailure {
                        delta: delta.clone(),
                        reason: e.to_string(),
                    });
                    if policy == FailurePolicy::Abort {
                        aborted = true;
                    }
                }
            }
        }

        tracker.prune_uploaded();
        report
    }

    /// Serialize `table` and write it to `remote_dir/lst_name`. Nothing is
    /// written when the table does not serialize.
    pub fn publish(
        &mut self,
        store: &dyn RemoteStore,
        site: &SiteRoots,
        table: &Table,
        remote_dir: &str,
        lst_name: &str,
        backup: bool,
    ) -> AppResult<PublishOutcome> {
        let text = save_text(site, table)?;
        let target = remote_path(remote_dir, lst_name);

        let mut backup_path = None;
        if backup && store.exists(&target) {
            let previous = store.read_text(&target)?;
            let name = backup_name(lst_name);
            let path = remote_path(remote_dir, &name);
            store.write_text(&path, &previous)?;
            log::info!("backed up {target} to {path}");
            backup_path = Some(path);
        }

        store.write_text(&target, &text)?;
        let line = self.log_line("save", lst_name, lst_name, remote_dir);
        self.pending_log.push(line);

        Ok(PublishOutcome {
            remote_path: target,
            backup_path,
            bytes: text.len(),
        })
    }

    /// Write the buffered lines to `sink` and clear the buffer.
    pub fn flush(&mut self, sink: &mut dyn UploadLog) -> AppResult<usize> {
        let count = self.pending_log.len();
        for line in &self.pending_log {
            sink.append(line)?;
        }
        self.pending_log.clear();
        Ok(count)
    }

    fn log_line(&self, verb: &str, source: &str, target: &str, remote_dir: &str) -> String {
        format!(
            "{} [{}] {verb} {source} -> {target} in {remote_dir}",
            Local::now().format("%FT%T%:z"),
            self.editor_id
        )
    }
}

fn apply_delta(store: &dyn RemoteStore, remote_dir: &str, delta: &Delta) -> AppResult<()> {
    let at = |name: &str| remote_path(remote_dir, name);

    match delta.verb {
        Verb::Add => store.put_file(&delta.source_path, &at(delta.target_name())),
        Verb::Delete => store.delete_file(&at(&delta.source_filename)),
        Verb::Rename => store.rename(
            &at(&delta.source_filename),
            &at(&delta.new_source_filename),
        ),
        Verb::Replace => {
            store.put_file(&delta.source_path, &at(&delta.new_source_filename))?;
            // A retry after a failed delete finds the old name already gone
            let old = at(&delta.source_filename);
            if delta.new_source_filename != delta.source_filename && store.exists(&old) {
                store.delete_file(&old)?;
            }
            Ok(())
        }
    }
}

/// `{name}-{YYYYmmdd-HHMMSS}.bak`
pub fn backup_name(lst_name: &str) -> String {
    format!("{lst_name}-{}.bak", Local::now().format("%Y%m%d-%H%M%S"))
}
