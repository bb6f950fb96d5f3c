use crate::config::Config;
use crate::core::journal;
use crate::core::upload::{FailurePolicy, UploadReport, UploadSession};
use crate::errors::{AppError, AppResult};
use crate::lst::load_bytes;
use crate::remote::{FileUploadLog, LocalDirStore};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;

pub struct SyncLogic;

impl SyncLogic {
    /// Apply the journal of `remote_dir` to the store, then publish `lst`
    /// when every delta went through.
    pub fn upload(
        cfg: &Config,
        journal_path: &Path,
        remote_dir: &str,
        lst: Option<&Path>,
        keep_going: bool,
    ) -> AppResult<UploadReport> {
        let mut tracker = journal::load(journal_path, remote_dir)?.tracker();
        if tracker.is_empty() && lst.is_none() {
            return Err(AppError::NothingToDo(format!(
                "no pending deltas for {remote_dir}"
            )));
        }

        let store = LocalDirStore::new(&cfg.remote_root);
        let mut session = UploadSession::new(cfg.editor_id.clone());
        let policy = if keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };

        // 1️⃣ deltas
        let report = session.execute(&mut tracker, &store, remote_dir, policy);
        journal::save(journal_path, remote_dir, &tracker)?;

        for d in &report.applied {
            success(d.describe());
        }
        for f in &report.failed {
            warning(format!("{}: {}", f.delta.describe(), f.reason));
        }
        if report.skipped > 0 {
            warning(format!("{} deltas not attempted", report.skipped));
        }

        // 2️⃣ LST, only over a consistent remote directory
        let published = match lst {
            Some(lst) if report.is_clean() => {
                Self::publish_lst(cfg, &store, &mut session, remote_dir, lst)
            }
            Some(_) => {
                warning("LST not written: some deltas are still pending");
                Ok(())
            }
            None => Ok(()),
        };

        // 3️⃣ upload log, written even when publishing failed
        let mut sink = FileUploadLog::new(&cfg.upload_log);
        session.flush(&mut sink)?;
        published?;

        if !report.failed.is_empty() {
            return Err(AppError::remote(
                "upload",
                remote_dir,
                format!(
                    "{} of {} deltas failed and remain pending",
                    report.failed.len(),
                    report.failed.len() + report.applied.len() + report.skipped
                ),
            ));
        }
        Ok(report)
    }

    fn publish_lst(
        cfg: &Config,
        store: &LocalDirStore,
        session: &mut UploadSession,
        remote_dir: &str,
        lst: &Path,
    ) -> AppResult<()> {
        let table = load_bytes(&cfg.site_roots(), &fs::read(lst)?);
        let name = lst
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AppError::InvalidPath(lst.display().to_string()))?;
        let published = session.publish(
            store,
            &cfg.site_roots(),
            &table,
            remote_dir,
            &name,
            cfg.backup_on_upload,
        )?;
        if let Some(backup) = &published.backup_path {
            info(format!("Previous LST saved as {backup}"));
        }
        success(format!(
            "Wrote {} ({} bytes)",
            published.remote_path, published.bytes
        ));
        Ok(())
    }
}
