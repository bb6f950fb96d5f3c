use crate::core::delta_tracker::DeltaTracker;
use crate::core::journal;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::table::TextTable;
use std::fs;
use std::path::{Path, PathBuf};

/// Journal-backed edits of the pending delta log of one remote directory.
pub struct DeltaLogic<'a> {
    journal_path: &'a Path,
    remote_dir: &'a str,
}

impl<'a> DeltaLogic<'a> {
    pub fn new(journal_path: &'a Path, remote_dir: &'a str) -> Self {
        Self {
            journal_path,
            remote_dir,
        }
    }

    pub fn add(&self, file: &Path, as_name: Option<&str>) -> AppResult<()> {
        let local = local_file(file)?;
        let name = match as_name {
            Some(n) => n.to_string(),
            None => file_name(&local)?,
        };
        self.update(|t| t.add(local.clone(), &name))?;
        success(format!("Queued add of {name} in {}", self.remote_dir));
        Ok(())
    }

    pub fn delete(&self, name: &str) -> AppResult<()> {
        self.update(|t| t.delete(name))?;
        success(format!("Queued delete of {name} in {}", self.remote_dir));
        Ok(())
    }

    pub fn rename(&self, old: &str, new: &str) -> AppResult<()> {
        self.update(|t| t.rename(old, new))?;
        success(format!("Queued rename {old} -> {new} in {}", self.remote_dir));
        Ok(())
    }

    pub fn replace(&self, old: &str, file: &Path) -> AppResult<()> {
        let local = local_file(file)?;
        self.update(|t| t.replace(old, &local))?;
        success(format!(
            "Queued replace of {old} with {} in {}",
            local.display(),
            self.remote_dir
        ));
        Ok(())
    }

    pub fn list(&self) -> AppResult<()> {
        let tracker = self.tracker()?;
        if tracker.is_empty() {
            info(format!("No pending deltas for {}", self.remote_dir));
            return Ok(());
        }

        let rows = tracker
            .deltas()
            .iter()
            .enumerate()
            .map(|(i, d)| {
                vec![
                    (i + 1).to_string(),
                    d.verb.to_string(),
                    d.source_filename.clone(),
                    d.target_name().to_string(),
                    d.source_path.display().to_string(),
                ]
            })
            .collect();
        print!(
            "{}",
            TextTable::auto(&["#", "Verb", "Source", "Target", "Local file"], rows).render()
        );
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        let mut tracker = self.tracker()?;
        let count = tracker.len();
        tracker.clear();
        journal::save(self.journal_path, self.remote_dir, &tracker)?;
        success(format!("Discarded {count} pending deltas for {}", self.remote_dir));
        Ok(())
    }

    pub fn tracker(&self) -> AppResult<DeltaTracker> {
        Ok(journal::load(self.journal_path, self.remote_dir)?.tracker())
    }

    fn update(&self, op: impl FnOnce(&mut DeltaTracker)) -> AppResult<()> {
        let mut tracker = self.tracker()?;
        op(&mut tracker);
        journal::save(self.journal_path, self.remote_dir, &tracker)?;
        Ok(())
    }
}

/// Absolute path of an existing local file.
fn local_file(file: &Path) -> AppResult<PathBuf> {
    if !file.is_file() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("local file not found: {}", file.display()),
        )));
    }
    Ok(fs::canonicalize(file)?)
}

fn file_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::InvalidPath(path.display().to_string()))
}
