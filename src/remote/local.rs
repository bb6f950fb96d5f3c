use super::RemoteStore;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// A remote store backed by a plain directory tree.
#[derive(Debug, Clone)]
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a remote path onto the directory, refusing anything that would
    /// leave the root.
    pub fn resolve(&self, remote: &str) -> AppResult<PathBuf> {
        let mut path = self.root.clone();
        let mut depth = 0;
        for part in remote.split(['/', '\\']) {
            match part {
                "" | "." => {}
                ".." => return Err(AppError::InvalidPath(remote.to_string())),
                p => {
                    path.push(p);
                    depth += 1;
                }
            }
        }
        if depth == 0 {
            return Err(AppError::InvalidPath(remote.to_string()));
        }
        Ok(path)
    }

    fn ensure_parent(path: &Path) -> std::io::Result<()> {
        match path.parent() {
            Some(parent) => fs::create_dir_all(parent),
            None => Ok(()),
        }
    }
}

impl RemoteStore for LocalDirStore {
    fn put_file(&self, local: &Path, remote: &str) -> AppResult<()> {
        let target = self.resolve(remote)?;
        Self::ensure_parent(&target).map_err(|e| AppError::remote("put", remote, e))?;
        fs::copy(local, &target).map_err(|e| {
            AppError::remote("put", remote, format!("{}: {e}", local.display()))
        })?;
        log::debug!("put {} -> {}", local.display(), target.display());
        Ok(())
    }

    fn delete_file(&self, remote: &str) -> AppResult<()> {
        let target = self.resolve(remote)?;
        fs::remove_file(&target).map_err(|e| AppError::remote("delete", remote, e))?;
        log::debug!("deleted {}", target.display());
        Ok(())
    }

    fn rename(&self, old: &str, new: &str) -> AppResult<()> {
        let from = self.resolve(old)?;
        let to = self.resolve(new)?;
        Self::ensure_parent(&to).map_err(|e| AppError::remote("rename", new, e))?;
        fs::rename(&from, &to).map_err(|e| AppError::remote("rename", old, e))?;
        log::debug!("renamed {} -> {}", from.display(), to.display());
        Ok(())
    }

    fn read_text(&self, remote: &str) -> AppResult<String> {
        let target = self.resolve(remote)?;
        let bytes = fs::read(&target).map_err(|e| AppError::remote("read", remote, e))?;
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
        })
    }

    fn write_text(&self, remote: &str, text: &str) -> AppResult<()> {
        let target = self.resolve(remote)?;
        Self::ensure_parent(&target).map_err(|e| AppError::remote("write", remote, e))?;
        fs::write(&target, text).map_err(|e| AppError::remote("write", remote, e))?;
        Ok(())
    }

    fn exists(&self, remote: &str) -> bool {
        self.resolve(remote).is_ok_and(|p| p.is_file())
    }
}
