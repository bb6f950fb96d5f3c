//! Append-only upload log.

use crate::errors::AppResult;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait UploadLog {
    fn append(&mut self, line: &str) -> AppResult<()>;
}

#[derive(Debug, Clone)]
pub struct FileUploadLog {
    path: PathBuf,
}

impl FileUploadLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole log contents; an absent file reads as empty.
    pub fn read_all(&self) -> AppResult<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        Ok(fs::read_to_string(&self.path)?)
    }
}

impl UploadLog for FileUploadLog {
    fn append(&mut self, line: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line.trim_end())?;
        Ok(())
    }
}

/// In-memory sink, handy when the lines are wanted rather than written.
impl UploadLog for Vec<String> {
    fn append(&mut self, line: &str) -> AppResult<()> {
        self.push(line.trim_end().to_string());
        Ok(())
    }
}
