use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verb {
    Add,
    Delete,
    Rename,
    Replace,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Add => "add",
            Verb::Delete => "delete",
            Verb::Rename => "rename",
            Verb::Replace => "replace",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pending remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub verb: Verb,
    /// Identity key: the local file backing an Add, or the remote name acted on
    pub source_filename: String,
    /// Local file to upload (Add/Replace)
    #[serde(default)]
    pub source_path: PathBuf,
    /// Target remote name (rename target, renamed-on-add, replacement name)
    #[serde(default)]
    pub new_source_filename: String,
    #[serde(default)]
    pub uploaded: bool,
}

impl Delta {
    pub fn add(source_path: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            verb: Verb::Add,
            source_filename: filename.into(),
            source_path,
            new_source_filename: String::new(),
            uploaded: false,
        }
    }

    pub fn delete(filename: impl Into<String>) -> Self {
        Self {
            verb: Verb::Delete,
            source_filename: filename.into(),
            source_path: PathBuf::new(),
            new_source_filename: String::new(),
            uploaded: false,
        }
    }

    pub fn rename(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            verb: Verb::Rename,
            source_filename: old.into(),
            source_path: PathBuf::new(),
            new_source_filename: new.into(),
            uploaded: false,
        }
    }

    pub fn replace(old: impl Into<String>, local: PathBuf, new: impl Into<String>) -> Self {
        Self {
            verb: Verb::Replace,
            source_filename: old.into(),
            source_path: local,
            new_source_filename: new.into(),
            uploaded: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.uploaded
    }

    /// Name the file carries on the remote once this delta has been applied.
    pub fn target_name(&self) -> &str {
        match self.verb {
            Verb::Add => {
                if self.new_source_filename.is_empty() {
                    &self.source_filename
                } else {
                    &self.new_source_filename
                }
            }
            Verb::Rename | Verb::Replace => &self.new_source_filename,
            Verb::Delete => &self.source_filename,
        }
    }

    pub fn describe(&self) -> String {
        match self.verb {
            Verb::Add => format!(
                "add {} as {}",
                self.source_path.display(),
                self.target_name()
            ),
            Verb::Delete => format!("delete {}", self.source_filename),
            Verb::Rename => format!(
                "rename {} -> {}",
                self.source_filename, self.new_source_filename
            ),
            Verb::Replace => format!(
                "replace {} with {} as {}",
                self.source_filename,
                self.source_path.display(),
                self.new_source_filename
            ),
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
