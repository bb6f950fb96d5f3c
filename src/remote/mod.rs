//! Remote fanzine store: the narrow contract the upload session talks to.

pub mod local;
pub mod log;

pub use local::LocalDirStore;
pub use self::log::{FileUploadLog, UploadLog};

use crate::errors::AppResult;
use std::path::Path;

/// File operations on the remote tree. Paths are `/` separated and relative
/// to the store root.
pub trait RemoteStore {
    fn put_file(&self, local: &Path, remote: &str) -> AppResult<()>;
    fn delete_file(&self, remote: &str) -> AppResult<()>;
    fn rename(&self, old: &str, new: &str) -> AppResult<()>;
    fn read_text(&self, remote: &str) -> AppResult<String>;
    fn write_text(&self, remote: &str, text: &str) -> AppResult<()>;
    fn exists(&self, remote: &str) -> bool;
}

/// `dir/name`, tolerating empty or slash-terminated directories.
pub fn remote_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_matches('/');
    let name = name.trim_start_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
