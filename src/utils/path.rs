//! `~/` expansion for paths taken from the config file or the command line.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Same as `expand_tilde`, back as a string for the config fields.
pub fn expand_tilde_str(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}
