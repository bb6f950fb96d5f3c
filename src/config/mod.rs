use crate::lst::SiteRoots;
use crate::utils::path::expand_tilde_str;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the directory tree that mirrors the remote fanzine store
    pub remote_root: String,
    #[serde(default = "default_fanzines_root")]
    pub fanzines_root: String,
    #[serde(default = "default_mailings_root")]
    pub mailings_root: String,
    #[serde(default = "default_editor_id")]
    pub editor_id: String,
    #[serde(default = "default_upload_log")]
    pub upload_log: String,
    #[serde(default = "default_journal_dir")]
    pub journal_dir: String,
    #[serde(default = "default_backup_on_upload")]
    pub backup_on_upload: bool,
}

fn default_fanzines_root() -> String {
    "https://fanac.org/fanzines".to_string()
}
fn default_mailings_root() -> String {
    "https://fanac.org/fanzines/APA_Mailings".to_string()
}
fn default_editor_id() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "editor".to_string())
}
fn default_upload_log() -> String {
    Config::config_dir()
        .join("upload.log")
        .to_string_lossy()
        .to_string()
}
fn default_journal_dir() -> String {
    Config::config_dir()
        .join("deltas")
        .to_string_lossy()
        .to_string()
}
fn default_backup_on_upload() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_root: Self::config_dir()
                .join("remote")
                .to_string_lossy()
                .to_string(),
            fanzines_root: default_fanzines_root(),
            mailings_root: default_mailings_root(),
            editor_id: default_editor_id(),
            upload_log: default_upload_log(),
            journal_dir: default_journal_dir(),
            backup_on_upload: default_backup_on_upload(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rzinesync")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rzinesync")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rzinesync.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> io::Result<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            io::Error::other(format!(
                "failed to parse configuration file {}: {e}",
                path.display()
            ))
        })
    }

    /// Resolve `~/` in every path field.
    pub fn expand_paths(&mut self) {
        self.remote_root = expand_tilde_str(&self.remote_root);
        self.upload_log = expand_tilde_str(&self.upload_log);
        self.journal_dir = expand_tilde_str(&self.journal_dir);
    }

    pub fn site_roots(&self) -> SiteRoots {
        SiteRoots::new(&self.fanzines_root, &self.mailings_root)
    }

    /// Journal file holding the pending deltas for one remote directory
    pub fn journal_file(&self, remote_dir: &str) -> PathBuf {
        let key: String = remote_dir
            .trim_matches('/')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        let key = if key.is_empty() { "_root".to_string() } else { key };
        PathBuf::from(&self.journal_dir).join(format!("{key}.json"))
    }

    /// Initialize configuration file and working directories
    pub fn init_all(remote_root: Option<String>, is_test: bool) -> io::Result<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Config::default();
        if let Some(root) = remote_root {
            let p = std::path::Path::new(&root);
            config.remote_root = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        fs::create_dir_all(&config.journal_dir)?;
        fs::create_dir_all(&config.remote_root)?;

        println!("✅ Remote root: {}", config.remote_root);

        Ok(config)
    }
}
