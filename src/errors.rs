//! Unified application error type.
//! All modules (lst, core, remote, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // LST codec
    // ---------------------------
    #[error("Cannot decode cell '{0}'")]
    Decode(String),

    #[error("Row {row} cannot be serialized: {reason}")]
    Encode { row: usize, reason: String },

    #[error("Table structure error: {0}")]
    Structure(String),

    // ---------------------------
    // Remote store
    // ---------------------------
    #[error("Remote {op} failed for '{path}': {reason}")]
    Remote {
        op: &'static str,
        path: String,
        reason: String,
    },

    #[error("Invalid remote path: {0}")]
    InvalidPath(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Nothing to do: {0}")]
    NothingToDo(String),
}

impl AppError {
    pub fn remote(op: &'static str, path: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Remote {
            op,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
