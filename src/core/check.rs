use crate::errors::AppResult;
use crate::lst::{DecodeIssue, SiteRoots, load_with_report, save_text, text_from_bytes};
use std::fs;
use std::path::Path;

/// Result of loading and re-serializing one LST file.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub rows: usize,
    pub columns: usize,
    pub issues: Vec<DecodeIssue>,
    /// The file already equals its own re-serialization
    pub canonical: bool,
    pub rewritten: bool,
}

pub struct CheckLogic;

impl CheckLogic {
    /// Load, re-save and compare. Encode or structure problems fail the whole
    /// check and leave the file untouched.
    pub fn apply(site: &SiteRoots, path: &Path, write: bool) -> AppResult<CheckReport> {
        let original = text_from_bytes(&fs::read(path)?);
        let outcome = load_with_report(site, &original);
        let text = save_text(site, &outcome.table)?;

        let canonical = normalize_newlines(&original) == text;
        let mut rewritten = false;
        if write && !canonical {
            fs::write(path, &text)?;
            rewritten = true;
            log::info!("rewrote {}", path.display());
        }

        Ok(CheckReport {
            rows: outcome.table.rows.len(),
            columns: outcome.table.num_cols(),
            issues: outcome.issues,
            canonical,
            rewritten,
        })
    }
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}
