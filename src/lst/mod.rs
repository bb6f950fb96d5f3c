//! Legacy LST record format: packed first-column cells, header vocabulary,
//! mailing hyperlinks and whole-file load/save.

pub mod cell;
pub mod header;
pub mod mailing;
pub mod record;

pub use cell::{CellError, decode_cell, encode_cell, try_decode_cell};
pub use record::{
    DecodeIssue, LoadOutcome, load_bytes, load_text, load_with_report, save_text, text_from_bytes,
};

/// Site prefixes used to turn identifiers into hyperlinks and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoots {
    /// Root URL of the fanzines tree, without trailing slash
    pub fanzines: String,
    /// Root URL of the APA mailings pages, without trailing slash
    pub mailings: String,
}

impl Default for SiteRoots {
    fn default() -> Self {
        Self::new(
            "https://fanac.org/fanzines",
            "https://fanac.org/fanzines/APA_Mailings",
        )
    }
}

impl SiteRoots {
    pub fn new(fanzines: &str, mailings: &str) -> Self {
        Self {
            fanzines: fanzines.trim().trim_end_matches('/').to_string(),
            mailings: mailings.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Site-relative href for a path below the fanzines root.
    pub fn fanzines_href(&self, tail: &str) -> String {
        format!("{}/{}", self.fanzines, tail)
    }

    /// If `url` points inside the fanzines root (scheme and `www.` ignored),
    /// return the part after the root.
    pub fn strip_fanzines_root<'a>(&self, url: &'a str) -> Option<&'a str> {
        let root = format!("{}/", bare_host(&self.fanzines));
        strip_prefix_ci(bare_host(url), &root)
    }
}

/// Drop the `http(s)://` scheme and a leading `www.`.
fn bare_host(url: &str) -> &str {
    let mut s = url.trim();
    for scheme in ["https://", "http://"] {
        if let Some(rest) = strip_prefix_ci(s, scheme) {
            s = rest;
            break;
        }
    }
    strip_prefix_ci(s, "www.").unwrap_or(s)
}

/// ASCII case-insensitive `strip_prefix`.
pub(crate) fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

pub(crate) fn starts_with_ci(s: &str, prefix: &str) -> bool {
    strip_prefix_ci(s, prefix).is_some()
}
