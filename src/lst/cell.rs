//! Packing of the first two table columns (source identifier, display text)
//! into the single legacy first column, and back.
//!
//! Both directions are ordered rule tables: the first rule whose predicate
//! matches is applied, so earlier, more specific rules shadow later ones.

use super::{SiteRoots, starts_with_ci, strip_prefix_ci};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("more than one '>' separator in '{0}'")]
    AmbiguousSeparator(String),

    #[error("no decode rule matches '{0}'")]
    Undecodable(String),

    #[error("no encode rule matches identifier '{0}'")]
    Unencodable(String),
}

/// `(source identifier, display text)`
pub type CellPair = (String, String);

struct DecodeRule {
    name: &'static str,
    matches: fn(&SiteRoots, &str) -> bool,
    apply: fn(&SiteRoots, &str) -> Result<CellPair, CellError>,
}

struct EncodeRule {
    name: &'static str,
    matches: fn(&SiteRoots, &str, &str) -> bool,
    apply: fn(&SiteRoots, &str, &str) -> String,
}

static HREF_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)^<a\s+href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))[^>]*>(.*?)(?:</a>)?\s*$"#,
    )
    .expect("valid href anchor regex")
});

static NAME_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(<a\s+name\s*=[^>]*>(?:\s*</a>)?)>?(.*)$").expect("valid name anchor regex")
});

static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*://|mailto:)").expect("valid scheme regex")
});

// ---------------------------
// Decode rules
// ---------------------------

const DECODE_RULES: &[DecodeRule] = &[
    DecodeRule {
        name: "separators-only",
        matches: |_, s| s.chars().all(|c| c == '>' || c == ';' || c.is_whitespace()),
        apply: |_, _| Ok((String::new(), String::new())),
    },
    DecodeRule {
        name: "fanzines-href",
        matches: |site, s| href_parts(s).is_some_and(|(url, _)| is_http(&url) && site.strip_fanzines_root(&url).is_some()),
        apply: decode_fanzines_href,
    },
    DecodeRule {
        name: "plain-separator",
        matches: |_, s| !s.starts_with('<'),
        apply: decode_plain,
    },
    DecodeRule {
        name: "name-anchor",
        matches: |_, s| NAME_ANCHOR.is_match(s),
        apply: decode_name_anchor,
    },
    DecodeRule {
        name: "external-href",
        matches: |_, s| href_parts(s).is_some_and(|(url, _)| url.contains("://")),
        apply: decode_external_href,
    },
    DecodeRule {
        name: "tag-span",
        matches: |_, s| tag_span_end(s).is_some(),
        apply: decode_tag_span,
    },
];

/// Decode a packed first-column cell. Failures are logged and yield an empty
/// pair so a table load can continue with a degraded row.
pub fn decode_cell(site: &SiteRoots, packed: &str) -> CellPair {
    match try_decode_cell(site, packed) {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("LST decode failure: {e}");
            (String::new(), String::new())
        }
    }
}

pub fn try_decode_cell(site: &SiteRoots, packed: &str) -> Result<CellPair, CellError> {
    let s = packed.trim();
    match DECODE_RULES.iter().find(|r| (r.matches)(site, s)) {
        Some(rule) => (rule.apply)(site, s),
        None => Err(CellError::Undecodable(s.to_string())),
    }
}

/// Name of the decode rule that would handle `packed`, if any.
pub fn decode_rule_name(site: &SiteRoots, packed: &str) -> Option<&'static str> {
    let s = packed.trim();
    DECODE_RULES
        .iter()
        .find(|r| (r.matches)(site, s))
        .map(|r| r.name)
}

fn decode_fanzines_href(site: &SiteRoots, s: &str) -> Result<CellPair, CellError> {
    let (url, text) = href_parts(s).ok_or_else(|| CellError::Undecodable(s.to_string()))?;
    let tail = site
        .strip_fanzines_root(&url)
        .ok_or_else(|| CellError::Undecodable(s.to_string()))?;
    Ok((tail.trim().to_string(), text))
}

fn decode_plain(_: &SiteRoots, s: &str) -> Result<CellPair, CellError> {
    let collapsed = s.replace(">>", ">");
    let seps = bare_separators(&collapsed);
    match seps.as_slice() {
        [] => Ok((String::new(), collapsed.trim().to_string())),
        [pos] => Ok((
            collapsed[..*pos].trim().to_string(),
            collapsed[pos + 1..].trim().to_string(),
        )),
        _ => Err(CellError::AmbiguousSeparator(s.to_string())),
    }
}

fn decode_name_anchor(_: &SiteRoots, s: &str) -> Result<CellPair, CellError> {
    let caps = NAME_ANCHOR
        .captures(s)
        .ok_or_else(|| CellError::Undecodable(s.to_string()))?;
    Ok((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

fn decode_external_href(_: &SiteRoots, s: &str) -> Result<CellPair, CellError> {
    href_parts(s).ok_or_else(|| CellError::Undecodable(s.to_string()))
}

fn decode_tag_span(_: &SiteRoots, s: &str) -> Result<CellPair, CellError> {
    let end = tag_span_end(s).ok_or_else(|| CellError::Undecodable(s.to_string()))?;
    Ok((s[..end].trim().to_string(), s[end..].trim().to_string()))
}

// ---------------------------
// Encode rules
// ---------------------------

const ENCODE_RULES: &[EncodeRule] = &[
    EncodeRule {
        name: "text-only",
        matches: |_, id, _| id.is_empty(),
        // Markup at the start would read back as an identifier
        apply: |_, _, text| {
            if text.starts_with('<') {
                format!(">{text}")
            } else {
                text.to_string()
            }
        },
    },
    EncodeRule {
        name: "plain-separator",
        matches: |_, id, text| {
            !has_path_separator(id) && !id.contains(['<', '>']) && !text.contains(['<', '>'])
        },
        apply: |_, id, text| format!("{id}>{text}"),
    },
    EncodeRule {
        name: "external-url",
        matches: |_, id, _| URL_SCHEME.is_match(id),
        apply: |_, id, text| format!(r#"<a href="{id}">{text}"#),
    },
    EncodeRule {
        name: "site-file",
        matches: |_, id, _| {
            !id.starts_with('<') && !id.starts_with("../") && Path::new(id).extension().is_some()
        },
        apply: |site, id, text| format!(r#"<a href="{}">{text}"#, site.fanzines_href(id)),
    },
    EncodeRule {
        name: "site-directory",
        matches: |_, id, _| !id.contains('<') && !id.starts_with("../") && id.ends_with('/'),
        apply: |site, id, text| format!(r#"<a href="{}">{text}"#, site.fanzines_href(id)),
    },
    EncodeRule {
        name: "name-anchor",
        matches: |_, id, _| starts_with_ci(id, "<a name="),
        apply: |_, id, text| format!("{id}{text}"),
    },
    EncodeRule {
        name: "decorative-line",
        matches: |_, id, text| text.is_empty() && tag_span_end(id) == Some(id.len()),
        apply: |_, id, _| format!("{id};"),
    },
    EncodeRule {
        name: "parent-relative",
        matches: |_, id, _| id.starts_with("../"),
        apply: |site, id, text| {
            let mut rest = id;
            while let Some(r) = rest.strip_prefix("../") {
                rest = r;
            }
            format!(r#"<a href="{}">{text}"#, site.fanzines_href(rest))
        },
    },
    EncodeRule {
        name: "formed-markup",
        matches: |_, id, _| starts_with_ci(id, "<a ") || tag_span_end(id) == Some(id.len()),
        apply: |_, id, text| {
            if text.is_empty() {
                id.to_string()
            } else {
                format!("{id} {text}")
            }
        },
    },
    EncodeRule {
        name: "site-name",
        matches: |_, id, _| !id.contains('<'),
        apply: |site, id, text| format!(r#"<a href="{}">{text}"#, site.fanzines_href(id)),
    },
];

/// Pack identifier and display text into the legacy first column.
pub fn encode_cell(site: &SiteRoots, identifier: &str, text: &str) -> Result<String, CellError> {
    let id = identifier.trim();
    let text = text.trim();
    match ENCODE_RULES.iter().find(|r| (r.matches)(site, id, text)) {
        Some(rule) => Ok((rule.apply)(site, id, text)),
        None => {
            log::warn!("LST encode failure: identifier '{id}' matches no rule");
            Err(CellError::Unencodable(id.to_string()))
        }
    }
}

/// Name of the encode rule that would handle the pair, if any.
pub fn encode_rule_name(site: &SiteRoots, identifier: &str, text: &str) -> Option<&'static str> {
    let id = identifier.trim();
    let text = text.trim();
    ENCODE_RULES
        .iter()
        .find(|r| (r.matches)(site, id, text))
        .map(|r| r.name)
}

// ---------------------------
// Helpers
// ---------------------------

/// `(url, text)` of an `<a href=...>text(</a>)?` cell.
fn href_parts(s: &str) -> Option<CellPair> {
    let caps = HREF_ANCHOR.captures(s)?;
    let url = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .trim()
        .to_string();
    let text = caps.get(4).map(|m| m.as_str().trim()).unwrap_or("");
    Some((url, text.to_string()))
}

fn is_http(url: &str) -> bool {
    starts_with_ci(url, "http://") || starts_with_ci(url, "https://")
}

fn has_path_separator(id: &str) -> bool {
    id.contains(['/', '\\'])
}

/// Byte offsets of every `>` that does not close a `<...` tag.
fn bare_separators(s: &str) -> Vec<usize> {
    let mut in_tag = false;
    let mut out = Vec::new();
    for (i, c) in s.char_indices() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            '>' => out.push(i),
            _ => {}
        }
    }
    out
}

/// End offset of the leading balanced span of `s`: `<tag ...>...</tag>` when
/// the closing tag exists, otherwise the opening tag alone.
pub(crate) fn tag_span_end(s: &str) -> Option<usize> {
    if !s.starts_with('<') {
        return None;
    }
    let open_end = s.find('>')? + 1;
    let name: String = s[1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        return Some(open_end);
    }

    let closing = format!("</{name}>");
    let rest = &s[open_end..];
    let mut offset = 0;
    while let Some(pos) = rest[offset..].find("</") {
        let at = offset + pos;
        if strip_prefix_ci(&rest[at..], &closing).is_some() {
            return Some(open_end + at + closing.len());
        }
        offset = at + 2;
    }
    Some(open_end)
}
