//! "Mailing" cells are hyperlinks to APA mailing pages on disk and plain
//! text while editing.

use super::SiteRoots;
use regex::Regex;
use std::sync::LazyLock;

static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?a\b[^>]*>").expect("valid anchor tag regex"));

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[&,]\s*").expect("valid separator regex"));

static POSTMAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*?)(\s*\(?\s*post-?\s*mailing\s*\)?)$").expect("valid postmailing regex")
});

static APA_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S.*?)\s+(\d+[A-Za-z]?)$").expect("valid mailing regex"));

/// On-disk form to display text: anchor markup stripped.
pub fn to_plain(cell: &str) -> String {
    ANCHOR_TAG.replace_all(cell, "").trim().to_string()
}

/// Display text to on-disk form. Each `&`/`,` separated mailing becomes a
/// link; separators and a trailing postmailing qualifier are kept verbatim.
pub fn to_linked(site: &SiteRoots, plain: &str) -> String {
    let plain = plain.trim();
    if plain.is_empty() || plain.contains('<') {
        return plain.to_string();
    }

    let mut out = String::new();
    let mut last = 0;
    for sep in SEPARATOR.find_iter(plain) {
        out.push_str(&link_one(site, &plain[last..sep.start()]));
        out.push_str(sep.as_str());
        last = sep.end();
    }
    out.push_str(&link_one(site, &plain[last..]));
    out
}

fn link_one(site: &SiteRoots, piece: &str) -> String {
    let (core, qualifier) = match POSTMAILING.captures(piece) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => (piece, ""),
    };

    let Some(caps) = APA_NUMBER.captures(core.trim()) else {
        return piece.to_string();
    };
    let apa = caps[1].trim();
    let number = &caps[2];
    let slug: String = apa.chars().filter(|c| !c.is_whitespace()).collect();

    format!(
        r#"<a href="{}/{slug}/{slug}{number}.html">{apa} {number}</a>{qualifier}"#,
        site.mailings
    )
}
