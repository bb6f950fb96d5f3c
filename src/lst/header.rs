//! Column header vocabulary: historical spellings mapped to canonical names.

use crate::models::column::{ColumnDefinition, ColumnType};

/// Canonical name followed by the accepted spellings (lowercase, no whitespace).
const VOCABULARY: &[(&str, &[&str])] = &[
    ("Issue", &["issue", "issues"]),
    ("Title", &["title"]),
    ("Whole", &["whole", "wholenum", "whole#", "wholenumber", "wholeno"]),
    ("Vol", &["vol", "volume", "volnum", "vol#", "volno"]),
    ("Number", &["number", "num", "no", "no.", "#", "numnum", "issue#"]),
    ("Year", &["year", "yr"]),
    ("Month", &["month", "mo", "mon"]),
    ("Day", &["day"]),
    ("Pages", &["pages", "page", "pp", "pp.", "pgs"]),
    ("Notes", &["notes", "note", "comments", "comment"]),
    ("Mailing", &["mailing", "mailings", "apa", "apamailing", "apamailings"]),
    ("Editor", &["editor", "editors", "eds", "ed"]),
    ("Repro", &["repro", "reproduction"]),
    ("Type", &["type"]),
    ("Link", &["link", "url"]),
];

fn key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Canonical spelling of a header name, or `None` for unrecognized names.
pub fn lookup(name: &str) -> Option<&'static str> {
    let k = key(name);
    VOCABULARY
        .iter()
        .find(|(_, aliases)| aliases.contains(&k.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Canonical spelling of a header name; names outside the vocabulary are left untouched.
pub fn canonical_header(name: &str) -> String {
    match lookup(name) {
        Some(canonical) => canonical.to_string(),
        None => name.to_string(),
    }
}

pub fn column_type_for(canonical: &str) -> ColumnType {
    match canonical {
        "Filename" | "Issue" => ColumnType::RequiredStr,
        "Year" => ColumnType::Year,
        "Month" => ColumnType::Month,
        "Day" => ColumnType::Day,
        "Whole" | "Vol" | "Number" | "Pages" => ColumnType::Int,
        "Link" => ColumnType::Url,
        _ => ColumnType::Str,
    }
}

pub fn is_mailing_header(name: &str) -> bool {
    lookup(name) == Some("Mailing")
}

/// Parse an on-disk header line into column definitions, prepending the
/// synthetic identity column.
pub fn parse_header_line(line: &str) -> Vec<ColumnDefinition> {
    let mut columns = vec![ColumnDefinition::new("Filename", ColumnType::RequiredStr)];
    for raw in line.split(';') {
        let name = canonical_header(raw.trim());
        let col_type = column_type_for(&name);
        columns.push(ColumnDefinition::new(name, col_type));
    }
    columns
}

/// On-disk header line for a set of columns (identity column omitted).
pub fn header_line(columns: &[ColumnDefinition]) -> String {
    columns
        .iter()
        .skip(1)
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(";")
}
