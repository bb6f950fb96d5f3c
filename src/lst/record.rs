//! Whole-file LST load and save.
//!
//! Layout of an LST file:
//!
//! ```text
//! Name;Editors;Dates;Type
//!
//! <p>free text preamble</p>
//!
//! <locale>...</locale>
//!
//! <!-- fanac-instructions: Alphabetize individually -->
//!
//! Issue;Year;Pages;Notes
//! issue1.pdf>Issue 1;1950;12;
//! ```

use super::cell::{encode_cell, try_decode_cell};
use super::header::{header_line, parse_header_line};
use super::{SiteRoots, mailing, strip_prefix_ci};
use crate::errors::{AppError, AppResult};
use crate::models::column::ColumnDefinition;
use crate::models::row::{Row, RowKind};
use crate::models::table::Table;
use regex::Regex;
use std::sync::LazyLock;

/// Fewest on-disk columns a header line may have and still be recognized on reload.
const MIN_DISK_COLUMNS: usize = 3;
const LOCALE_OPEN: &str = "<locale>";
const LOCALE_CLOSE: &str = "</locale>";
const ALPHABETIZE_DIRECTIVE: &str = "Alphabetize individually";
const COMPLETE_DIRECTIVE: &str = "Complete";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<!--\s*fanac-instructions:\s*(.*?)\s*-->$").expect("valid directive regex")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// A first-column cell that could not be decoded during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeIssue {
    /// 1-based line number in the source text
    pub line: usize,
    pub packed: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: Table,
    pub issues: Vec<DecodeIssue>,
}

enum Section {
    Preamble,
    Locale,
    Rows,
}

/// Raw file bytes as text, falling back to Latin-1 when they are not UTF-8.
pub fn text_from_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            log::info!("LST text is not valid UTF-8, reading it as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

pub fn load_bytes(site: &SiteRoots, bytes: &[u8]) -> Table {
    load_text(site, &text_from_bytes(bytes))
}

pub fn load_text(site: &SiteRoots, raw: &str) -> Table {
    load_with_report(site, raw).table
}

/// Parse LST text. Undecodable first-column cells are logged, reported and
/// replaced by an empty pair; the rest of the table still loads.
pub fn load_with_report(site: &SiteRoots, raw: &str) -> LoadOutcome {
    let mut table = Table::new();
    let mut issues = Vec::new();
    let mut section = Section::Preamble;
    let mut seen_series_line = false;

    for (line_no, line) in collapse_blank_runs(raw) {
        let trimmed = line.trim();

        if !seen_series_line {
            if trimmed.is_empty() {
                continue;
            }
            parse_series_line(&mut table, trimmed);
            seen_series_line = true;
            continue;
        }

        if let Some(caps) = DIRECTIVE.captures(trimmed) {
            apply_directive(&mut table, &caps[1]);
            continue;
        }

        match section {
            Section::Preamble => {
                if trimmed.is_empty() {
                    continue;
                }
                if let Some(rest) = strip_prefix_ci(trimmed, LOCALE_OPEN) {
                    section = Section::Locale;
                    if take_locale_line(&mut table, rest) {
                        section = Section::Preamble;
                    }
                    continue;
                }
                if is_header_line(trimmed) {
                    table.columns = parse_header_line(trimmed);
                    section = Section::Rows;
                    continue;
                }
                let text = strip_paragraph(trimmed);
                if !text.is_empty() {
                    table.preamble.push(text);
                }
            }
            Section::Locale => {
                if take_locale_line(&mut table, line) {
                    section = Section::Preamble;
                }
            }
            Section::Rows => {
                if trimmed.is_empty() {
                    continue;
                }
                let row = parse_row(site, &mut table, trimmed, line_no, &mut issues);
                table.rows.push(row);
            }
        }
    }

    table.normalize_rows();
    convert_mailings(&mut table, mailing::to_plain);
    for row in &mut table.rows {
        row.kind = RowKind::classify(&row.cells);
    }

    LoadOutcome { table, issues }
}

/// Serialize a table. The text is produced only when every row encodes, so a
/// failed save never yields partial output.
pub fn save_text(site: &SiteRoots, table: &Table) -> AppResult<String> {
    let mut t = table.clone();
    t.normalize_rows();
    t.trim_empty_columns();
    t.trim_empty_rows();

    // The packed first column holds two table columns.
    let disk_columns = t.num_cols() - 1;
    if disk_columns < MIN_DISK_COLUMNS {
        return Err(AppError::Structure(format!(
            "only {disk_columns} columns remain after trimming, at least {MIN_DISK_COLUMNS} are required"
        )));
    }
    if t.rows.is_empty() {
        return Err(AppError::Structure("the table has no rows".into()));
    }

    convert_mailings(&mut t, |cell| mailing::to_linked(site, cell));
    for row in &mut t.rows {
        row.kind = RowKind::classify(&row.cells);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{};{};{};{}\n\n",
        t.name.trim(),
        t.editors.trim(),
        t.dates.trim(),
        t.fanzine_type.trim()
    ));

    let preamble: Vec<&String> = t.preamble.iter().filter(|l| !l.trim().is_empty()).collect();
    if !preamble.is_empty() {
        for line in preamble {
            out.push_str(&format!("<p>{}</p>\n", line.trim()));
        }
        out.push('\n');
    }

    match t.locale.len() {
        0 => {}
        1 => out.push_str(&format!("{LOCALE_OPEN}{}{LOCALE_CLOSE}\n\n", t.locale[0])),
        _ => {
            out.push_str(LOCALE_OPEN);
            out.push('\n');
            for line in &t.locale {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(LOCALE_CLOSE);
            out.push_str("\n\n");
        }
    }

    if t.alphabetize_individually || t.complete {
        if t.alphabetize_individually {
            out.push_str(&directive_line(ALPHABETIZE_DIRECTIVE));
        }
        if t.complete {
            out.push_str(&directive_line(COMPLETE_DIRECTIVE));
        }
        out.push('\n');
    }

    out.push_str(&header_line(&t.columns));
    out.push('\n');

    for (idx, row) in t.rows.iter().enumerate() {
        let line = row_line(site, row).map_err(|e| AppError::Encode {
            row: idx + 1,
            reason: e.to_string(),
        })?;
        out.push_str(&line);
        out.push('\n');
    }

    Ok(out)
}

fn row_line(site: &SiteRoots, row: &Row) -> Result<String, super::CellError> {
    let packed = encode_cell(site, row.source_identifier(), row.display_text())?;

    let decorative = matches!(row.kind, RowKind::TextLine | RowKind::LinkLine);
    if decorative && row.trailing_cells_empty() {
        return Ok(packed);
    }

    let rest = row
        .cells
        .iter()
        .skip(2)
        .map(|c| c.trim())
        .collect::<Vec<_>>()
        .join(";");
    if packed.ends_with(';') {
        Ok(format!("{packed}{rest}"))
    } else {
        Ok(format!("{packed};{rest}"))
    }
}

fn directive_line(directive: &str) -> String {
    format!("<!-- fanac-instructions: {directive} -->\n")
}

/// Lines with their 1-based number, line ends trimmed, runs of blank lines
/// reduced to one.
fn collapse_blank_runs(raw: &str) -> Vec<(usize, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut out: Vec<(usize, &str)> = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim_end();
        let blank = line.is_empty();
        if blank && out.last().is_some_and(|(_, prev)| prev.is_empty()) {
            continue;
        }
        out.push((idx + 1, line));
    }
    out
}

fn parse_series_line(table: &mut Table, line: &str) {
    let mut fields = line.splitn(4, ';').map(|f| f.trim().to_string());
    table.name = fields.next().unwrap_or_default();
    table.editors = fields.next().unwrap_or_default();
    table.dates = fields.next().unwrap_or_default();
    table.fanzine_type = fields.next().unwrap_or_default();
}

fn apply_directive(table: &mut Table, body: &str) {
    for part in body.split(';').map(str::trim) {
        if part.eq_ignore_ascii_case(ALPHABETIZE_DIRECTIVE) {
            table.alphabetize_individually = true;
        } else if part.eq_ignore_ascii_case(COMPLETE_DIRECTIVE) {
            table.complete = true;
        } else if !part.is_empty() {
            log::debug!("ignoring unknown LST directive '{part}'");
        }
    }
}

/// Consume one line of a locale block; returns true when the block closed.
fn take_locale_line(table: &mut Table, line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    match lower.find(LOCALE_CLOSE) {
        Some(pos) => {
            let inner = line[..pos].trim_end();
            if !inner.trim().is_empty() {
                table.locale.push(inner.to_string());
            }
            true
        }
        None => {
            if !line.trim().is_empty() {
                table.locale.push(line.to_string());
            }
            false
        }
    }
}

/// Column header heuristic: not markup, and at least three `;`/`>`
/// separated segments once tags are removed.
fn is_header_line(line: &str) -> bool {
    if line.starts_with('<') {
        return false;
    }
    let stripped = ANY_TAG.replace_all(line, "");
    stripped.split([';', '>']).count() >= MIN_DISK_COLUMNS
}

fn strip_paragraph(line: &str) -> String {
    let mut s = line.trim();
    if let Some(rest) = strip_prefix_ci(s, "<p>") {
        s = rest;
    }
    let cut = s.len().saturating_sub(4);
    if let Some(tail) = s.get(cut..)
        && tail.eq_ignore_ascii_case("</p>")
    {
        s = &s[..cut];
    }
    s.trim().to_string()
}

fn parse_row(
    site: &SiteRoots,
    table: &mut Table,
    line: &str,
    line_no: usize,
    issues: &mut Vec<DecodeIssue>,
) -> Row {
    let mut parts = line.split(';');
    let packed = parts.next().unwrap_or("");

    let (id, text) = match try_decode_cell(site, packed) {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("LST line {line_no}: {e}");
            issues.push(DecodeIssue {
                line: line_no,
                packed: packed.to_string(),
                reason: e.to_string(),
            });
            (String::new(), String::new())
        }
    };

    let mut cells = vec![id, text];
    cells.extend(parts.map(|p| p.trim().to_string()));

    // Extra cells get unnamed columns rather than being dropped.
    while cells.len() > table.num_cols() {
        table.columns.push(ColumnDefinition::plain(""));
    }
    let mut row = Row::from_cells(cells);
    row.resize(table.num_cols());
    row
}

fn convert_mailings(table: &mut Table, convert: impl Fn(&str) -> String) {
    let mailing_cols: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .skip(2)
        .filter(|(_, c)| c.is_mailing())
        .map(|(i, _)| i)
        .collect();

    for row in &mut table.rows {
        for &idx in &mailing_cols {
            if let Some(cell) = row.cells.get_mut(idx) {
                *cell = convert(cell);
            }
        }
    }
}
