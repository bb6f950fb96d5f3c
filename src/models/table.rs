use super::column::{ColumnDefinition, ColumnType};
use super::row::Row;
use serde::Serialize;

/// Number of leading columns that are never trimmed: identifier and display text.
pub const PROTECTED_COLUMNS: usize = 2;

/// In-memory issue table of one fanzine series.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub name: String,
    pub editors: String,
    pub dates: String,
    pub fanzine_type: String,
    pub preamble: Vec<String>,
    pub locale: Vec<String>,
    pub alphabetize_individually: bool,
    pub complete: bool,
    pub columns: Vec<ColumnDefinition>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Empty table with only the identity and display columns.
    pub fn new() -> Self {
        Self {
            columns: vec![
                ColumnDefinition::new("Filename", ColumnType::RequiredStr),
                ColumnDefinition::new("Issue", ColumnType::RequiredStr),
            ],
            ..Default::default()
        }
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn insert_column(&mut self, idx: usize, def: ColumnDefinition) {
        let idx = idx.min(self.columns.len());
        self.columns.insert(idx, def);
        for row in &mut self.rows {
            if row.cells.len() >= idx {
                row.cells.insert(idx, String::new());
            }
        }
        self.normalize_rows();
    }

    /// Remove a column and its cells. The identity and display columns cannot be removed.
    pub fn delete_column(&mut self, idx: usize) -> bool {
        if idx < PROTECTED_COLUMNS || idx >= self.columns.len() {
            return false;
        }
        self.columns.remove(idx);
        for row in &mut self.rows {
            if idx < row.cells.len() {
                row.cells.remove(idx);
            }
        }
        self.normalize_rows();
        true
    }

    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.num_cols());
        self.rows.push(row);
    }

    /// Restore `len(cells) == num_cols` on every row.
    pub fn normalize_rows(&mut self) {
        let n = self.num_cols();
        for row in &mut self.rows {
            row.resize(n);
        }
    }

    pub fn find_row_by_filename(&self, filename: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| !filename.is_empty() && r.source_identifier() == filename)
    }

    /// Drop wholly empty columns from the right, never below the protected ones.
    pub fn trim_empty_columns(&mut self) {
        while self.columns.len() > PROTECTED_COLUMNS {
            let last = self.columns.len() - 1;
            let has_data = self
                .rows
                .iter()
                .any(|r| !r.cell(last).trim().is_empty());
            if has_data {
                break;
            }
            self.columns.pop();
            for row in &mut self.rows {
                row.cells.truncate(last);
            }
        }
    }

    /// Drop wholly empty rows from the bottom.
    pub fn trim_empty_rows(&mut self) {
        while self.rows.last().is_some_and(Row::is_blank) {
            self.rows.pop();
        }
    }
}
