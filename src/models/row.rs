use serde::Serialize;

/// What a line of the issue table represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowKind {
    /// A real issue backed by a file
    Normal,
    /// Decorative separator: tag span, named anchor or bare text
    TextLine,
    /// An arbitrary external URL with no other data
    LinkLine,
    /// Placeholder with no content at all
    Empty,
}

impl RowKind {
    /// Classify a freshly decoded row from its cells (column 0 = identifier,
    /// column 1 = display text).
    pub fn classify(cells: &[String]) -> Self {
        let id = cells.first().map(|s| s.trim()).unwrap_or("");
        let text = cells.get(1).map(|s| s.trim()).unwrap_or("");
        let rest_empty = cells.iter().skip(2).all(|c| c.trim().is_empty());

        if id.is_empty() && text.is_empty() && rest_empty {
            return RowKind::Empty;
        }
        if id.starts_with('<') {
            return RowKind::TextLine;
        }
        if rest_empty {
            let lower = id.to_ascii_lowercase();
            if lower.starts_with("http:") || lower.starts_with("https:") {
                return RowKind::LinkLine;
            }
            if id.is_empty() {
                return RowKind::TextLine;
            }
        }
        RowKind::Normal
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Normal => "normal",
            RowKind::TextLine => "text",
            RowKind::LinkLine => "link",
            RowKind::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub kind: RowKind,
}

impl Row {
    /// Build a row from already decoded cells, classifying it.
    pub fn from_cells(cells: Vec<String>) -> Self {
        let kind = RowKind::classify(&cells);
        Self { cells, kind }
    }

    pub fn empty(num_cols: usize) -> Self {
        Self {
            cells: vec![String::new(); num_cols],
            kind: RowKind::Empty,
        }
    }

    pub fn source_identifier(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }

    pub fn display_text(&self) -> &str {
        self.cells.get(1).map(String::as_str).unwrap_or("")
    }

    pub fn set_source_identifier(&mut self, value: impl Into<String>) {
        self.ensure_len(1);
        self.cells[0] = value.into();
    }

    pub fn set_display_text(&mut self, value: impl Into<String>) {
        self.ensure_len(2);
        self.cells[1] = value.into();
    }

    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    /// True when every column after identifier/display text is blank
    pub fn trailing_cells_empty(&self) -> bool {
        self.cells.iter().skip(2).all(|c| c.trim().is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    /// Pad or truncate to exactly `num_cols` cells.
    pub fn resize(&mut self, num_cols: usize) {
        self.cells.resize(num_cols, String::new());
    }

    fn ensure_len(&mut self, n: usize) {
        if self.cells.len() < n {
            self.cells.resize(n, String::new());
        }
    }
}
