//! Fixed-width text tables for CLI output.

use unicode_width::UnicodeWidthStr;

const MAX_WIDTH: usize = 40;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct TextTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Columns sized to their widest cell, capped at 40 display columns.
    pub fn auto(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let widest = rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.as_str()))
                    .max()
                    .unwrap_or(0);
                Column {
                    header: h.to_string(),
                    width: widest.max(UnicodeWidthStr::width(*h)).min(MAX_WIDTH),
                }
            })
            .collect();
        Self { columns, rows }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| pad(&c.header, c.width))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let rule: Vec<String> = self.columns.iter().map(|c| "-".repeat(c.width)).collect();
        out.push_str(&rule.join(" "));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, c)| pad(row.get(i).map(String::as_str).unwrap_or(""), c.width))
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        out
    }
}

/// Left-align `s` in `width` display columns, cutting it with an ellipsis when too long.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w <= width {
        return format!("{s}{}", " ".repeat(width - w));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw + 1 > width {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    used += 1;
    format!("{out}{}", " ".repeat(width.saturating_sub(used)))
}
