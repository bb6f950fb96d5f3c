use crate::errors::AppResult;
use crate::lst::{SiteRoots, load_with_report, text_from_bytes};
use crate::models::table::Table;
use crate::ui::messages::{header, info, warning};
use crate::utils::table::TextTable;
use std::fs;
use std::path::Path;

pub struct ShowLogic;

impl ShowLogic {
    pub fn print(site: &SiteRoots, path: &Path) -> AppResult<()> {
        let bytes = fs::read(path)?;
        let outcome = load_with_report(site, &text_from_bytes(&bytes));
        let table = &outcome.table;

        header(if table.name.is_empty() {
            path.display().to_string()
        } else {
            table.name.clone()
        });

        if !table.editors.is_empty() {
            info(format!("Editors: {}", table.editors));
        }
        if !table.dates.is_empty() {
            info(format!("Dates  : {}", table.dates));
        }
        if !table.fanzine_type.is_empty() {
            info(format!("Type   : {}", table.fanzine_type));
        }
        for line in &table.preamble {
            println!("  {line}");
        }
        println!();

        print!("{}", render(table));

        for issue in &outcome.issues {
            warning(format!(
                "line {}: '{}' could not be decoded ({})",
                issue.line, issue.packed, issue.reason
            ));
        }
        Ok(())
    }
}

/// Issue table as text, with a leading row number and row kind.
pub fn render(table: &Table) -> String {
    let mut headers: Vec<&str> = vec!["#", "Kind"];
    headers.extend(table.columns.iter().map(|c| c.name.as_str()));

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = vec![(i + 1).to_string(), row.kind.as_str().to_string()];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect();

    TextTable::auto(&headers, rows).render()
}
