use crate::errors::{AppError, AppResult};
use crate::lst::{SiteRoots, load_bytes};
use crate::models::table::Table;
use crate::ui::messages::{info, warning};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the issue table of an LST file.
    ///
    /// - `format`: "csv" | "json"
    /// - `file`: output path
    pub fn export(
        site: &SiteRoots,
        lst: &Path,
        format: &str,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let fmt = format.to_lowercase();
        if !["csv", "json"].contains(&fmt.as_str()) {
            return Err(AppError::Config(format!(
                "Unsupported format '{format}'. Use one of: csv, json"
            )));
        }

        let path = Path::new(file);
        ensure_writable(path, force)?;

        let table = load_bytes(site, &fs::read(lst)?);
        if table.rows.is_empty() {
            warning("No rows found. Nothing to export.");
            return Ok(());
        }

        match fmt.as_str() {
            "csv" => export_csv(&table, path)?,
            _ => export_json(&table, path)?,
        }
        Ok(())
    }
}

/// Existing files are overwritten only with `force` or after confirmation.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::NothingToDo(
            "export cancelled, existing file not overwritten".into(),
        ))
    }
}

fn export_csv(table: &Table, path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(table.columns.iter().map(|c| c.name.as_str()))?;
    for row in &table.rows {
        wtr.write_record(&row.cells)?;
    }
    wtr.flush()?;

    println!("✅ Exported {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

fn export_json(table: &Table, path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(table)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;

    println!("✅ Exported {} rows to {}", table.rows.len(), path.display());
    Ok(())
}
