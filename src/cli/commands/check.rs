use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::check::CheckLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Check { file, write } = cmd {
        let report = CheckLogic::apply(&cfg.site_roots(), Path::new(file), *write)?;

        info(format!("{} rows, {} columns", report.rows, report.columns));
        for issue in &report.issues {
            warning(format!(
                "line {}: '{}' could not be decoded ({})",
                issue.line, issue.packed, issue.reason
            ));
        }

        if report.canonical {
            success(format!("{file} is canonical"));
        } else if report.rewritten {
            success(format!("{file} rewritten in canonical form"));
        } else {
            warning(format!("{file} is not canonical (use --write to rewrite it)"));
        }
    }
    Ok(())
}
