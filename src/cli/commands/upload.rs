use crate::cli::commands::delta::journal_path;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::sync::SyncLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Upload {
        dir,
        lst,
        keep_going,
    } = &cli.command
    {
        let journal = journal_path(cli, cfg, dir);
        let report = SyncLogic::upload(
            cfg,
            &journal,
            dir,
            lst.as_deref().map(Path::new),
            *keep_going,
        )?;
        info(format!("{} deltas applied in {dir}", report.applied.len()));
    }
    Ok(())
}
