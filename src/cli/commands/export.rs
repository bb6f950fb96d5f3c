use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        file,
        format,
        out,
        force,
    } = cmd
    {
        ExportLogic::export(&cfg.site_roots(), Path::new(file), format, out, *force)?;
    }
    Ok(())
}
