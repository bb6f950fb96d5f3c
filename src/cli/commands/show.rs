use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::show::ShowLogic;
use crate::errors::AppResult;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { file } = cmd {
        ShowLogic::print(&cfg.site_roots(), Path::new(file))?;
    }
    Ok(())
}
