use crate::cli::parser::{Cli, Commands, DeltaAction};
use crate::config::Config;
use crate::core::delta::DeltaLogic;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use std::path::{Path, PathBuf};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Delta { dir, action } = &cli.command else {
        return Ok(());
    };

    let journal = journal_path(cli, cfg, dir);
    let logic = DeltaLogic::new(&journal, dir);

    match action {
        DeltaAction::Add { file, as_name } => logic.add(Path::new(file), as_name.as_deref()),
        DeltaAction::Del { name } => logic.delete(name),
        DeltaAction::Rename { old, new } => logic.rename(old, new),
        DeltaAction::Replace { old, file } => logic.replace(old, Path::new(file)),
        DeltaAction::List => logic.list(),
        DeltaAction::Clear => logic.clear(),
    }
}

/// `--journal` when given, else the per-directory journal under the config dir.
pub fn journal_path(cli: &Cli, cfg: &Config, dir: &str) -> PathBuf {
    match &cli.journal {
        Some(p) => expand_tilde(p),
        None => cfg.journal_file(dir),
    }
}
