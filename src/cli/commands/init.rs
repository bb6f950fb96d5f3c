use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the journal directory and the remote root
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rzinesync…");

    let cfg = Config::init_all(cli.remote.clone(), cli.test)?;

    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗂️  Journals    : {}", cfg.journal_dir);
    println!("📜 Upload log  : {}", cfg.upload_log);

    println!("🎉 rzinesync initialization completed!");
    Ok(())
}
