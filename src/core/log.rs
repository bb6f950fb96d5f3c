use crate::config::Config;
use crate::errors::AppResult;
use crate::remote::FileUploadLog;
use crate::ui::messages::info;
use ansi_term::Colour;

/// Colour of a log line by its verb
fn color_for_verb(verb: &str) -> Colour {
    match verb {
        "add" => Colour::Green,
        "delete" => Colour::Red,
        "rename" => Colour::Yellow,
        "replace" => Colour::Purple,
        "save" => Colour::Blue,
        _ => Colour::White,
    }
}

/// `{ts} [{editor}] {verb} ...` -> verb
fn verb_of(line: &str) -> Option<&str> {
    let after_editor = line.split_once("] ")?.1;
    after_editor.split_whitespace().next()
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(cfg: &Config) -> AppResult<()> {
        let log = FileUploadLog::new(&cfg.upload_log);
        let content = log.read_all()?;

        if content.trim().is_empty() {
            info(format!("Upload log {} is empty", log.path().display()));
            return Ok(());
        }

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let colour = verb_of(line).map_or(Colour::White, color_for_verb);
            println!("{}", colour.paint(line));
        }
        Ok(())
    }
}
