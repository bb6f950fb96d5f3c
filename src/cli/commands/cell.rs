use crate::cli::parser::{CellAction, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::lst::cell::{decode_rule_name, encode_rule_name};
use crate::lst::{encode_cell, try_decode_cell};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Cell { action } = cmd else {
        return Ok(());
    };
    let site = cfg.site_roots();

    match action {
        CellAction::Decode { packed } => {
            let (id, text) =
                try_decode_cell(&site, packed).map_err(|e| AppError::Decode(e.to_string()))?;
            println!("rule: {}", decode_rule_name(&site, packed).unwrap_or("-"));
            println!("id:   {id}");
            println!("text: {text}");
        }
        CellAction::Encode { identifier, text } => {
            let packed = encode_cell(&site, identifier, text).map_err(|e| AppError::Encode {
                row: 1,
                reason: e.to_string(),
            })?;
            println!("rule: {}", encode_rule_name(&site, identifier, text).unwrap_or("-"));
            println!("{packed}");
        }
    }
    Ok(())
}
