use std::fs;
use std::path::Path;

use anyhow::{Ok, Result};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{default_config_json, CONFIG_FILE_NAME};

pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(CommandResult::new(CommandSummary::Init(InitSummary {
        created: true,
    })))
}
