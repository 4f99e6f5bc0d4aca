use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use sqlstep_config::{CONFIG_FILE_NAME, SqlstepConfig};

pub fn cmd_init() -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{CONFIG_FILE_NAME} already exists");
    }

    let config = SqlstepConfig::default();
    let json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    fs::write(&path, json).with_context(|| format!("write {CONFIG_FILE_NAME}"))?;
    println!("created {:?}", path);
    Ok(())
}
