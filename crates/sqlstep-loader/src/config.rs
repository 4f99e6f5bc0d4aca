use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sqlstep_config::{CONFIG_FILE_NAME, SqlstepConfig};

/// Load sqlstep.json config from current directory.
pub fn load_config() -> Result<SqlstepConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE_NAME} not found. Run 'sqlstep init' first.");
    }

    read_config(&path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<SqlstepConfig> {
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE_NAME} not found at: {}", path.display());
    }

    read_config(&path)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<SqlstepConfig> {
    let config_path = if let Some(root) = project_root {
        root.join(CONFIG_FILE_NAME)
    } else {
        PathBuf::from(CONFIG_FILE_NAME)
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        Ok(SqlstepConfig::default())
    }
}

fn read_config(path: &Path) -> Result<SqlstepConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: SqlstepConfig =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}
