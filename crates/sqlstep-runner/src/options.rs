use std::path::{Path, PathBuf};

use sqlstep_config::{DEFAULT_LEGACY_VERSION_TABLE, DEFAULT_VERSION_TABLE, SqlstepConfig};
use sqlstep_core::EngineVariant;

/// Settings for [`run_migrations`](crate::run_migrations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    pub scripts_dir: PathBuf,
    /// `false` for a database created just now, which installs every script.
    pub existing_database: bool,
    pub variant: EngineVariant,
    pub version_table: String,
    pub legacy_version_table: String,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("scripts"),
            existing_database: true,
            variant: EngineVariant::default(),
            version_table: DEFAULT_VERSION_TABLE.to_string(),
            legacy_version_table: DEFAULT_LEGACY_VERSION_TABLE.to_string(),
        }
    }
}

impl MigrationOptions {
    pub fn from_config(config: &SqlstepConfig, project_root: &Path, existing_database: bool) -> Self {
        Self {
            scripts_dir: project_root.join(config.scripts_dir()),
            existing_database,
            variant: config.variant(),
            version_table: config.prefixed_version_table(),
            legacy_version_table: config.prefixed_legacy_version_table(),
        }
    }
}
