use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqlstep_core::{DatabaseBackend, EngineVariant};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "sqlstep.json";

/// Table holding the current version row.
pub const DEFAULT_VERSION_TABLE: &str = "dmz_config";

/// Table the legacy schema kept its version row in.
pub const DEFAULT_LEGACY_VERSION_TABLE: &str = "config";

fn default_scripts_dir() -> PathBuf {
    PathBuf::from("scripts")
}

fn default_version_table() -> String {
    DEFAULT_VERSION_TABLE.to_string()
}

fn default_legacy_version_table() -> String {
    DEFAULT_LEGACY_VERSION_TABLE.to_string()
}

fn default_backend() -> DatabaseBackend {
    DatabaseBackend::MySql
}

/// Top-level sqlstep configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SqlstepConfig {
    /// Root of the versioned SQL scripts, one subdirectory per backend.
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: PathBuf,
    /// Backend the scripts are selected for.
    #[serde(default = "default_backend")]
    pub backend: DatabaseBackend,
    /// Engine fork, e.g. `mariadb` for MySQL-compatible servers without JSON columns.
    #[serde(default)]
    pub variant: EngineVariant,
    #[serde(default = "default_version_table")]
    pub version_table: String,
    #[serde(default = "default_legacy_version_table")]
    pub legacy_version_table: String,
    /// Prefix to add to both version tables.
    /// Default: "" (no prefix)
    #[serde(default)]
    pub prefix: String,
}

impl Default for SqlstepConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            backend: default_backend(),
            variant: EngineVariant::default(),
            version_table: default_version_table(),
            legacy_version_table: default_legacy_version_table(),
            prefix: String::new(),
        }
    }
}

impl SqlstepConfig {
    /// Path where scripts are stored.
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    pub fn variant(&self) -> EngineVariant {
        self.variant
    }

    /// Version table name without prefix.
    pub fn version_table(&self) -> &str {
        &self.version_table
    }

    /// Legacy version table name without prefix.
    pub fn legacy_version_table(&self) -> &str {
        &self.legacy_version_table
    }

    /// Prefix to add to all table names.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Apply prefix to a table name.
    pub fn apply_prefix(&self, table_name: &str) -> String {
        if self.prefix.is_empty() {
            table_name.to_string()
        } else {
            format!("{}{}", self.prefix, table_name)
        }
    }

    /// The version table as it exists in the database.
    pub fn prefixed_version_table(&self) -> String {
        self.apply_prefix(&self.version_table)
    }

    /// The legacy version table as it exists in the database.
    pub fn prefixed_legacy_version_table(&self) -> String {
        self.apply_prefix(&self.legacy_version_table)
    }
}
