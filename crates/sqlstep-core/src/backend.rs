use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Storage engine family a database connection talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[cfg_attr(feature = "cli", value(name = "mysql"))]
    MySql,
    #[serde(alias = "postgresql")]
    #[cfg_attr(feature = "cli", value(name = "postgres", alias = "postgresql"))]
    Postgres,
    #[cfg_attr(feature = "cli", value(name = "sqlite"))]
    Sqlite,
}

impl DatabaseBackend {
    pub const ALL: [DatabaseBackend; 3] = [
        DatabaseBackend::MySql,
        DatabaseBackend::Postgres,
        DatabaseBackend::Sqlite,
    ];

    /// The family that carries the historical schema break at version 25 and
    /// the pre-integer version label. Only MySQL and its forks.
    pub fn is_legacy_family(self) -> bool {
        matches!(self, DatabaseBackend::MySql)
    }

    /// Variant assumed when the configuration names none.
    pub fn default_variant(self) -> EngineVariant {
        EngineVariant::Upstream
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseBackend::MySql => "mysql",
            DatabaseBackend::Postgres => "postgres",
            DatabaseBackend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseBackend {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DatabaseBackend::MySql),
            "postgres" | "postgresql" => Ok(DatabaseBackend::Postgres),
            "sqlite" => Ok(DatabaseBackend::Sqlite),
            _ => Err(CoreError::UnknownBackend(s.to_string())),
        }
    }
}

/// Compatible fork of a backend. Only meaningful for the MySQL family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum EngineVariant {
    /// The engine as shipped by its upstream vendor.
    #[default]
    Upstream,
    /// MariaDB: no native JSON column type, but JSON functions over text work.
    #[cfg_attr(feature = "cli", value(name = "mariadb"))]
    MariaDb,
    Percona,
}

impl EngineVariant {
    /// True for the variant that lacks a native JSON column type.
    pub fn lacks_json_column(self) -> bool {
        matches!(self, EngineVariant::MariaDb)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineVariant::Upstream => "upstream",
            EngineVariant::MariaDb => "mariadb",
            EngineVariant::Percona => "percona",
        }
    }
}

impl fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upstream" | "mysql" | "postgres" | "sqlite" => Ok(EngineVariant::Upstream),
            "mariadb" => Ok(EngineVariant::MariaDb),
            "percona" => Ok(EngineVariant::Percona),
            _ => Err(CoreError::UnknownVariant(s.to_string())),
        }
    }
}
