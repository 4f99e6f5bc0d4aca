use std::fmt;

use serde::{Deserialize, Serialize};
use sqlstep_naming::{LEGACY_LABEL_PREFIX, SCRIPT_EXTENSION, legacy_version_label};

use crate::script::ScriptVersion;

/// The version marker stored in the target database.
///
/// Current installations store a bare integer. Installations that predate it
/// store the file name of the last applied script, e.g. `db_00021.sql`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum VersionRecord {
    Integer(ScriptVersion),
    LegacyString(String),
}

impl VersionRecord {
    /// Classify a raw stored value.
    ///
    /// The value is trimmed, lowercased and stripped of `"` first, so JSON
    /// encoded strings and hand-edited rows both land in the same shape.
    pub fn from_raw(raw: &str) -> Self {
        let cleaned = raw.trim().to_lowercase().replace('"', "");
        match cleaned.parse() {
            Ok(version) => VersionRecord::Integer(version),
            Err(_) => VersionRecord::LegacyString(cleaned),
        }
    }

    pub fn legacy(version: ScriptVersion) -> Self {
        VersionRecord::LegacyString(legacy_version_label(version))
    }

    /// Collapse either format to a version number. Unparseable data is 0.
    pub fn version(&self) -> ScriptVersion {
        match self {
            VersionRecord::Integer(version) => *version,
            VersionRecord::LegacyString(label) => label
                .replacen(LEGACY_LABEL_PREFIX, "", 1)
                .replacen(SCRIPT_EXTENSION, "", 1)
                .parse()
                .unwrap_or(0),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, VersionRecord::LegacyString(_))
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRecord::Integer(version) => write!(f, "{version}"),
            VersionRecord::LegacyString(label) => f.write_str(label),
        }
    }
}

/// Turn a stored version value of either format into a version number.
pub fn normalize_version(raw: &str) -> ScriptVersion {
    VersionRecord::from_raw(raw).version()
}

/// What the caller knows about the database before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseState {
    /// Nothing installed yet; every script runs.
    Fresh,
    /// An existing database at the given recorded version.
    Existing(ScriptVersion),
}

impl DatabaseState {
    pub fn current_version(self) -> ScriptVersion {
        match self {
            DatabaseState::Fresh => 0,
            DatabaseState::Existing(version) => version,
        }
    }
}
