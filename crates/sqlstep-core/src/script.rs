use serde::{Deserialize, Serialize};

use crate::backend::DatabaseBackend;

pub type ScriptVersion = u32;

/// Which backends a script applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ScriptTarget {
    Any,
    Backend(DatabaseBackend),
}

impl ScriptTarget {
    pub fn matches(self, backend: DatabaseBackend) -> bool {
        match self {
            ScriptTarget::Any => true,
            ScriptTarget::Backend(target) => target == backend,
        }
    }

    /// Whether some backend exists that both targets apply to.
    pub fn overlaps(self, other: ScriptTarget) -> bool {
        match (self, other) {
            (ScriptTarget::Any, _) | (_, ScriptTarget::Any) => true,
            (ScriptTarget::Backend(a), ScriptTarget::Backend(b)) => a == b,
        }
    }
}

/// One versioned schema change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub version: ScriptVersion,
    pub body: String,
    pub target: ScriptTarget,
}

impl Script {
    pub fn new(version: ScriptVersion, target: ScriptTarget, body: impl Into<String>) -> Self {
        Self {
            version,
            body: body.into(),
            target,
        }
    }

    pub fn applies_to(&self, backend: DatabaseBackend) -> bool {
        self.target.matches(backend)
    }
}
