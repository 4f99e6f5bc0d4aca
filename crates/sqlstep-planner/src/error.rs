use sqlstep_core::{DatabaseBackend, ScriptVersion};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
    #[error("no scripts for database backend {0}")]
    NoScriptsForDialect(DatabaseBackend),
    #[error("script version must be positive")]
    ZeroVersion,
    #[error("duplicate script version: {0}")]
    DuplicateVersion(ScriptVersion),
    #[error("script version {found} is listed after version {previous}")]
    OutOfOrder {
        previous: ScriptVersion,
        found: ScriptVersion,
    },
}
