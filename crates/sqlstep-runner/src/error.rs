use sea_orm::DbErr;
use sqlstep_core::ScriptVersion;
use sqlstep_planner::PlannerError;
use sqlstep_query::QueryError;

#[derive(thiserror::Error, Debug)]
pub enum MigrationError {
    #[error("unable to load scripts")]
    ScriptLoad(#[source] anyhow::Error),
    #[error("unable to get current version")]
    VersionRead {
        #[source]
        source: DbErr,
    },
    #[error("failed to begin transaction")]
    TransactionBegin {
        #[source]
        source: DbErr,
    },
    #[error("error executing SQL script {version}: {statement}")]
    ScriptExecution {
        version: ScriptVersion,
        statement: String,
        #[source]
        source: DbErr,
    },
    #[error("error recording execution of SQL script {version}")]
    VersionRecord {
        version: ScriptVersion,
        #[source]
        source: DbErr,
    },
    #[error("failed to commit migration")]
    Commit {
        #[source]
        source: DbErr,
    },
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("unsupported database backend: {0}")]
    UnsupportedBackend(String),
}

impl MigrationError {
    /// Script version a failure is attributed to, when there is one.
    pub fn script_version(&self) -> Option<ScriptVersion> {
        match self {
            MigrationError::ScriptExecution { version, .. }
            | MigrationError::VersionRecord { version, .. } => Some(*version),
            _ => None,
        }
    }
}
