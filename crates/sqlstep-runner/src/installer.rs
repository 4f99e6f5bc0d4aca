use sea_orm::{ConnectionTrait, TransactionSession, TransactionTrait};
use sqlstep_core::{DatabaseBackend, DatabaseState, ScriptVersion};
use sqlstep_loader::{ScriptSource, scripts_for_backend};
use sqlstep_planner::{PlannerError, plan_upgrade};
use sqlstep_query::Dialect;
use tracing::{error, info, warn};

use crate::error::MigrationError;
use crate::executor::execute_plan;
use crate::tracker::current_version;

/// Result of a successful `install_or_upgrade` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// No script targets the backend; the database was not touched.
    NoScripts { backend: DatabaseBackend },
    /// Nothing newer than the stored version.
    UpToDate { version: ScriptVersion },
    Migrated {
        from: ScriptVersion,
        to: ScriptVersion,
        applied: usize,
        legacy_collapse: bool,
    },
}

impl InstallOutcome {
    pub fn applied(&self) -> usize {
        match self {
            InstallOutcome::Migrated { applied, .. } => *applied,
            _ => 0,
        }
    }
}

/// Brings one database to the newest script version.
pub struct Installer<'a, C, S: ?Sized> {
    conn: &'a C,
    dialect: &'a dyn Dialect,
    source: &'a S,
}

impl<'a, C, S> Installer<'a, C, S>
where
    C: ConnectionTrait + TransactionTrait,
    S: ScriptSource + ?Sized,
{
    pub fn new(conn: &'a C, dialect: &'a dyn Dialect, source: &'a S) -> Self {
        Self {
            conn,
            dialect,
            source,
        }
    }

    /// Install the schema on a fresh database or upgrade an existing one.
    ///
    /// All pending scripts and their version records run in one transaction.
    /// Any failure rolls it back, leaving the stored version untouched.
    pub async fn install_or_upgrade(
        &self,
        existing_database: bool,
    ) -> Result<InstallOutcome, MigrationError> {
        let backend = self.dialect.backend();
        let scripts = self
            .source
            .load_scripts()
            .map_err(MigrationError::ScriptLoad)?;
        let scripts = scripts_for_backend(backend, &scripts);
        if scripts.is_empty() {
            info!(%backend, "no SQL scripts for database backend");
            return Ok(InstallOutcome::NoScripts { backend });
        }

        let state = if existing_database {
            DatabaseState::Existing(current_version(self.conn, self.dialect).await?)
        } else {
            DatabaseState::Fresh
        };
        let from = state.current_version();
        info!(%backend, version = from, scripts = scripts.len(), "current database version");

        let plan = match plan_upgrade(&scripts, backend, state) {
            Ok(plan) => plan,
            Err(PlannerError::NoScriptsForDialect(backend)) => {
                return Ok(InstallOutcome::NoScripts { backend });
            }
            Err(e) => return Err(e.into()),
        };
        if plan.is_empty() {
            info!(version = from, "database is up to date");
            return Ok(InstallOutcome::UpToDate { version: from });
        }
        if plan.legacy_collapse {
            info!(
                version = from,
                "legacy migration window, applying only the consolidated script"
            );
        }

        let txn = self
            .conn
            .begin()
            .await
            .map_err(|source| MigrationError::TransactionBegin { source })?;

        let applied = match execute_plan(&txn, self.dialect, &plan).await {
            Ok(applied) => applied,
            Err(e) => {
                error!(error = %e, "migration failed, rolling back");
                if let Err(rollback) = txn.rollback().await {
                    warn!(error = %rollback, "rollback failed");
                }
                return Err(e);
            }
        };
        txn.commit()
            .await
            .map_err(|source| MigrationError::Commit { source })?;

        let to = plan.target_version();
        info!(from, to, applied, "database migrated");
        Ok(InstallOutcome::Migrated {
            from,
            to,
            applied,
            legacy_collapse: plan.legacy_collapse,
        })
    }
}

/// Shorthand for `Installer::new(..).install_or_upgrade(..)`.
pub async fn install_or_upgrade<C, S>(
    conn: &C,
    dialect: &dyn Dialect,
    source: &S,
    existing_database: bool,
) -> Result<InstallOutcome, MigrationError>
where
    C: ConnectionTrait + TransactionTrait,
    S: ScriptSource + ?Sized,
{
    Installer::new(conn, dialect, source)
        .install_or_upgrade(existing_database)
        .await
}
