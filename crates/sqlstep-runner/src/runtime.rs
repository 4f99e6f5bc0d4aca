use sea_orm::{ConnectionTrait, DbBackend, TransactionTrait};
use sqlstep_core::DatabaseBackend;
use sqlstep_loader::DirectoryScripts;
use sqlstep_query::StoreDialect;

use crate::MigrationOptions;
use crate::error::MigrationError;
use crate::installer::{InstallOutcome, Installer};

/// Map the connection's backend onto the script backends.
#[allow(unreachable_patterns)]
pub fn backend_of<C: ConnectionTrait>(conn: &C) -> Result<DatabaseBackend, MigrationError> {
    match conn.get_database_backend() {
        DbBackend::MySql => Ok(DatabaseBackend::MySql),
        DbBackend::Postgres => Ok(DatabaseBackend::Postgres),
        DbBackend::Sqlite => Ok(DatabaseBackend::Sqlite),
        other => Err(MigrationError::UnsupportedBackend(format!("{other:?}"))),
    }
}

/// Upgrade `db` with the scripts found under `options.scripts_dir`.
pub async fn run_migrations<C>(
    db: &C,
    options: MigrationOptions,
) -> Result<InstallOutcome, MigrationError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let backend = backend_of(db)?;
    let dialect = StoreDialect::new(backend)
        .with_variant(options.variant)
        .with_version_tables(options.version_table, options.legacy_version_table);
    let source = DirectoryScripts::new(options.scripts_dir);

    Installer::new(db, &dialect, &source)
        .install_or_upgrade(options.existing_database)
        .await
}
