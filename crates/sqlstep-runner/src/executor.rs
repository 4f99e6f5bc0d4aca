use sea_orm::ConnectionTrait;
use sqlstep_core::{Plan, Script};
use sqlstep_query::{Dialect, prepare_statement, split_statements};
use tracing::{debug, info, warn};

use crate::error::MigrationError;

/// Apply every script of `plan` through `conn`, recording each version.
///
/// `conn` is expected to be the caller's transaction; nothing here commits or
/// rolls back. Stops at the first failing statement or version write.
pub async fn execute_plan<C>(
    conn: &C,
    dialect: &dyn Dialect,
    plan: &Plan,
) -> Result<usize, MigrationError>
where
    C: ConnectionTrait,
{
    let mut applied = 0;
    for script in plan {
        apply_script(conn, dialect, script).await?;
        record_version(conn, dialect, script).await?;
        applied += 1;
    }
    Ok(applied)
}

async fn apply_script<C>(
    conn: &C,
    dialect: &dyn Dialect,
    script: &Script,
) -> Result<(), MigrationError>
where
    C: ConnectionTrait,
{
    let statements = split_statements(&script.body);
    info!(
        version = script.version,
        statements = statements.len(),
        "executing SQL script"
    );

    for statement in &statements {
        let sql = prepare_statement(dialect, statement);
        debug!(version = script.version, sql = %sql, "executing statement");
        conn.execute_unprepared(&sql)
            .await
            .map_err(|source| MigrationError::ScriptExecution {
                version: script.version,
                statement: sql.into_owned(),
                source,
            })?;
    }
    Ok(())
}

async fn record_version<C>(
    conn: &C,
    dialect: &dyn Dialect,
    script: &Script,
) -> Result<(), MigrationError>
where
    C: ConnectionTrait,
{
    let version = script.version;
    let sql = dialect.query_record_version(version)?;
    let Err(source) = conn.execute_unprepared(&sql).await else {
        return Ok(());
    };
    if !dialect.is_legacy_family() {
        return Err(MigrationError::VersionRecord { version, source });
    }

    warn!(version, error = %source, "recording version failed, trying legacy table");
    let legacy = dialect.query_record_version_legacy(version)?;
    conn.execute_unprepared(&legacy)
        .await
        .map(|_| ())
        .map_err(|source| MigrationError::VersionRecord { version, source })
}
