use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, QueryResult, Statement};
use sqlstep_core::{ScriptVersion, VersionRecord};
use sqlstep_query::Dialect;
use tracing::{info, warn};

use crate::error::MigrationError;

/// First column of the version lookup, as text.
struct VersionRow {
    value: Option<String>,
}

impl FromQueryResult for VersionRow {
    fn from_query_result(res: &QueryResult, _pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            value: res.try_get_by_index(0)?,
        })
    }
}

async fn fetch_version<C>(conn: &C, sql: String) -> Result<Option<String>, DbErr>
where
    C: ConnectionTrait,
{
    let stmt = Statement::from_string(conn.get_database_backend(), sql);
    let row = VersionRow::find_by_statement(stmt).one(conn).await?;
    Ok(row.and_then(|r| r.value))
}

/// Read the stored version marker in whichever format it was written.
///
/// `Ok(None)` means the lookup ran but nothing is recorded. The legacy family
/// gets exactly one retry against the pre-25 table when the first lookup
/// fails or finds nothing.
pub async fn read_version_record<C>(
    conn: &C,
    dialect: &dyn Dialect,
) -> Result<Option<VersionRecord>, MigrationError>
where
    C: ConnectionTrait,
{
    let primary = fetch_version(conn, dialect.query_current_version()?).await;
    let primary_err = match primary {
        Ok(Some(raw)) => return Ok(Some(VersionRecord::from_raw(&raw))),
        Ok(None) if !dialect.is_legacy_family() => return Ok(None),
        Err(source) if !dialect.is_legacy_family() => {
            return Err(MigrationError::VersionRead { source });
        }
        // A missing row counts as a failed lookup here, the same as an error.
        Ok(None) => None,
        Err(source) => Some(source),
    };

    info!(backend = %dialect.backend(), "attempting legacy version lookup");
    match fetch_version(conn, dialect.query_current_version_legacy()?).await {
        Ok(raw) => Ok(raw.map(|raw| VersionRecord::from_raw(&raw))),
        Err(legacy_err) => match primary_err {
            // The first lookup succeeded, there is just no row in either place.
            None => Ok(None),
            Some(source) => {
                warn!(error = %legacy_err, "legacy version lookup failed");
                Err(MigrationError::VersionRead { source })
            }
        },
    }
}

/// Current schema version. Missing or malformed version data is 0.
pub async fn current_version<C>(
    conn: &C,
    dialect: &dyn Dialect,
) -> Result<ScriptVersion, MigrationError>
where
    C: ConnectionTrait,
{
    let record = read_version_record(conn, dialect).await?;
    Ok(record.map(|r| r.version()).unwrap_or(0))
}
