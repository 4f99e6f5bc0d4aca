use sea_query::{Alias, Expr, OnConflict, Query};
use sqlstep_core::{DatabaseBackend, VersionRecord};

use super::helpers::{build_insert, build_select, quote_ident};
use crate::error::QueryError;

/// Key of the row that carries the schema version.
pub const META_KEY: &str = "META";

/// Column names of a key/JSON-document version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionTableLayout {
    pub key_column: &'static str,
    pub document_column: &'static str,
}

/// `dmz_config (c_key, c_config)`
pub const CURRENT_LAYOUT: VersionTableLayout = VersionTableLayout {
    key_column: "c_key",
    document_column: "c_config",
};

/// `config (key, config)` as created by the schema before version 25.
pub const LEGACY_LAYOUT: VersionTableLayout = VersionTableLayout {
    key_column: "key",
    document_column: "config",
};

/// JSON document stored in the version row.
pub fn version_document(record: &VersionRecord) -> String {
    format!(r#"{{"database": "{record}"}}"#)
}

/// SELECT returning the `database` member of the version row as text.
pub fn build_read_version(
    backend: DatabaseBackend,
    table: &str,
    layout: VersionTableLayout,
) -> String {
    let column = quote_ident(backend, layout.document_column);
    let extract = match backend {
        DatabaseBackend::MySql => format!("JSON_UNQUOTE(JSON_EXTRACT({column}, '$.database'))"),
        DatabaseBackend::Postgres => format!("CAST({column} AS JSON) ->> 'database'"),
        DatabaseBackend::Sqlite => format!("json_extract({column}, '$.database')"),
    };

    let stmt = Query::select()
        .expr(Expr::cust(extract))
        .from(Alias::new(table))
        .and_where(Expr::col(Alias::new(layout.key_column)).eq(META_KEY))
        .to_owned();
    build_select(&stmt, backend)
}

/// Upsert of the version row holding `record`.
pub fn build_record_version(
    backend: DatabaseBackend,
    table: &str,
    layout: VersionTableLayout,
    record: &VersionRecord,
) -> Result<String, QueryError> {
    let document = version_document(record);
    let key = Alias::new(layout.key_column);
    let value = Alias::new(layout.document_column);

    let mut stmt = Query::insert();
    stmt.into_table(Alias::new(table))
        .columns([key.clone(), value.clone()]);
    stmt.values([Expr::val(META_KEY).into(), Expr::cust(format!("'{document}'"))])
        .map_err(|e| QueryError::Build {
            statement: "version record",
            message: e.to_string(),
        })?;
    stmt.on_conflict(OnConflict::column(key).update_column(value).to_owned());

    Ok(build_insert(&stmt, backend))
}
