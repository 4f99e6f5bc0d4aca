use sea_query::{
    InsertStatement, MysqlQueryBuilder, PostgresQueryBuilder, QueryStatementWriter,
    SelectStatement, SqliteQueryBuilder,
};
use sqlstep_core::DatabaseBackend;

/// Render a SELECT for a specific backend.
pub fn build_select(stmt: &SelectStatement, backend: DatabaseBackend) -> String {
    match backend {
        DatabaseBackend::Postgres => stmt.to_string(PostgresQueryBuilder),
        DatabaseBackend::MySql => stmt.to_string(MysqlQueryBuilder),
        DatabaseBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
    }
}

/// Render an INSERT (including its upsert clause) for a specific backend.
pub fn build_insert(stmt: &InsertStatement, backend: DatabaseBackend) -> String {
    match backend {
        DatabaseBackend::Postgres => stmt.to_string(PostgresQueryBuilder),
        DatabaseBackend::MySql => stmt.to_string(MysqlQueryBuilder),
        DatabaseBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
    }
}

/// Quote an identifier for use inside hand-written expressions.
pub fn quote_ident(backend: DatabaseBackend, name: &str) -> String {
    match backend {
        DatabaseBackend::MySql => format!("`{}`", name.replace('`', "``")),
        DatabaseBackend::Postgres | DatabaseBackend::Sqlite => {
            format!("\"{}\"", name.replace('"', "\"\""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DatabaseBackend::MySql, "c_config", "`c_config`")]
    #[case(DatabaseBackend::MySql, "odd`name", "`odd``name`")]
    #[case(DatabaseBackend::Postgres, "c_config", "\"c_config\"")]
    #[case(DatabaseBackend::Sqlite, "odd\"name", "\"odd\"\"name\"")]
    fn quotes_identifiers(
        #[case] backend: DatabaseBackend,
        #[case] name: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(quote_ident(backend, name), expected);
    }
}
