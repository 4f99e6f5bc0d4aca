use std::borrow::Cow;

use sqlstep_core::{DatabaseBackend, EngineVariant, ScriptVersion, VersionRecord};

use crate::error::QueryError;
use crate::split::rewrite_json_columns;
use crate::sql::{CURRENT_LAYOUT, LEGACY_LAYOUT, build_read_version, build_record_version};

/// What the migration core needs to know about the target database.
///
/// The version bookkeeping SQL is data supplied by the dialect, so the core
/// never branches on the backend to pick a query.
pub trait Dialect: Send + Sync {
    fn backend(&self) -> DatabaseBackend;

    fn variant(&self) -> EngineVariant;

    fn query_current_version(&self) -> Result<String, QueryError>;

    /// Version lookup against the pre-25 schema. Only consulted for the
    /// legacy family.
    fn query_current_version_legacy(&self) -> Result<String, QueryError>;

    fn query_record_version(&self, version: ScriptVersion) -> Result<String, QueryError>;

    /// Version write in the legacy label format. Only consulted for the
    /// legacy family.
    fn query_record_version_legacy(&self, version: ScriptVersion) -> Result<String, QueryError>;

    fn is_legacy_family(&self) -> bool {
        self.backend().is_legacy_family()
    }

    fn rewrites_json_columns(&self) -> bool {
        self.is_legacy_family() && self.variant().lacks_json_column()
    }
}

/// Apply the dialect's statement rewrites before execution.
pub fn prepare_statement<'a>(dialect: &dyn Dialect, statement: &'a str) -> Cow<'a, str> {
    if dialect.rewrites_json_columns() {
        rewrite_json_columns(statement)
    } else {
        Cow::Borrowed(statement)
    }
}

/// Built-in dialect keeping the version in a key/JSON-document table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDialect {
    backend: DatabaseBackend,
    variant: EngineVariant,
    version_table: String,
    legacy_version_table: String,
}

impl StoreDialect {
    pub fn new(backend: DatabaseBackend) -> Self {
        Self {
            backend,
            variant: EngineVariant::Upstream,
            version_table: "dmz_config".to_string(),
            legacy_version_table: "config".to_string(),
        }
    }

    pub fn with_variant(mut self, variant: EngineVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_version_tables(
        mut self,
        version_table: impl Into<String>,
        legacy_version_table: impl Into<String>,
    ) -> Self {
        self.version_table = version_table.into();
        self.legacy_version_table = legacy_version_table.into();
        self
    }

    pub fn version_table(&self) -> &str {
        &self.version_table
    }

    pub fn legacy_version_table(&self) -> &str {
        &self.legacy_version_table
    }
}

impl Dialect for StoreDialect {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    fn variant(&self) -> EngineVariant {
        self.variant
    }

    fn query_current_version(&self) -> Result<String, QueryError> {
        Ok(build_read_version(
            self.backend,
            &self.version_table,
            CURRENT_LAYOUT,
        ))
    }

    fn query_current_version_legacy(&self) -> Result<String, QueryError> {
        if !self.is_legacy_family() {
            return self.query_current_version();
        }
        Ok(build_read_version(
            self.backend,
            &self.legacy_version_table,
            LEGACY_LAYOUT,
        ))
    }

    fn query_record_version(&self, version: ScriptVersion) -> Result<String, QueryError> {
        build_record_version(
            self.backend,
            &self.version_table,
            CURRENT_LAYOUT,
            &VersionRecord::Integer(version),
        )
    }

    fn query_record_version_legacy(&self, version: ScriptVersion) -> Result<String, QueryError> {
        if !self.is_legacy_family() {
            return self.query_record_version(version);
        }
        build_record_version(
            self.backend,
            &self.legacy_version_table,
            LEGACY_LAYOUT,
            &VersionRecord::legacy(version),
        )
    }
}
