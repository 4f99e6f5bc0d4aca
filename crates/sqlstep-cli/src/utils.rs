use std::path::Path;

use anyhow::{Context, Result};
use sea_orm::{Database, DatabaseConnection};
use sqlstep_config::SqlstepConfig;
use sqlstep_core::{DatabaseBackend, Script};
use sqlstep_loader::{DirectoryScripts, ScriptSource, scripts_for_backend};
use sqlstep_query::StoreDialect;
use tracing_subscriber::EnvFilter;

pub use sqlstep_loader::load_config;

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // Already installed when called twice; keep the first one.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Scripts under the configured directory that apply to `backend`.
pub fn load_scripts(config: &SqlstepConfig, backend: DatabaseBackend) -> Result<Vec<Script>> {
    let source = DirectoryScripts::from_config(Path::new("."), config);
    let scripts = source.load_scripts()?;
    Ok(scripts_for_backend(backend, &scripts))
}

pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url)
        .await
        .context("connect to database")
}

/// Version bookkeeping for `backend` with the configured tables.
pub fn dialect_for(config: &SqlstepConfig, backend: DatabaseBackend) -> StoreDialect {
    StoreDialect::new(backend)
        .with_variant(config.variant())
        .with_version_tables(
            config.prefixed_version_table(),
            config.prefixed_legacy_version_table(),
        )
}
