use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use sqlstep_runner::{InstallOutcome, MigrationOptions, backend_of, run_migrations};
use tracing::warn;

use crate::utils::{connect, load_config};

pub async fn cmd_upgrade(database_url: &str, fresh: bool) -> Result<()> {
    let config = load_config()?;
    let db = connect(database_url).await?;

    let backend = backend_of(&db)?;
    if backend != config.backend() {
        warn!(
            configured = %config.backend(),
            connected = %backend,
            "database URL does not match the configured backend, using the connection"
        );
    }

    let options = MigrationOptions::from_config(&config, Path::new("."), !fresh);
    let outcome = run_migrations(&db, options)
        .await
        .context("upgrade database")?;

    match outcome {
        InstallOutcome::NoScripts { backend } => println!(
            "{} {}",
            "No scripts for backend".bright_yellow(),
            backend.to_string().bright_white()
        ),
        InstallOutcome::UpToDate { version } => println!(
            "{} {}",
            "Database is up to date at version".bright_green(),
            version.to_string().bright_magenta()
        ),
        InstallOutcome::Migrated {
            from,
            to,
            applied,
            legacy_collapse,
        } => {
            println!(
                "{} {} {} {} ({} {})",
                "Migrated database from version".bright_green(),
                from.to_string().bright_magenta(),
                "to".bright_green(),
                to.to_string().bright_magenta(),
                applied.to_string().bright_yellow(),
                "scripts applied".bright_white()
            );
            if legacy_collapse {
                println!(
                    "  {}",
                    "Legacy schema replaced by the consolidated script.".bright_white()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::{
        CwdGuard, VERSION_TABLE, sqlite_url, write_config, write_script,
    };
    use crate::utils::{connect, dialect_for};
    use serial_test::serial;
    use sqlstep_core::DatabaseBackend;
    use sqlstep_runner::current_version;
    use tempfile::tempdir;

    #[tokio::test]
    #[serial]
    async fn cmd_upgrade_fresh_then_existing() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        let config = write_config(r#"{"backend": "sqlite"}"#);
        write_script("common/0001_init.sql", VERSION_TABLE);
        write_script("sqlite/0002_users.sql", "CREATE TABLE users (id INTEGER);");
        let url = sqlite_url(tmp.path());

        cmd_upgrade(&url, true).await.unwrap();
        cmd_upgrade(&url, false).await.unwrap();

        let db = connect(&url).await.unwrap();
        let dialect = dialect_for(&config, DatabaseBackend::Sqlite);
        assert_eq!(current_version(&db, &dialect).await.unwrap(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn cmd_upgrade_reports_failing_script() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "sqlite"}"#);
        write_script("common/0001_init.sql", VERSION_TABLE);
        write_script("common/0002_broken.sql", "CREATE TABLE;");
        let url = sqlite_url(tmp.path());

        let err = cmd_upgrade(&url, true).await.unwrap_err();
        assert!(format!("{err:#}").contains("error executing SQL script 2"));
    }

    #[tokio::test]
    #[serial]
    async fn cmd_upgrade_fails_without_scripts_dir() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "sqlite", "scriptsDir": "scirpts"}"#);
        let url = sqlite_url(tmp.path());

        let err = cmd_upgrade(&url, false).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("unable to load scripts"), "got: {message}");
        assert!(message.contains("scripts directory not found"), "got: {message}");
    }

    #[tokio::test]
    #[serial]
    async fn cmd_upgrade_with_empty_scripts_dir() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "sqlite"}"#);
        std::fs::create_dir_all("scripts").unwrap();
        let url = sqlite_url(tmp.path());

        cmd_upgrade(&url, false).await.unwrap();
    }
}
