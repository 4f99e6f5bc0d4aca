use anyhow::Result;
use colored::Colorize;
use sqlstep_core::DatabaseState;
use sqlstep_planner::plan_upgrade;
use sqlstep_runner::{backend_of, read_version_record};

use crate::utils::{connect, dialect_for, load_config, load_scripts};

pub async fn cmd_status(database_url: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let scripts = load_scripts(&config, config.backend())?;

    println!("{}", "Configuration:".bright_cyan().bold());
    println!(
        "  {} {}",
        "Scripts directory:".cyan(),
        format!("{}", config.scripts_dir().display()).bright_white()
    );
    println!("  {} {}", "Backend:".cyan(), config.backend());
    println!("  {} {}", "Variant:".cyan(), config.variant());
    println!(
        "  {} {}",
        "Version table:".cyan(),
        config.prefixed_version_table().bright_white()
    );
    println!(
        "  {} {}",
        "Legacy version table:".cyan(),
        config.prefixed_legacy_version_table().bright_white()
    );
    println!();

    println!(
        "{} {}",
        "Scripts:".bright_cyan().bold(),
        scripts.len().to_string().bright_yellow()
    );
    if let Some(latest) = scripts.last() {
        println!(
            "  {} {}",
            "Latest version:".cyan(),
            latest.version.to_string().bright_magenta()
        );
    }

    let Some(url) = database_url else {
        return Ok(());
    };
    println!();

    let db = connect(url).await?;
    let backend = backend_of(&db)?;
    let scripts = load_scripts(&config, backend)?;
    let dialect = dialect_for(&config, backend);
    let record = read_version_record(&db, &dialect).await?;

    let current = match &record {
        Some(record) => {
            println!(
                "{} {} ({} {})",
                "Stored version:".bright_cyan().bold(),
                record.to_string().bright_white(),
                "normalized".bright_black(),
                record.version().to_string().bright_magenta()
            );
            record.version()
        }
        None => {
            println!(
                "{} {}",
                "Stored version:".bright_cyan().bold(),
                "none".bright_yellow()
            );
            0
        }
    };

    if scripts.is_empty() {
        println!(
            "{} {}",
            "Status:".bright_cyan().bold(),
            "No scripts for this database backend.".bright_yellow()
        );
        return Ok(());
    }

    let plan = plan_upgrade(&scripts, backend, DatabaseState::Existing(current))?;
    if plan.is_empty() {
        println!(
            "{} {}",
            "Status:".bright_cyan().bold(),
            "Database is up to date.".bright_green()
        );
    } else {
        println!(
            "{} {} {}",
            "Status:".bright_cyan().bold(),
            plan.len().to_string().bright_yellow(),
            "scripts pending.".bright_yellow()
        );
        if plan.legacy_collapse {
            println!(
                "  {}",
                "Legacy schema detected: only the consolidated script will run.".bright_white()
            );
        }
        println!(
            "  {} {} {}",
            "Run".bright_white(),
            "'sqlstep upgrade'".bright_cyan().bold(),
            "to apply them.".bright_white()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_upgrade;
    use crate::utils::test_support::{
        CwdGuard, VERSION_TABLE, sqlite_url, write_config, write_script,
    };
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    #[serial]
    async fn cmd_status_without_database() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "sqlite", "prefix": "app_"}"#);
        write_script("common/0001_init.sql", "SELECT 1;");

        cmd_status(None).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn cmd_status_with_pending_scripts() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "sqlite"}"#);
        write_script("common/0001_init.sql", VERSION_TABLE);
        write_script("sqlite/0002_users.sql", "CREATE TABLE users (id INTEGER);");
        let url = sqlite_url(tmp.path());

        // Version table exists but holds no row yet.
        let db = connect(&url).await.unwrap();
        sea_orm::ConnectionTrait::execute_unprepared(&db, VERSION_TABLE)
            .await
            .unwrap();

        cmd_status(Some(&url)).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn cmd_status_after_upgrade() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "sqlite"}"#);
        write_script("common/0001_init.sql", VERSION_TABLE);
        let url = sqlite_url(tmp.path());

        cmd_upgrade(&url, true).await.unwrap();
        cmd_status(Some(&url)).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn cmd_status_fails_without_version_table() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "sqlite"}"#);
        write_script("common/0001_init.sql", VERSION_TABLE);
        let url = sqlite_url(tmp.path());

        let err = cmd_status(Some(&url)).await.unwrap_err();
        assert!(err.to_string().contains("unable to get current version"));
    }
}
