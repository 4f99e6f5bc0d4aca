use anyhow::Result;
use colored::Colorize;
use sqlstep_core::{DatabaseBackend, ScriptTarget};
use sqlstep_query::split_statements;

use crate::utils::{load_config, load_scripts};

pub fn cmd_scripts(backend: Option<DatabaseBackend>) -> Result<()> {
    let config = load_config()?;
    let backend = backend.unwrap_or(config.backend());
    let scripts = load_scripts(&config, backend)?;

    if scripts.is_empty() {
        println!(
            "{} {}",
            "No scripts found for".bright_yellow(),
            backend.to_string().bright_white()
        );
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Scripts for".bright_cyan().bold(),
        backend.to_string().bright_white(),
        scripts.len().to_string().bright_yellow()
    );
    for script in &scripts {
        let target = match script.target {
            ScriptTarget::Any => "common".to_string(),
            ScriptTarget::Backend(b) => b.to_string(),
        };
        println!(
            "  {} {:>5} {} {} {}",
            "-".bright_white(),
            script.version.to_string().bright_magenta(),
            target.bright_green(),
            split_statements(&script.body).len().to_string().bright_blue(),
            "statements".bright_white()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::{CwdGuard, write_config, write_script};
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn cmd_scripts_lists_backend_scripts() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "postgresql"}"#);
        write_script("common/0001_init.sql", "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);");
        write_script("postgresql/0002_users.sql", "CREATE TABLE users (id SERIAL);");

        cmd_scripts(None).unwrap();
        cmd_scripts(Some(DatabaseBackend::Sqlite)).unwrap();
    }

    #[test]
    #[serial]
    fn cmd_scripts_without_scripts_dir() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config("{}");

        let err = cmd_scripts(None).unwrap_err();
        assert!(err.to_string().contains("scripts directory not found"));
    }

    #[test]
    #[serial]
    fn cmd_scripts_with_empty_scripts_dir() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config("{}");
        std::fs::create_dir_all("scripts").unwrap();

        cmd_scripts(None).unwrap();
    }

    #[test]
    #[serial]
    fn cmd_scripts_rejects_duplicate_versions() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(r#"{"backend": "mysql"}"#);
        write_script("common/0003_a.sql", "SELECT 1;");
        write_script("mysql/0003_b.sql", "SELECT 2;");

        let err = cmd_scripts(None).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate script version: 3"));
    }

    #[test]
    #[serial]
    fn cmd_scripts_requires_config() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        let err = cmd_scripts(None).unwrap_err();
        assert!(err.to_string().contains("sqlstep init"));
    }
}
