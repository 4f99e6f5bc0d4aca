use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sqlstep_config::SqlstepConfig;
use sqlstep_core::{DatabaseBackend, Script, ScriptTarget};
use sqlstep_naming::parse_script_version;
use sqlstep_planner::validate_scripts;
use tracing::debug;

/// Supplies the full, ordered set of scripts known to the application.
pub trait ScriptSource {
    fn load_scripts(&self) -> Result<Vec<Script>>;
}

impl ScriptSource for [Script] {
    fn load_scripts(&self) -> Result<Vec<Script>> {
        Ok(self.to_vec())
    }
}

impl ScriptSource for Vec<Script> {
    fn load_scripts(&self) -> Result<Vec<Script>> {
        Ok(self.clone())
    }
}

/// Scripts stored on disk, one subdirectory per backend.
///
/// ```text
/// scripts/
///   common/0001_init.sql      applies to every backend
///   mysql/db_00002.sql
///   postgresql/db_00002.sql
///   sqlite/db_00002.sql
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryScripts {
    root: PathBuf,
}

impl DirectoryScripts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scripts directory from config, resolved against the project root.
    pub fn from_config(project_root: &Path, config: &SqlstepConfig) -> Self {
        Self::new(project_root.join(config.scripts_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ScriptSource for DirectoryScripts {
    fn load_scripts(&self) -> Result<Vec<Script>> {
        load_scripts_from_dir(&self.root)
    }
}

/// Backend a scripts subdirectory belongs to.
pub fn target_for_dir(name: &str) -> Option<ScriptTarget> {
    match name.to_ascii_lowercase().as_str() {
        "common" | "any" => Some(ScriptTarget::Any),
        "mysql" => Some(ScriptTarget::Backend(DatabaseBackend::MySql)),
        "postgresql" | "postgres" => Some(ScriptTarget::Backend(DatabaseBackend::Postgres)),
        "sqlite" => Some(ScriptTarget::Backend(DatabaseBackend::Sqlite)),
        _ => None,
    }
}

/// Load every script under `root`, sorted by version and validated.
pub fn load_scripts_from_dir(root: &Path) -> Result<Vec<Script>> {
    if !root.is_dir() {
        anyhow::bail!("scripts directory not found: {}", root.display());
    }

    let mut scripts = Vec::new();
    let entries =
        fs::read_dir(root).with_context(|| format!("read scripts directory: {}", root.display()))?;

    for entry in entries {
        let entry = entry.context("read directory entry")?;
        let path = entry.path();
        if path.is_file() {
            read_script(&path, ScriptTarget::Any, &mut scripts)?;
        } else if path.is_dir() {
            let Some(target) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(target_for_dir)
            else {
                debug!(path = %path.display(), "skipping unknown scripts directory");
                continue;
            };
            read_target_dir(&path, target, &mut scripts)?;
        }
    }

    // Sort by version number
    scripts.sort_by_key(|s| s.version);
    validate_scripts(&scripts)
        .with_context(|| format!("validate scripts in {}", root.display()))?;
    Ok(scripts)
}

fn read_target_dir(dir: &Path, target: ScriptTarget, scripts: &mut Vec<Script>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("read scripts directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.context("read directory entry")?;
        let path = entry.path();
        if path.is_file() {
            read_script(&path, target, scripts)?;
        }
    }
    Ok(())
}

fn read_script(path: &Path, target: ScriptTarget, scripts: &mut Vec<Script>) -> Result<()> {
    let Some(version) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(parse_script_version)
    else {
        debug!(path = %path.display(), "skipping file without a script version");
        return Ok(());
    };

    let body = fs::read_to_string(path)
        .with_context(|| format!("read script file: {}", path.display()))?;
    scripts.push(Script::new(version, target, body));
    Ok(())
}

/// Scripts that apply to `backend`, in their original order.
pub fn scripts_for_backend(backend: DatabaseBackend, scripts: &[Script]) -> Vec<Script> {
    scripts
        .iter()
        .filter(|s| s.applies_to(backend))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_scripts_from_dir(&temp_dir.path().join("scirpts")).unwrap_err();
        assert!(err.to_string().starts_with("scripts directory not found:"));
    }

    #[test]
    fn empty_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let scripts = DirectoryScripts::new(temp_dir.path()).load_scripts().unwrap();
        assert!(scripts.is_empty());
    }

    #[test]
    fn loads_and_sorts_by_version() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "mysql/db_00003.sql", "SELECT 3;");
        write(root, "common/db_00001.sql", "SELECT 1;");
        write(root, "mysql/db_00002.sql", "SELECT 2;");
        write(root, "postgresql/db_00002.sql", "SELECT 2;");

        let scripts = DirectoryScripts::new(root).load_scripts().unwrap();
        let versions: Vec<_> = scripts.iter().map(|s| s.version).collect();
        assert_eq!(versions, vec![1, 2, 2, 3]);
        assert_eq!(scripts[0].target, ScriptTarget::Any);
        assert_eq!(scripts[0].body, "SELECT 1;");
    }

    #[test]
    fn top_level_files_apply_to_any_backend() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "0001_init.sql", "CREATE TABLE a (id INT);");

        let scripts = load_scripts_from_dir(temp_dir.path()).unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].target, ScriptTarget::Any);
    }

    #[test]
    fn skips_unrelated_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "README.md", "docs");
        write(root, "oracle/db_00001.sql", "SELECT 1 FROM dual;");
        write(root, "sqlite/notes.txt", "ignored");
        write(root, "sqlite/db_00001.sql", "SELECT 1;");

        let scripts = load_scripts_from_dir(root).unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].target, ScriptTarget::Backend(DatabaseBackend::Sqlite));
    }

    #[test]
    fn duplicate_versions_for_one_backend_fail() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "mysql/db_00004.sql", "SELECT 1;");
        write(root, "mysql/0004_again.sql", "SELECT 2;");

        let err = load_scripts_from_dir(root).unwrap_err();
        assert!(err.to_string().starts_with("validate scripts in"));
        assert!(format!("{err:#}").contains("duplicate script version: 4"));
    }

    #[test]
    fn zero_version_fails() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "common/0000_init.sql", "SELECT 1;");

        let err = load_scripts_from_dir(temp_dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("must be positive"));
    }

    #[test]
    fn from_config_resolves_against_project_root() {
        let temp_dir = TempDir::new().unwrap();
        let config = SqlstepConfig::default();
        let source = DirectoryScripts::from_config(temp_dir.path(), &config);
        assert_eq!(source.root(), temp_dir.path().join("scripts"));
    }

    #[rstest]
    #[case("common", Some(ScriptTarget::Any))]
    #[case("MySQL", Some(ScriptTarget::Backend(DatabaseBackend::MySql)))]
    #[case("postgres", Some(ScriptTarget::Backend(DatabaseBackend::Postgres)))]
    #[case("postgresql", Some(ScriptTarget::Backend(DatabaseBackend::Postgres)))]
    #[case("sqlite", Some(ScriptTarget::Backend(DatabaseBackend::Sqlite)))]
    #[case("sqlserver", None)]
    fn maps_directory_names(#[case] name: &str, #[case] expected: Option<ScriptTarget>) {
        assert_eq!(target_for_dir(name), expected);
    }

    #[test]
    fn filters_for_backend_in_order() {
        let scripts = vec![
            Script::new(1, ScriptTarget::Any, "SELECT 1;"),
            Script::new(2, ScriptTarget::Backend(DatabaseBackend::Postgres), "SELECT 2;"),
            Script::new(2, ScriptTarget::Backend(DatabaseBackend::MySql), "SELECT 2;"),
            Script::new(3, ScriptTarget::Backend(DatabaseBackend::MySql), "SELECT 3;"),
        ];
        let mysql = scripts_for_backend(DatabaseBackend::MySql, &scripts);
        let versions: Vec<_> = mysql.iter().map(|s| s.version).collect();
        assert_eq!(versions, vec![1, 2, 3]);
        assert!(scripts_for_backend(DatabaseBackend::Sqlite, &scripts).len() == 1);
    }

    #[test]
    fn in_memory_sources_clone_their_scripts() {
        let scripts = vec![Script::new(1, ScriptTarget::Any, "SELECT 1;")];
        assert_eq!(scripts.load_scripts().unwrap(), scripts);
        assert_eq!(scripts.as_slice().load_scripts().unwrap(), scripts);
    }
}
