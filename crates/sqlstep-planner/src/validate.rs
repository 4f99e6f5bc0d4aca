use sqlstep_core::Script;

use crate::error::PlannerError;

/// Validate a script set before it is handed to the planner.
/// Checks for:
/// - Version 0 (reserved for "nothing recorded")
/// - Versions that are not ascending
/// - Two scripts with the same version that can apply to the same backend
pub fn validate_scripts(scripts: &[Script]) -> Result<(), PlannerError> {
    if scripts.iter().any(|s| s.version == 0) {
        return Err(PlannerError::ZeroVersion);
    }

    for pair in scripts.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        if next.version < previous.version {
            return Err(PlannerError::OutOfOrder {
                previous: previous.version,
                found: next.version,
            });
        }
    }

    // Equal versions sit next to each other once the order is checked.
    for (idx, script) in scripts.iter().enumerate() {
        let clash = scripts[idx + 1..]
            .iter()
            .take_while(|other| other.version == script.version)
            .any(|other| other.target.overlaps(script.target));
        if clash {
            return Err(PlannerError::DuplicateVersion(script.version));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sqlstep_core::{DatabaseBackend, ScriptTarget};

    const MYSQL: ScriptTarget = ScriptTarget::Backend(DatabaseBackend::MySql);
    const POSTGRES: ScriptTarget = ScriptTarget::Backend(DatabaseBackend::Postgres);
    const SQLITE: ScriptTarget = ScriptTarget::Backend(DatabaseBackend::Sqlite);

    fn set(entries: &[(u32, ScriptTarget)]) -> Vec<Script> {
        entries
            .iter()
            .map(|(version, target)| Script::new(*version, *target, "SELECT 1;"))
            .collect()
    }

    #[rstest]
    #[case::empty(&[], Ok(()))]
    #[case::ascending(&[(1, ScriptTarget::Any), (2, MYSQL), (3, POSTGRES)], Ok(()))]
    #[case::same_version_per_backend(&[(1, MYSQL), (1, POSTGRES), (1, SQLITE), (2, ScriptTarget::Any)], Ok(()))]
    #[case::zero(&[(0, ScriptTarget::Any)], Err(PlannerError::ZeroVersion))]
    #[case::duplicate_backend(&[(1, MYSQL), (2, MYSQL), (2, MYSQL)], Err(PlannerError::DuplicateVersion(2)))]
    #[case::duplicate_any(&[(4, POSTGRES), (4, ScriptTarget::Any)], Err(PlannerError::DuplicateVersion(4)))]
    #[case::duplicate_after_other_backend(&[(3, MYSQL), (3, POSTGRES), (3, MYSQL)], Err(PlannerError::DuplicateVersion(3)))]
    #[case::out_of_order(&[(2, MYSQL), (1, MYSQL)], Err(PlannerError::OutOfOrder { previous: 2, found: 1 }))]
    fn validates_script_sets(
        #[case] entries: &[(u32, ScriptTarget)],
        #[case] expected: Result<(), PlannerError>,
    ) {
        assert_eq!(validate_scripts(&set(entries)), expected);
    }
}
