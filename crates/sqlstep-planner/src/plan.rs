use sqlstep_core::{DatabaseBackend, DatabaseState, Plan, Script, ScriptVersion};

use crate::error::PlannerError;

/// Last script of the legacy schema line; it replaces the old tables wholesale.
pub const LEGACY_SCHEMA_VERSION: ScriptVersion = 25;

/// Minimum selection size for the legacy replacement to apply.
pub const LEGACY_WINDOW_MIN_SCRIPTS: usize = 26;

/// Build the plan for one run.
///
/// Scripts are filtered for `backend` and kept in the order given; the caller
/// guarantees ascending versions. A recorded version of 0 selects everything,
/// whether the database is fresh or its version could not be parsed.
pub fn plan_upgrade(
    scripts: &[Script],
    backend: DatabaseBackend,
    state: DatabaseState,
) -> Result<Plan, PlannerError> {
    let applicable: Vec<Script> = scripts
        .iter()
        .filter(|s| s.applies_to(backend))
        .cloned()
        .collect();
    if applicable.is_empty() {
        return Err(PlannerError::NoScriptsForDialect(backend));
    }

    let current = state.current_version();
    let selected = select_scripts(&applicable, current);
    let (scripts, legacy_collapse) = collapse_legacy_window(backend, current, selected);

    Ok(Plan {
        scripts,
        from_version: current,
        legacy_collapse,
    })
}

/// Scripts newer than `current`, or all of them when `current` is 0.
pub fn select_scripts(scripts: &[Script], current: ScriptVersion) -> Vec<Script> {
    scripts
        .iter()
        .filter(|s| s.version > current || current == 0)
        .cloned()
        .collect()
}

/// Whether the selection crosses the one-time MySQL schema replacement.
///
/// Holds for a legacy-family backend recorded somewhere in `(0, 25)` whose
/// selection has at least 26 scripts and ends exactly at version 25.
pub fn is_legacy_migration_window(
    backend: DatabaseBackend,
    current: ScriptVersion,
    selected: &[Script],
) -> bool {
    backend.is_legacy_family()
        && current > 0
        && current < LEGACY_SCHEMA_VERSION
        && selected.len() >= LEGACY_WINDOW_MIN_SCRIPTS
        && selected
            .last()
            .is_some_and(|s| s.version == LEGACY_SCHEMA_VERSION)
}

/// Reduce the selection to its final script inside the legacy window.
///
/// The earlier scripts target the table layout that version 25 drops, so only
/// the replacement itself runs. Returns whether the collapse happened.
pub fn collapse_legacy_window(
    backend: DatabaseBackend,
    current: ScriptVersion,
    mut selected: Vec<Script>,
) -> (Vec<Script>, bool) {
    if !is_legacy_migration_window(backend, current, &selected) {
        return (selected, false);
    }
    let last = selected.split_off(selected.len() - 1);
    (last, true)
}
