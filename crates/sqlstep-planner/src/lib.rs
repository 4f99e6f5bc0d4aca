pub mod error;
pub mod plan;
pub mod validate;

pub use error::PlannerError;
pub use plan::{
    LEGACY_SCHEMA_VERSION, LEGACY_WINDOW_MIN_SCRIPTS, collapse_legacy_window,
    is_legacy_migration_window, plan_upgrade, select_scripts,
};
pub use validate::validate_scripts;
