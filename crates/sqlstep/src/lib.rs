//! Versioned SQL script migrations.
//!
//! ```no_run
//! # async fn demo(db: &sea_orm::DatabaseConnection) -> Result<(), sqlstep::MigrationError> {
//! let outcome = sqlstep::sqlstep_migration!(db, scripts_dir = "db/scripts").await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub use sqlstep_core::{DatabaseBackend, EngineVariant, Script, ScriptTarget, ScriptVersion};
pub use sqlstep_loader::{DirectoryScripts, ScriptSource};
pub use sqlstep_query::{Dialect, StoreDialect};

// Re-export other commonly used items
pub use sqlstep_runner::{
    InstallOutcome, Installer, MigrationError, MigrationOptions, install_or_upgrade,
    run_migrations,
};

/// Run the migrations in `scripts/` against a sea-orm connection.
///
/// Options are given as `key = value` pairs: `scripts_dir`,
/// `existing_database`, `variant`, `version_table`, `legacy_version_table`.
#[macro_export]
macro_rules! sqlstep_migration {
    ($db:expr $(, $key:ident = $value:expr )* $(,)?) => {{
        async {
            #[allow(unused_mut)]
            let mut __options = $crate::MigrationOptions::default();
            $( $crate::__sqlstep_option!(__options, $key, $value); )*
            $crate::run_migrations($db, __options).await
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sqlstep_option {
    ($options:ident, scripts_dir, $value:expr) => {
        $options.scripts_dir = ::std::path::PathBuf::from($value);
    };
    ($options:ident, existing_database, $value:expr) => {
        $options.existing_database = $value;
    };
    ($options:ident, variant, $value:expr) => {
        $options.variant = $value;
    };
    ($options:ident, version_table, $value:expr) => {
        $options.version_table = ::std::string::ToString::to_string(&$value);
    };
    ($options:ident, legacy_version_table, $value:expr) => {
        $options.legacy_version_table = ::std::string::ToString::to_string(&$value);
    };
    ($options:ident, $other:ident, $value:expr) => {
        compile_error!(concat!(
            "unsupported option for sqlstep_migration!: ",
            stringify!($other)
        ));
    };
}
