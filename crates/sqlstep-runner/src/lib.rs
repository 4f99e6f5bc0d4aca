mod error;
mod executor;
mod installer;
mod options;
mod runtime;
mod tracker;

pub use error::MigrationError;
pub use executor::execute_plan;
pub use installer::{InstallOutcome, Installer, install_or_upgrade};
pub use options::MigrationOptions;
pub use runtime::{backend_of, run_migrations};
pub use tracker::{current_version, read_version_record};
