pub mod backend;
pub mod error;
pub mod plan;
pub mod script;
pub mod version;

pub use backend::{DatabaseBackend, EngineVariant};
pub use error::CoreError;
pub use plan::Plan;
pub use script::{Script, ScriptTarget, ScriptVersion};
pub use version::{DatabaseState, VersionRecord, normalize_version};
