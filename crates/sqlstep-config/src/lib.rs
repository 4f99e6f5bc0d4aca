pub mod config;

pub use config::{
    CONFIG_FILE_NAME, DEFAULT_LEGACY_VERSION_TABLE, DEFAULT_VERSION_TABLE, SqlstepConfig,
};
