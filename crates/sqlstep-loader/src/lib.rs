pub mod config;
pub mod scripts;

pub use config::{load_config, load_config_from_path, load_config_or_default};
pub use scripts::{
    DirectoryScripts, ScriptSource, load_scripts_from_dir, scripts_for_backend, target_for_dir,
};
