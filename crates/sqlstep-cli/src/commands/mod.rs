pub mod init;
pub mod scripts;
pub mod status;
pub mod upgrade;

pub use init::cmd_init;
pub use scripts::cmd_scripts;
pub use status::cmd_status;
pub use upgrade::cmd_upgrade;
