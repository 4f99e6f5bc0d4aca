use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlstep_core::DatabaseBackend;

mod commands;
mod utils;
use commands::{cmd_init, cmd_scripts, cmd_status, cmd_upgrade};

/// sqlstep command-line interface.
#[derive(Parser, Debug)]
#[command(name = "sqlstep", author, version, about)]
struct Cli {
    /// Write logs as JSON lines instead of plain text.
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize sqlstep.json with defaults.
    Init,
    /// List the scripts that apply to the configured backend.
    Scripts {
        /// List for this backend instead of the configured one.
        #[arg(long, value_enum)]
        backend: Option<DatabaseBackend>,
    },
    /// Show configuration, scripts and the stored database version.
    Status {
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },
    /// Install the schema or upgrade it to the newest script.
    Upgrade {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
        /// Treat the database as newly created and run every script.
        #[arg(long)]
        fresh: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_tracing(cli.log_json);
    match cli.command {
        Commands::Init => cmd_init(),
        Commands::Scripts { backend } => cmd_scripts(backend),
        Commands::Status { database_url } => cmd_status(database_url.as_deref()).await,
        Commands::Upgrade {
            database_url,
            fresh,
        } => cmd_upgrade(&database_url, fresh).await,
    }
}
