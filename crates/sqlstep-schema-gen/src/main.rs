use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use schemars::{Schema, schema_for};
use sqlstep_config::SqlstepConfig;
use sqlstep_core::Script;

#[derive(Debug, Parser)]
#[command(
    name = "sqlstep-schema-gen",
    about = "Emit JSON Schemas for sqlstep.json and script records."
)]
struct Args {
    /// Output directory for schema files.
    #[arg(short = 'o', long = "out", default_value = "schemas")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run(args.out)
}

fn run(out: PathBuf) -> Result<()> {
    if !out.exists() {
        fs::create_dir_all(&out).with_context(|| format!("create dir {}", out.display()))?;
    }

    let config_path = out.join("config.schema.json");
    let script_path = out.join("script.schema.json");
    write_schema(&config_path, &schema_for!(SqlstepConfig), "config")?;
    write_schema(&script_path, &schema_for!(Script), "script")?;

    println!("Wrote schemas:");
    println!("  {}", config_path.display());
    println!("  {}", script_path.display());
    Ok(())
}

fn write_schema(path: &Path, schema: &Schema, label: &str) -> Result<()> {
    let text =
        serde_json::to_string_pretty(schema).with_context(|| format!("serialize {label} schema"))?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}
