//! equip-hotkeys - profile inspection tool

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use equip_hotkeys::config_paths;
use equip_hotkeys::persist::HotkeysIr;
use equip_hotkeys::ui::{normalize_profile_name, ProfileStore};

mod cli;

use cli::{CliArgs, Command};

fn profiles_dir(args: &CliArgs) -> Result<PathBuf> {
    args.profiles
        .clone()
        .or_else(config_paths::profiles_dir)
        .context("No profile directory available, pass --profiles")
}

fn read_ir(path: &std::path::Path) -> Result<HotkeysIr> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match &args.command {
        Command::List => {
            let mut store = ProfileStore::new(profiles_dir(&args)?);
            for name in store.list() {
                println!("{}", name);
            }
        }
        Command::Show { name } => {
            let path = ProfileStore::new(profiles_dir(&args)?).path_for(name)?;
            print!("{}", cli::describe(&read_ir(&path)?));
        }
        Command::Check { file } => {
            let issues = cli::check(&read_ir(file)?);
            for issue in &issues {
                println!("{}", issue);
            }
            if !issues.is_empty() {
                bail!("{} issue(s) in {}", issues.len(), file.display());
            }
            println!("ok");
        }
        Command::Name { raw } => println!("{}", normalize_profile_name(raw)),
        Command::Keys => print!("{}", cli::key_table()),
    }
    Ok(())
}
