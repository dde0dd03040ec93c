//! git-notes: keep note repositories committed, pushed and merged.
//!
//! # Usage
//!
//! ```text
//! git-notes [--config <path>] start
//! git-notes [--config <path>] sync [<path>]
//! git-notes [--config <path>] status [--json]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{status::StatusArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "git-notes",
    version,
    about = "Automatically sync git repositories of notes",
    long_about = None,
)]
struct Cli {
    /// Config file to read instead of ~/.git-notes.json.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watch and sync every configured repository until Ctrl-C.
    Start,

    /// Sync configured repositories once and exit.
    Sync(SyncArgs),

    /// Show the sync state of every configured repository.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    gitnotes_daemon::init_tracing();
    let config = commands::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Start => commands::start::run(&config),
        Commands::Sync(args) => args.run(&config),
        Commands::Status(args) => args.run(&config),
    }
}
