mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mdh", version, about = "Living hub documents for markdown vaults")]
struct Cli {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Path to an mdhub.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every hub document detected in the vault
    Detect(DetectArgs),

    /// Parse one document and print its hub structure
    Parse(ParseArgs),

    /// Gather new seed notes into one hub document
    Update(UpdateArgs),

    /// Gather new seed notes into every living hub document
    UpdateAll(UpdateAllArgs),

    /// Revert the most recent update of a hub document
    Undo(UndoArgs),

    /// Show recorded updates, newest first
    History(HistoryArgs),

    /// Drop cached parse results
    ClearCache(ClearCacheArgs),
}

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Emit the full parsed documents as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Document path, relative to the vault root
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Hub document path, relative to the vault root
    pub path: PathBuf,

    /// Bypass the hub's update-frequency gate
    #[arg(long)]
    pub force: bool,

    /// Show what would be gathered without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct UpdateAllArgs {
    /// Bypass every hub's update-frequency gate
    #[arg(long)]
    pub force: bool,

    /// Show what would be gathered without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct UndoArgs {
    /// Hub document path, relative to the vault root
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Limit history to one hub document
    pub path: Option<PathBuf>,

    /// Maximum number of records to print
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ClearCacheArgs {
    /// Drop only this document's cache entry
    pub path: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => {
            cmd::detect::run(&cli.vault, cli.config.as_deref(), args)
        }
        Commands::Parse(args) => {
            cmd::parse::run(&cli.vault, cli.config.as_deref(), args)
        }
        Commands::Update(args) => {
            cmd::update::run(&cli.vault, cli.config.as_deref(), args)
        }
        Commands::UpdateAll(args) => {
            cmd::update_all::run(&cli.vault, cli.config.as_deref(), args)
        }
        Commands::Undo(args) => {
            cmd::undo::run(&cli.vault, cli.config.as_deref(), args)
        }
        Commands::History(args) => {
            cmd::history::run(&cli.vault, cli.config.as_deref(), args)
        }
        Commands::ClearCache(args) => {
            cmd::clear_cache::run(&cli.vault, cli.config.as_deref(), args)
        }
    }
}
