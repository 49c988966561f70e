//! clobfts CLI
//!
//! Command-line interface for clobfts - named text documents with
//! full-text search.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use clobfts_core::{Config, SearchField, SqlDocumentRepository, SqliteConnectionSource};

mod commands;
mod input;
mod logging;
mod output;
mod shell;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "clobfts")]
#[command(about = "clobfts - store named text documents and search them with full-text queries")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell,
    /// Add a document
    Add {
        /// Document name (must be unique)
        name: String,
        /// Document content
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,
        /// Read content from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete a document by exact name
    #[command(alias = "rm")]
    Delete {
        /// Document name
        name: String,
    },
    /// Search document content
    Search {
        /// Full-text query (native syntax unless --phrase)
        query: String,
        /// Match the query as one literal phrase
        #[arg(short, long)]
        phrase: bool,
    },
    /// Search document names
    SearchName {
        /// Full-text query (native syntax unless --phrase)
        query: String,
        /// Match the query as one literal phrase
        #[arg(short, long)]
        phrase: bool,
    },
    /// List all document names
    #[command(alias = "ls")]
    List,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, database_path, busy_timeout_ms, log_level, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => {
                commands::config::show(cli.config.as_ref(), &output)
            }
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, cli.config.as_ref(), &output)
            }
        };
    }

    let mut config =
        Config::load_with_cli_override(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(path) = cli.database.clone() {
        config.database_path = Some(path);
    }

    logging::init(&config, cli.verbose);

    let source = SqliteConnectionSource::open_with_config(&config).with_context(|| {
        format!(
            "Failed to open document database at {:?}",
            config.database_path()
        )
    })?;
    let repo = SqlDocumentRepository::new(source);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run(&repo, &output),
        Commands::Add {
            name,
            content,
            file,
        } => commands::document::add(&repo, name, content, file, &output),
        Commands::Delete { name } => commands::document::delete(&repo, name, &output),
        Commands::Search { query, phrase } => {
            commands::document::search(&repo, SearchField::Content, query, phrase, &output)
        }
        Commands::SearchName { query, phrase } => {
            commands::document::search(&repo, SearchField::Name, query, phrase, &output)
        }
        Commands::List => commands::document::list(&repo, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}
