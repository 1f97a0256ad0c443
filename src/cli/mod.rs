//! CLI commands for omnibox.
//!
//! Offline tooling around the engine: run a query against a history file,
//! try domain completion, and manage remembered suffixes.

pub mod suggest;
pub mod tlds;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "omnibox")]
#[command(about = "Address-bar autocomplete engine", long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the suggestion list for a search text
    Suggest {
        /// Text as typed into the address bar
        text: String,

        /// TOML file with [[bookmarks]], [[urls]] and [[favorites]]
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,

        /// Print the visible rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Complete a partial domain with the best remembered suffix
    Complete {
        text: String,
    },

    /// Manage remembered domain suffixes
    Tlds {
        #[command(subcommand)]
        action: Option<TldCommands>,
    },

    /// Print the config file location
    ConfigPath,
}

#[derive(Subcommand)]
pub enum TldCommands {
    /// List suffixes with their scores (default)
    List,

    /// Add weight to a suffix, creating it if needed
    Add {
        /// Suffix including the leading dot, e.g. ".co.uk"
        suffix: String,

        #[arg(long, default_value_t = 1)]
        weight: u32,
    },

    /// Forget a suffix
    Remove {
        suffix: String,
    },
}

/// Parse arguments and run the requested command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    match cli.command {
        Commands::Suggest {
            text,
            history,
            json,
        } => {
            let config = load_config(&config_path)?;
            suggest::run_suggest(&config, &text, history.as_deref(), json)
        }
        Commands::Complete { text } => {
            let config = load_config(&config_path)?;
            let completion = crate::services::domain::complete(&text, &config.tld_table());
            if !completion.is_completed(&text) {
                tracing::info!("no suffix fits, text left as typed");
            }
            println!("{}\t{}", completion.text, completion.url);
            Ok(())
        }
        Commands::Tlds { action } => {
            tlds::run_tlds(&config_path, action.unwrap_or(TldCommands::List))
        }
        Commands::ConfigPath => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

/// Missing config means defaults; a broken one is an error here.
fn load_config(path: &std::path::Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    Ok(Config::load_from(path)?)
}
