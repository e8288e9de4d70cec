//! # publisher-cli
//!
//! Command-line host for Kitsu Publisher.
//!
//! ## Commands
//!
//! - `dev`: Run the frontend dev server (forwards API prefixes to the backend)
//! - `session`: Show, save or clear the persisted session
//! - `setting`: Read or write a setting
//! - `pick-folder`: Ask for a folder on stdin, like the desktop dialog
//! - `call`: Invoke a bridge operation by name with JSON arguments
//! - `status`: Show the data directory, session host and routes
//!
//! ## Example
//!
//! ```bash
//! # Serve frontend/build on :5173, forwarding /kitsu etc. to :8000
//! publisher-cli dev
//!
//! # Store a setting (JSON value, or a plain string)
//! publisher-cli setting set default_task_name '"Lighting"'
//!
//! # Raw bridge call, as the webview would make it
//! publisher-cli call get_setting '"default_task_name"'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{call, dev, pick_folder, session, setting, status};

/// Command-line host for Kitsu Publisher.
#[derive(Parser, Debug)]
#[command(name = "publisher-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory holding config.json (default: ~/.kitsu_publisher_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the frontend dev server
    Dev {
        /// Dev server config file (TOML)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Override the bind address
        #[arg(long)]
        bind: Option<String>,

        /// Override the frontend build directory
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Serve everything locally; never forward
        #[arg(long)]
        production: bool,
    },

    /// Show, save or clear the persisted session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Read or write a setting
    Setting {
        #[command(subcommand)]
        action: SettingAction,
    },

    /// Ask for a folder on stdin (empty line cancels)
    PickFolder,

    /// Invoke a bridge operation with JSON arguments
    Call {
        /// Operation name (e.g. get_setting)
        operation: String,

        /// Positional arguments, each a JSON value
        args: Vec<String>,
    },

    /// Show host status
    Status {
        /// Dev server config file to read routes from (TOML)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    /// Print the stored tokens (or null)
    Show,
    /// Store tokens for a backend host
    Save {
        /// Backend host the tokens belong to
        #[arg(long)]
        host: String,

        /// Token payload as JSON
        #[arg(long)]
        tokens: String,
    },
    /// Drop the stored session
    Clear,
}

#[derive(Subcommand, Debug)]
enum SettingAction {
    /// Print a setting (or null)
    Get {
        /// Setting key
        key: String,
    },
    /// Store a setting
    Set {
        /// Setting key
        key: String,

        /// Value as JSON; anything that is not valid JSON is stored as a string
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Dev { .. } => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    match cli.command {
        Commands::Dev {
            config,
            bind,
            static_dir,
            production,
        } => {
            dev::run(dev::Overrides {
                config,
                bind,
                static_dir,
                production,
            })
            .await?;
        }
        Commands::Session { action } => match action {
            SessionAction::Show => session::show(&data_dir).await?,
            SessionAction::Save { host, tokens } => {
                session::save(&data_dir, &host, &tokens).await?
            }
            SessionAction::Clear => session::clear(&data_dir).await?,
        },
        Commands::Setting { action } => match action {
            SettingAction::Get { key } => setting::get(&data_dir, &key).await?,
            SettingAction::Set { key, value } => setting::set(&data_dir, &key, &value).await?,
        },
        Commands::PickFolder => {
            pick_folder::run(&data_dir).await?;
        }
        Commands::Call { operation, args } => {
            call::run(&data_dir, &operation, &args).await?;
        }
        Commands::Status { config } => {
            status::run(&data_dir, config).await?;
        }
    }

    Ok(())
}

/// `~/.kitsu_publisher_data`, shared with the desktop app.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new().context("Could not determine home directory")?;
    Ok(dirs.home_dir().join(".kitsu_publisher_data"))
}
