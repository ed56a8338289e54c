//! Command-line interface for wpc-browse.
//!
//! Every command reads a SOURCE, which is either a JSON file holding an API
//! response or an `http(s)://` URL fetched with the configured client.
//!
//! # Available Commands
//!
//! - `compat` - Render the browser compatibility table of a feature view
//! - `specs` - Render the specification table of a feature
//! - `inspect` - Summarise the resources in a payload
//! - `list` - List a collection payload, optionally following every page
//! - `routes` - Show the link routes a payload advertises
//!
//! # Examples
//!
//! ```bash
//! wpc-browse compat https://browsercompat.herokuapp.com/api/v1/view_features/5
//! wpc-browse specs flexbox.json --lang de
//! wpc-browse list browsers.json --all
//! ```
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` wins when set;
//! otherwise `--verbose` selects `debug`, `--quiet` selects `error`, and the
//! default is `warn`. Rendered output always goes to stdout.

mod common;
mod compat;
mod inspect;
mod list;
mod routes;
mod specs;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::BrowseConfig;

pub use common::{CommandContext, OutputFormat, is_url, text_table};

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Level for the tracing filter when `RUST_LOG` is unset.
    pub log_level: Option<String>,

    /// Explicit config file from `--config`.
    pub config_path: Option<PathBuf>,

    /// Language override from `--lang`.
    pub language: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stderr `tracing` subscriber.
    ///
    /// Only the first call in a process has an effect.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Browse web-compatibility data from the command line.
#[derive(Parser)]
#[command(
    name = "wpc-browse",
    about = "Render browser compatibility and specification tables from JSON:API payloads",
    version,
    long_about = "wpc-browse reads feature payloads from the web-compatibility API (or saved JSON files) \
                  and renders their browser compatibility and specification tables."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the configuration file (default: ~/.wpc-browse/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Language used to resolve localized strings
    #[arg(short, long, global = true, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the browser compatibility table of a feature view
    Compat(compat::CompatCommand),

    /// Render the specification table of a feature
    Specs(specs::SpecsCommand),

    /// Summarise the resources in a payload
    Inspect(inspect::InspectCommand),

    /// List the resources of a collection payload
    List(list::ListCommand),

    /// Show the link routes a payload advertises
    Routes(routes::RoutesCommand),
}

impl Cli {
    /// Set up logging, load the configuration, and run the command.
    ///
    /// # Errors
    ///
    /// Configuration, fetch, parse, and render errors of the command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            language: self.lang.clone(),
        }
    }

    /// Run the command with already-derived settings.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let browse_config =
            BrowseConfig::load_with_optional(config.config_path).await?.with_language(config.language);
        let context = CommandContext::new(browse_config);

        match self.command {
            Commands::Compat(cmd) => cmd.execute(&context).await,
            Commands::Specs(cmd) => cmd.execute(&context).await,
            Commands::Inspect(cmd) => cmd.execute(&context).await,
            Commands::List(cmd) => cmd.execute(&context).await,
            Commands::Routes(cmd) => cmd.execute(&context).await,
        }
    }
}
