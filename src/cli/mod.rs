//! Command-line interface parsing and handling
//!
//! Every subcommand resolves a [`CatalogSource`] the same way, then either
//! starts the interactive browser or prints a one-shot result.

pub mod list;
pub mod scout;
pub mod settings;
pub mod teams;


use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::catalog::{CatalogSource, LocalSource, RemoteSource};
use crate::core::config::data::BASE_URL_ENV;
use crate::core::config::Config;
use crate::logging::{self, LogTarget};
use crate::ui::browser::{run_browser, BrowserOptions};

#[derive(Parser)]
#[command(name = "scoutdex")]
#[command(version)]
#[command(about = "Browse a character encyclopedia or scout a random player")]
#[command(
    long_about = "Scoutdex is a terminal character encyclopedia and randomizer. Characters come \
from the catalog backend's REST API, or from a CSV export when --csv is given.\n\n\
Environment Variables:\n\
  SCOUTDEX_BASE_URL    Backend URL (overrides the config file, not --base-url)\n\
  SCOUTDEX_CONFIG_DIR  Directory holding config.toml\n\
  SCOUTDEX_LOG         Log filter directives, e.g. scoutdex=debug\n\n\
Controls:\n\
  Tab               Switch between Scout and Encyclopedia\n\
  Enter/Space       Scout a random player (Scout view)\n\
  Type              Search by name or nickname (Encyclopedia)\n\
  F1-F4             Cycle element, position, gender and team filters\n\
  Left/Right        Previous/next page\n\
  Up/Down, Enter    Select a character and show its details\n\
  Ctrl+R            Retry the last request\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL, e.g. http://localhost:8080
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Read characters from a CSV file instead of the backend
    #[arg(long, global = true, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive browser (default)
    Browse,
    /// Draw one random character and print it
    Scout {
        /// Skip the minimum scouting delay
        #[arg(long)]
        instant: bool,
    },
    /// Print one page of the encyclopedia
    List(list::ListArgs),
    /// Print the team filter options
    Teams,
    /// Set a configuration value
    Set {
        /// Configuration key (base-url, page-size, csv-path, scout-delay-ms)
        key: String,
        /// Value to store
        value: String,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Show the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Browse);
    let interactive = matches!(command, Commands::Browse);

    if let Err(e) = logging::init(LogTarget::select(args.log.clone(), interactive)) {
        eprintln!("⚠️  Logging disabled: {e}");
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    match command {
        Commands::Set { key, value } => settings::set(config, &key, &value),
        Commands::Unset { key } => settings::unset(config, &key),
        Commands::Config => {
            config.print_all();
            Ok(())
        }
        Commands::Browse => {
            let source = open_source(args.base_url.as_deref(), args.csv, &config)?;
            run_browser(
                source,
                BrowserOptions {
                    page_size: config.page_size(),
                    scout_delay: config.scout_delay(),
                },
            )
            .await
        }
        Commands::Scout { instant } => {
            let source = open_source(args.base_url.as_deref(), args.csv, &config)?;
            let delay = if instant {
                Duration::ZERO
            } else {
                config.scout_delay()
            };
            scout::scout_once(source.as_ref(), delay).await
        }
        Commands::List(list_args) => {
            let source = open_source(args.base_url.as_deref(), args.csv, &config)?;
            list::list_page(source.as_ref(), &list_args, config.page_size()).await
        }
        Commands::Teams => {
            let source = open_source(args.base_url.as_deref(), args.csv, &config)?;
            teams::list_teams(source.as_ref()).await
        }
    }
}

/// Where characters come from: an explicit CSV file, then the configured
/// one, then the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChoice {
    Csv(PathBuf),
    Remote(String),
}

pub fn choose_source(
    base_url_flag: Option<&str>,
    csv_flag: Option<PathBuf>,
    base_url_env: Option<&str>,
    config: &Config,
) -> SourceChoice {
    if let Some(path) = csv_flag.or_else(|| config.csv_path.clone()) {
        return SourceChoice::Csv(path);
    }
    SourceChoice::Remote(config.resolve_base_url(base_url_flag, base_url_env))
}

fn open_source(
    base_url_flag: Option<&str>,
    csv_flag: Option<PathBuf>,
    config: &Config,
) -> Result<Arc<dyn CatalogSource>, Box<dyn Error>> {
    let env = std::env::var(BASE_URL_ENV).ok();
    match choose_source(base_url_flag, csv_flag, env.as_deref(), config) {
        SourceChoice::Csv(path) => {
            let source = LocalSource::from_csv_path(&path)?;
            debug!(path = %path.display(), records = source.records().len(), "Loaded CSV catalog");
            Ok(Arc::new(source))
        }
        SourceChoice::Remote(base_url) => {
            debug!(%base_url, "Using remote catalog");
            Ok(Arc::new(RemoteSource::new(reqwest::Client::new(), base_url)))
        }
    }
}
