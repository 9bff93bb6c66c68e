use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::ExplorerConfig;
use crate::index_storage::IndexLocation;
use crate::search::{DEFAULT_SEARCH_LIMIT, KeywordField, KeywordFilter, SearchOptions};
use crate::service::ArchiveService;
use crate::utils::DATA_PATH_ENV;

#[derive(Parser)]
#[command(name = "chat-archive-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search exported chat conversation archives", long_about = None)]
pub struct Cli {
    /// Conversation export (JSON array); defaults to $CONVERSATIONS_DATA_PATH
    #[arg(long, global = true, env = DATA_PATH_ENV)]
    pub data: Option<PathBuf>,

    /// Where the persisted search index lives
    #[arg(long, global = true, value_enum, default_value_t = IndexLocationArg::Sidecar)]
    pub index_location: IndexLocationArg,

    /// Ignore any persisted search index and rebuild it
    #[arg(long, global = true)]
    pub rebuild_index: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Command-line spelling of [`IndexLocation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IndexLocationArg {
    /// Next to the export file
    Sidecar,
    /// In the platform cache directory
    Cache,
}

impl From<IndexLocationArg> for IndexLocation {
    fn from(arg: IndexLocationArg) -> Self {
        match arg {
            IndexLocationArg::Sidecar => Self::Sidecar,
            IndexLocationArg::Cache => Self::Cache,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the archive
    Stats,
    /// Per-day conversation counts for a year
    Contribution {
        /// Calendar year (defaults to the current UTC year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// List conversations created on a UTC day
    Day {
        /// Day as YYYY-MM-DD
        date: String,
    },
    /// Show one conversation with its messages in time order
    Show {
        /// Conversation id
        id: String,
    },
    /// Full-text search over titles and message content
    Search {
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
        /// Only return conversations generated by this model
        #[arg(long)]
        model: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = ExplorerConfig::resolve(cli.data.as_deref())
        .with_index_location(cli.index_location.into())
        .with_rebuild_index(cli.rebuild_index);
    let service = ArchiveService::load(&config)?;

    execute(&service, command)
}

/// Run one command against a loaded service, printing the response as JSON
pub fn execute(service: &ArchiveService, command: &Commands) -> Result<()> {
    match command {
        Commands::Stats => print_json(&service.stats()),
        Commands::Contribution { year } => {
            let year = year.unwrap_or_else(|| Utc::now().year());
            print_json(&service.contribution(year))
        }
        Commands::Day { date } => {
            validate_day(date)?;
            print_json(&service.conversations_for_date(date))
        }
        Commands::Show { id } => {
            let detail = service
                .conversation_detail(id)
                .with_context(|| format!("Conversation not found: {}", id))?;
            print_json(&detail)
        }
        Commands::Search { query, limit, model } => {
            let mut options = SearchOptions::new(*limit);
            if let Some(model) = model {
                options = options.with_filter(KeywordFilter::new(KeywordField::Model, model));
            }
            print_json(&service.search_with(query, &options))
        }
    }
}

/// Day buckets are keyed by zero-padded dates, so `2023-1-2` must not pass
fn validate_day(date: &str) -> Result<()> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date {:?}, expected YYYY-MM-DD", date))?;
    if parsed.format("%Y-%m-%d").to_string() != date {
        bail!("Invalid date {:?}, expected YYYY-MM-DD", date);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}
