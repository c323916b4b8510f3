use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use scraper_core::{FilterName, RequestError, SearchRequest, DEFAULT_IMAGE_COUNT};
use scraper_logging::{LogDestination, DEFAULT_LOG_FILE};

use crate::config::DEFAULT_CONFIG_FILE;

/// Submit Google Images scraping jobs and follow them to completion
#[derive(Debug, Parser)]
#[command(name = "image-scraper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the RON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the scraping service (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Status poll interval in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Where log output goes
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log file used by the `file` and `both` targets
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a search and wait for the archive
    Scrape(ScrapeArgs),

    /// Follow an already submitted task
    Watch {
        task_id: String,

        /// Download the finished archive into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the download URL of a task
    DownloadUrl { task_id: String },

    /// List filter names and the tokens the service understands
    Filters,
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Search term
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Number of images to scrape
    #[arg(short = 'n', long, default_value_t = DEFAULT_IMAGE_COUNT)]
    pub count: u32,

    /// Image size token, e.g. `l`, `m` or `i`
    #[arg(long)]
    pub size: Option<String>,

    /// Color token, e.g. `gray` or `specific,isc:red`
    #[arg(long)]
    pub color: Option<String>,

    /// Image type token, e.g. `clipart`
    #[arg(long = "type")]
    pub image_type: Option<String>,

    /// Time token, e.g. `d`, `w`, `m` or `y`
    #[arg(long, alias = "recency")]
    pub time: Option<String>,

    /// Usage rights token, `cl` or `ol`
    #[arg(long, alias = "usage-rights")]
    pub user_rights: Option<String>,

    /// Search filter as NAME=VALUE, e.g. `size=l` or `color=specific,isc:red`.
    /// The dedicated flags above take precedence.
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(FilterName, String)>,

    /// Download the finished archive into this directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ScrapeArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    pub fn to_request(&self) -> Result<SearchRequest, RequestError> {
        let request = SearchRequest::new(self.query_text(), self.count)?;
        Ok(self
            .filters
            .iter()
            .cloned()
            .chain(self.filter_flags())
            .fold(request, |request, (name, value)| {
                request.with_filter(name, value)
            }))
    }

    fn filter_flags(&self) -> Vec<(FilterName, String)> {
        [
            (FilterName::Size, &self.size),
            (FilterName::Color, &self.color),
            (FilterName::Type, &self.image_type),
            (FilterName::Time, &self.time),
            (FilterName::UserRights, &self.user_rights),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|value| (name, value.trim().to_string())))
        .collect()
    }
}

impl Cli {
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn parse_filter(raw: &str) -> Result<(FilterName, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    let name = name.parse::<FilterName>().map_err(|err| err.to_string())?;
    Ok((name, value.trim().to_string()))
}
