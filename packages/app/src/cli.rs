//! Command line arguments and the configuration derived from them.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, ValueEnum};
use repopulse_github::{GITHUB_API_BASE, PullRequestQuery};

pub const DEFAULT_OWNER: &str = "ybenesya";
pub const DEFAULT_REPO: &str = "CTFd";
pub const DEFAULT_DOT_OUT_PATH: &str = "graph.dot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDest {
    Stdout,
    File,
}

#[derive(Debug, Parser)]
#[command(name = "repopulse")]
#[command(
    about = "Fetch repo stats from GitHub and generate a commit graph for a merged branch",
    long_about = None
)]
pub struct Cli {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repository owner or organization
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Repository name
    #[arg(long, default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Branch, merged via pull request, to draw the commit graph for
    #[arg(long)]
    pub branch: String,

    /// Where to write logs
    #[arg(long, value_enum, default_value_t = LogDest::Stdout)]
    pub log_dest: LogDest,

    /// Log file path (required with --log-dest file)
    #[arg(long, required_if_eq("log_dest", "file"))]
    pub log_file_path: Option<PathBuf>,

    /// Log at DEBUG instead of INFO
    #[arg(long)]
    pub debug: bool,

    /// Output path for the .dot graph file
    #[arg(long, default_value = DEFAULT_DOT_OUT_PATH)]
    pub dot_out_path: PathBuf,

    /// Leave bot accounts out of the contributor ranking
    #[arg(long)]
    pub exclude_bot_users: bool,

    /// Only rank pull requests updated within this many days
    #[arg(long)]
    pub updated_since_days: Option<u32>,

    /// Stop listing pull requests after this many pages
    #[arg(long)]
    pub max_pr_pages: Option<u32>,

    /// GitHub API base URL
    #[arg(long, default_value = GITHUB_API_BASE)]
    pub api_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub destination: LogDestination,
    pub debug: bool,
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub dot_out_path: PathBuf,
    pub exclude_bot_users: bool,
    pub updated_since: Option<DateTime<Utc>>,
    pub max_pr_pages: Option<u32>,
    pub api_url: String,
    pub log: LogConfig,
}

impl AppConfig {
    /// Resolve relative options such as `--updated-since-days` against `now`.
    #[must_use]
    pub fn from_cli(cli: Cli, now: DateTime<Utc>) -> Self {
        let destination = match (cli.log_dest, cli.log_file_path) {
            (LogDest::File, Some(path)) => LogDestination::File(path),
            _ => LogDestination::Stdout,
        };

        Self {
            token: cli.token,
            owner: cli.owner,
            repo: cli.repo,
            branch: cli.branch,
            dot_out_path: cli.dot_out_path,
            exclude_bot_users: cli.exclude_bot_users,
            updated_since: cli
                .updated_since_days
                .map(|days| now - Duration::days(i64::from(days))),
            max_pr_pages: cli.max_pr_pages,
            api_url: cli.api_url,
            log: LogConfig {
                destination,
                debug: cli.debug,
            },
        }
    }

    /// The pull request listing used for the contributor ranking.
    #[must_use]
    pub fn pull_request_query(&self) -> PullRequestQuery {
        let mut query = PullRequestQuery::default();
        if let Some(updated_since) = self.updated_since {
            query = query.with_updated_since(updated_since);
        }
        if let Some(max_pages) = self.max_pr_pages {
            query = query.with_max_pages(max_pages);
        }
        query
    }
}
