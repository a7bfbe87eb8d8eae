//! CLI argument parsing types.
//!
//! [`Cli`] mirrors the command line; [`Config`] is the validated run
//! configuration derived from it once at startup.

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::classify::{parse_date, AnalysisWindow};
use crate::client::DEFAULT_API_URL;
use crate::error::Result;
use crate::notifications::Notifications;

/// GitHub repository analyzer command-line interface.
#[derive(Parser, Debug)]
#[command(name = "gh-analyzer", about = "GitHub repository analyzer", version)]
pub struct Cli {
    /// Show a list of repositories of an organization.
    #[arg(long)]
    pub org: Option<String>,

    /// Analyze the repository at this URL (e.g. https://github.com/owner/name).
    #[arg(long)]
    pub url: Option<String>,

    /// Branch to analyze (reserved, currently without effect).
    #[arg(long)]
    pub branch: Option<String>,

    /// Only count items created at or after this time ("YYYY-MM-DD HH:MM:SS", UTC).
    #[arg(long = "beginning-date", value_name = "DATE")]
    pub beginning_date: Option<String>,

    /// Only count items created before this time ("YYYY-MM-DD HH:MM:SS", UTC).
    #[arg(long = "end-date", value_name = "DATE")]
    pub end_date: Option<String>,

    /// With --url, list contributors only and skip pull requests and issues.
    #[arg(long)]
    pub contributors_only: bool,

    /// Run the built-in self-checks.
    #[arg(long)]
    pub self_checking: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    /// GitHub API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// What a run should do, decided once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub org: Option<String>,
    pub url: Option<String>,
    pub branch: Option<String>,
    /// `None` when the date arguments were rejected.
    pub window: Option<AnalysisWindow>,
    pub contributors_only: bool,
    pub self_check: bool,
    pub debug: bool,
    pub api_url: String,
}

impl Config {
    /// Validate the command line against the current time.
    ///
    /// Invalid dates are recorded in `notes` and leave `window` empty, which
    /// disables repository analysis for the run.
    pub fn from_cli(cli: Cli, now: DateTime<Utc>, notes: &mut Notifications) -> Self {
        let window = match Self::window(&cli, now) {
            Ok(window) => Some(window),
            Err(e) => {
                notes.record(&e);
                None
            }
        };

        Self {
            org: cli.org.filter(|s| !s.trim().is_empty()),
            url: cli.url.filter(|s| !s.trim().is_empty()),
            branch: cli.branch,
            window,
            contributors_only: cli.contributors_only,
            self_check: cli.self_checking,
            debug: cli.debug,
            api_url: cli.api_url,
        }
    }

    fn window(cli: &Cli, now: DateTime<Utc>) -> Result<AnalysisWindow> {
        let begin = cli.beginning_date.as_deref().map(parse_date).transpose()?;
        let end = cli.end_date.as_deref().map(parse_date).transpose()?;
        AnalysisWindow::new(begin, end, now)
    }

    /// Whether the run has anything to query.
    pub fn has_target(&self) -> bool {
        self.org.is_some() || self.url.is_some()
    }
}
