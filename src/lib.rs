//! GitHub repository analyzer.
//!
//! Queries the GitHub REST API to report an organization's repositories, a
//! repository's contributors, and counts of open, closed and stale pull
//! requests and issues inside an optional date window.
//!
//! # Quick Start
//!
//! ```no_run
//! use gh_analyzer::{AnalysisWindow, Analyzer, GithubClient, Notifications, PrettyPrint};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> gh_analyzer::Result<()> {
//!     let analyzer = Analyzer::new(GithubClient::new("https://api.github.com")?);
//!     let mut notes = Notifications::new();
//!
//!     let report = analyzer
//!         .analyze("https://github.com/rust-lang/cargo", AnalysisWindow::until_now(), &mut notes)
//!         .await;
//!     if let Some(report) = report {
//!         println!("{}", report.pretty_print());
//!     }
//!
//!     for note in notes.iter() {
//!         println!("{note}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Failure handling
//!
//! Requests never abort an analysis. A failed request is recorded in the
//! caller's [`Notifications`] and treated as an empty page; an unresolvable
//! repository makes the repository operations return `None`.

pub mod cli;
pub mod output;
pub mod selfcheck;

mod analysis;
mod classify;
mod client;
mod error;
mod identity;
mod models;
mod notifications;
mod pagination;
mod traits;

// Re-export core types
pub use analysis::{Analyzer, RepositoryReport};
pub use classify::{
    classify, parse_date, AnalysisWindow, Classification, DATE_FORMAT, ISSUE_STALE_DAYS,
    PULL_REQUEST_STALE_DAYS,
};
pub use client::{GithubClient, Resource, DEFAULT_API_URL, GITHUB_SERVER};
pub use error::{AnalyzerError, Result};
pub use identity::{resolve, RepositoryIdentity};
pub use notifications::Notifications;
pub use pagination::{Links, Page};

// Re-export traits
pub use output::PrettyPrint;
pub use traits::{List, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{
    Contributor, Issue, ItemState, PullRequest, Repository, WorkItem, ANONYMOUS_HANDLE,
};
