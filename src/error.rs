//! Error types for GitHub API analysis.

use thiserror::Error;

/// Errors that can occur while querying and analyzing a repository.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Repository URL could not be parsed into an `owner/name` identity.
    #[error("Invalid repository URL '{0}': expected format like 'https://github.com/owner/name'")]
    InvalidRepositoryUrl(String),

    /// A date argument did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("Invalid date '{0}': expected format 'YYYY-MM-DD HH:MM:SS'")]
    InvalidDate(String),

    /// The analysis window is empty or inverted.
    #[error("Invalid date range: beginning {begin} is not before end {end}")]
    InvalidDateRange { begin: String, end: String },

    /// The checked URL is not served by GitHub.
    #[error("'{url}' is not a GitHub repository (server: {server:?}, status: {status})")]
    UnexpectedServer {
        url: String,
        server: Option<String>,
        status: u16,
    },

    /// API request failed.
    #[error("GitHub API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, limit resets at {reset_at:?} (epoch seconds)")]
    RateLimited { reset_at: Option<i64> },
}

impl AnalyzerError {
    /// The one-line message shown to the user when this error is recovered from.
    pub fn notification(&self) -> String {
        match self {
            Self::InvalidRepositoryUrl(url) => format!("Invalid repository URL: {url}"),
            Self::InvalidDate(value) => {
                format!("Invalid date '{value}', expected YYYY-MM-DD HH:MM:SS")
            }
            Self::InvalidDateRange { begin, end } => {
                format!("Beginning date {begin} must be before end date {end}")
            }
            Self::UnexpectedServer { url, .. } => format!("Repository not found: {url}"),
            Self::RateLimited { .. } => "API rate limit exceeded, try again later".to_string(),
            Self::ParseError(_) => {
                "API returned an unexpected response, try again later".to_string()
            }
            Self::ApiError { .. } | Self::HttpError(_) | Self::UrlError(_) => {
                "API not available, try again later".to_string()
            }
        }
    }
}

/// Result type alias for analyzer operations.
pub type Result<T> = core::result::Result<T, AnalyzerError>;
