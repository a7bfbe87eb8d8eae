//! GitHub API client.
//!
//! Low-level HTTP client that issues single requests against the REST API.
//! Higher-level collection operations are implemented via the `List` trait
//! on model types.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AnalyzerError, Result};
use crate::notifications::Notifications;
use crate::pagination::Links;

/// Public GitHub REST API host.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// `Server` header value sent by github.com for repository pages.
pub const GITHUB_SERVER: &str = "GitHub.com";

const USER_AGENT: &str = concat!("gh-analyzer/", env!("CARGO_PKG_VERSION"));
const API_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// A decoded response body together with its pagination links.
#[derive(Debug, Clone, Default)]
pub struct Resource<T> {
    pub body: T,
    pub links: Links,
}

/// Low-level GitHub API client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use gh_analyzer::{GithubClient, Notifications, Repository};
///
/// # async fn example() -> gh_analyzer::Result<()> {
/// let client = GithubClient::new("https://api.github.com")?;
/// let mut notes = Notifications::new();
/// let repos = client
///     .fetch::<Vec<Repository>>("orgs/rust-lang/repos", &[], &mut notes)
///     .await;
/// println!("{} repositories", repos.body.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    base_url: Arc<Url>,
    expected_server: Arc<str>,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url.as_str())
            .field("expected_server", &self.expected_server)
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Create a new client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so relative paths join underneath it
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(API_MEDIA_TYPE));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(AnalyzerError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            expected_server: Arc::from(GITHUB_SERVER),
        })
    }

    /// Override the `Server` header value accepted by [`check_repository`](Self::check_repository).
    #[must_use]
    pub fn with_expected_server(mut self, server: &str) -> Self {
        self.expected_server = Arc::from(server);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch one resource, degrading any failure to an empty body.
    ///
    /// Failures are recorded in `notes` and logged; the caller receives
    /// `T::default()` and no links, which ends any pagination in progress.
    #[tracing::instrument(skip(self, query, notes))]
    pub async fn fetch<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        notes: &mut Notifications,
    ) -> Resource<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.get_json(path, query).await {
            Ok(resource) => resource,
            Err(e) => {
                notes.record(&e);
                Resource::default()
            }
        }
    }

    /// Make a GET request and decode the JSON body.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Resource<T>> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%url, ?query, "GET");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(AnalyzerError::HttpError)?;

        let response = Self::check_response(response).await?;

        let links = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(Links::parse)
            .unwrap_or_default();

        let bytes = response.bytes().await.map_err(AnalyzerError::HttpError)?;
        let body = serde_json::from_slice(&bytes)?;

        Ok(Resource { body, links })
    }

    /// Check that `url` is a live page served by GitHub.
    ///
    /// The page must answer `200 OK` and carry the expected `Server` header.
    #[tracing::instrument(skip(self))]
    pub async fn check_repository(&self, url: &str) -> Result<()> {
        let response = self
            .http
            .head(url)
            .header(header::ACCEPT, "text/html")
            .send()
            .await
            .map_err(AnalyzerError::HttpError)?;

        let status = response.status();
        let server = response
            .headers()
            .get(header::SERVER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        tracing::debug!(%status, ?server, "repository check response");

        let recognized = server
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(&self.expected_server));

        if status == StatusCode::OK && recognized {
            Ok(())
        } else {
            Err(AnalyzerError::UnexpectedServer {
                url: url.to_string(),
                server,
                status: status.as_u16(),
            })
        }
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers();
        let exhausted = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");

        if status == StatusCode::TOO_MANY_REQUESTS
            || (status == StatusCode::FORBIDDEN && exhausted)
        {
            let reset_at = headers
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            return Err(AnalyzerError::RateLimited { reset_at });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(AnalyzerError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // GitHub error bodies look like {"message": "...", "documentation_url": "..."}
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return format!("{msg} (HTTP {status})");
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = GithubClient::new(DEFAULT_API_URL).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("GithubClient"));
        assert!(debug.contains("base_url"));
        assert!(debug.contains("GitHub.com"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = GithubClient::new("https://api.github.com").unwrap();
        let client2 = GithubClient::new("https://api.github.com/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_relative_paths_join_under_base() {
        let client = GithubClient::new("https://ghe.example.com/api/v3").unwrap();
        let url = client.base_url().join("orgs/acme/repos").unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/orgs/acme/repos");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            GithubClient::new("not a url"),
            Err(AnalyzerError::UrlError(_))
        ));
    }
}
