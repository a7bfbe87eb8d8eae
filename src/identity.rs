//! Repository identity parsing and resolution.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::client::GithubClient;
use crate::error::{AnalyzerError, Result};
use crate::notifications::Notifications;

/// The `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

impl RepositoryIdentity {
    /// Parse a repository web URL such as `https://github.com/owner/name`.
    ///
    /// The path must consist of exactly two non-empty segments; one trailing
    /// slash is tolerated. Query strings and fragments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidRepositoryUrl`] for anything else.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || AnalyzerError::InvalidRepositoryUrl(input.to_string());

        let url = Url::parse(input.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid());
        }

        let mut segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();
        if segments.last() == Some(&"") {
            segments.pop();
        }

        // path segments arrive percent-encoded; api_path re-encodes the decoded form
        let decode = |segment: &str| {
            urlencoding::decode(segment)
                .map(|s| s.into_owned())
                .map_err(|_| invalid())
        };

        match segments.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: decode(*owner)?,
                name: decode(*name)?,
            }),
            _ => Err(invalid()),
        }
    }

    /// The `owner/name` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// API path of a resource under this repository, e.g. `repos/o/n/pulls`.
    pub fn api_path(&self, resource: &str) -> String {
        format!(
            "repos/{}/{}/{resource}",
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.name)
        )
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Validate `url` as a live GitHub repository and return its identity.
///
/// The URL is parsed before any network access; a malformed URL, a failed
/// repository check, a foreign server or a non-200 answer yields `None` and one
/// notification.
#[tracing::instrument(skip(client, notes))]
pub async fn resolve(
    client: &GithubClient,
    url: &str,
    notes: &mut Notifications,
) -> Option<RepositoryIdentity> {
    let identity = match RepositoryIdentity::parse(url) {
        Ok(identity) => identity,
        Err(e) => {
            notes.record(&e);
            return None;
        }
    };

    match client.check_repository(url).await {
        Ok(()) => {
            tracing::debug!(%identity, "repository resolved");
            Some(identity)
        }
        Err(error) => {
            tracing::warn!(%error, "repository check failed");
            notes.push(format!("Repository not found: {url}"));
            None
        }
    }
}
