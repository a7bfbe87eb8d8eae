//! Pull request and issue models.
//!
//! Only the creation/closing timestamps matter for the analysis; the rest
//! is kept for display and debugging and tolerates missing or null values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::identity::RepositoryIdentity;
use crate::traits::List;

/// Something that is opened and possibly closed: a pull request or an issue.
pub trait WorkItem {
    /// When the item was opened.
    fn created_at(&self) -> DateTime<Utc>;

    /// When the item was closed, if it has been.
    fn closed_at(&self) -> Option<DateTime<Utc>>;
}

/// Current state as reported by GitHub.
///
/// Classification ignores this field and judges closedness from `closed_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub state: ItemState,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl WorkItem for PullRequest {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }
}

impl List for PullRequest {
    type Scope = RepositoryIdentity;

    fn collection_path(repo: &RepositoryIdentity) -> String {
        repo.api_path("pulls")
    }

    fn collection_query() -> Vec<(&'static str, String)> {
        vec![("state", "all".to_string())]
    }
}

/// An issue.
///
/// The issues endpoint also returns pull requests; those carry a
/// `pull_request` member and are dropped from issue listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub state: ItemState,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    /// Check if this entry is a pull request seen through the issues endpoint.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

impl WorkItem for Issue {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }
}

impl List for Issue {
    type Scope = RepositoryIdentity;

    fn collection_path(repo: &RepositoryIdentity) -> String {
        repo.api_path("issues")
    }

    fn collection_query() -> Vec<(&'static str, String)> {
        vec![("state", "all".to_string())]
    }

    fn is_member(&self) -> bool {
        !self.is_pull_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_deserialize() {
        let pr: PullRequest = serde_json::from_value(serde_json::json!({
            "number": 1347,
            "state": "closed",
            "title": "Amazing new feature",
            "user": { "login": "octocat" },
            "created_at": "2011-01-26T19:01:12Z",
            "updated_at": "2011-01-26T19:01:12Z",
            "closed_at": "2011-01-26T19:01:12Z",
            "merged_at": "2011-01-26T19:01:12Z"
        }))
        .unwrap();

        assert_eq!(pr.number, 1347);
        assert_eq!(pr.state, ItemState::Closed);
        assert_eq!(pr.title, "Amazing new feature");
        assert_eq!(pr.closed_at(), Some(pr.created_at()));
    }

    #[test]
    fn test_open_pull_request_has_no_closed_at() {
        let pr: PullRequest = serde_json::from_value(serde_json::json!({
            "number": 7,
            "state": "open",
            "created_at": "2024-03-01T00:00:00Z",
            "closed_at": null
        }))
        .unwrap();

        assert_eq!(pr.state, ItemState::Open);
        assert!(pr.closed_at().is_none());
    }

    #[test]
    fn test_missing_or_odd_fields_use_defaults() {
        let pr: PullRequest = serde_json::from_value(serde_json::json!({
            "title": null,
            "state": "draft",
            "created_at": "2024-03-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(pr.number, 0);
        assert_eq!(pr.title, "");
        assert_eq!(pr.state, ItemState::Unknown);

        let issue: Issue = serde_json::from_value(serde_json::json!({
            "number": null,
            "state": null,
            "created_at": "2024-03-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(issue.number, 0);
        assert_eq!(issue.state, ItemState::Unknown);
    }

    #[test]
    fn test_created_at_is_required() {
        let result: Result<Issue, _> =
            serde_json::from_value(serde_json::json!({ "number": 4, "state": "open" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_issue_listing_drops_pull_requests() {
        let items: Vec<Issue> = serde_json::from_value(serde_json::json!([
            { "number": 1, "state": "open", "created_at": "2024-03-01T00:00:00Z" },
            {
                "number": 2,
                "state": "open",
                "created_at": "2024-03-01T00:00:00Z",
                "pull_request": { "url": "https://api.github.com/repos/o/n/pulls/2" }
            }
        ]))
        .unwrap();

        let kept: Vec<u64> = items
            .iter()
            .filter(|i| i.is_member())
            .map(|i| i.number)
            .collect();
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn test_collection_queries_request_all_states() {
        assert_eq!(
            PullRequest::collection_query(),
            vec![("state", "all".to_string())]
        );
        assert_eq!(Issue::collection_query(), PullRequest::collection_query());
    }
}
