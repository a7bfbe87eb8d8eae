//! Organization and repository analyses.
//!
//! Each operation composes identity resolution, collection listing and
//! classification. None of them fail outright: sub-requests that go wrong
//! leave a notification and contribute empty results, and only an
//! unresolvable repository makes a repository operation return `None`.

use chrono::Duration;
use serde::Serialize;

use crate::classify::{
    classify, AnalysisWindow, Classification, ISSUE_STALE_DAYS, PULL_REQUEST_STALE_DAYS,
};
use crate::client::GithubClient;
use crate::identity::{resolve, RepositoryIdentity};
use crate::models::{Contributor, Issue, PullRequest, Repository};
use crate::notifications::Notifications;
use crate::traits::{List, DEFAULT_PAGE_SIZE};

/// Result of a full repository analysis.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryReport {
    pub identity: RepositoryIdentity,
    pub window: AnalysisWindow,
    pub contributors: Vec<Contributor>,
    pub pull_requests: Classification,
    pub issues: Classification,
}

/// Runs analyses against one GitHub API.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: GithubClient,
}

impl Analyzer {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }

    /// Full names of an organization's repositories (first page only).
    #[tracing::instrument(skip(self, notes))]
    pub async fn organization_repositories(
        &self,
        org: &str,
        notes: &mut Notifications,
    ) -> Vec<String> {
        Repository::list_page(&self.client, org, 1, DEFAULT_PAGE_SIZE, notes)
            .await
            .map(|repo| repo.full_name)
            .items
    }

    /// Contributors of the repository at `url` (first page only).
    ///
    /// Returns `None` if the repository cannot be resolved.
    #[tracing::instrument(skip(self, notes))]
    pub async fn contributors(
        &self,
        url: &str,
        notes: &mut Notifications,
    ) -> Option<(RepositoryIdentity, Vec<Contributor>)> {
        let identity = resolve(&self.client, url, notes).await?;
        let contributors = self.first_contributors(&identity, notes).await;
        Some((identity, contributors))
    }

    /// Contributors plus pull request and issue counts for `window`.
    ///
    /// Returns `None` if the repository cannot be resolved.
    #[tracing::instrument(skip(self, notes))]
    pub async fn analyze(
        &self,
        url: &str,
        window: AnalysisWindow,
        notes: &mut Notifications,
    ) -> Option<RepositoryReport> {
        let identity = resolve(&self.client, url, notes).await?;

        let contributors = self.first_contributors(&identity, notes).await;

        let pulls =
            PullRequest::list_all(&self.client, &identity, DEFAULT_PAGE_SIZE, notes).await;
        let pull_requests = classify(
            &pulls,
            &window,
            Duration::days(PULL_REQUEST_STALE_DAYS),
        );
        tracing::debug!(fetched = pulls.len(), %pull_requests, "classified pull requests");

        let issue_items =
            Issue::list_all(&self.client, &identity, DEFAULT_PAGE_SIZE, notes).await;
        let issues = classify(&issue_items, &window, Duration::days(ISSUE_STALE_DAYS));
        tracing::debug!(fetched = issue_items.len(), %issues, "classified issues");

        Some(RepositoryReport {
            identity,
            window,
            contributors,
            pull_requests,
            issues,
        })
    }

    async fn first_contributors(
        &self,
        identity: &RepositoryIdentity,
        notes: &mut Notifications,
    ) -> Vec<Contributor> {
        Contributor::list_page(&self.client, identity, 1, DEFAULT_PAGE_SIZE, notes)
            .await
            .items
    }
}
