//! List trait for fetching paged collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::{GithubClient, Resource};
use crate::error::AnalyzerError;
use crate::notifications::Notifications;
use crate::pagination::Page;

/// Default page size for list operations (GitHub caps `per_page` at 100).
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// List entities of a collection endpoint with pagination support.
///
/// Implementors describe where their collection lives; paging, decoding and
/// failure handling are shared. A failed page is recorded in the
/// notifications and comes back empty without a `next` link, so a listing
/// that hits an error stops with whatever it has gathered so far. Items are
/// decoded one at a time: an unreadable item is skipped with a notification
/// and the rest of the page, and the pages after it, are still used.
///
/// # Example
///
/// ```ignore
/// use gh_analyzer::{GithubClient, List, Notifications, PullRequest, RepositoryIdentity};
///
/// let client = GithubClient::new("https://api.github.com")?;
/// let repo = RepositoryIdentity::parse("https://github.com/rust-lang/rust")?;
/// let mut notes = Notifications::new();
///
/// // Fetch a single page
/// let page = PullRequest::list_page(&client, &repo, 1, 50, &mut notes).await;
///
/// // Fetch all pages
/// let all = PullRequest::list_all(&client, &repo, 100, &mut notes).await;
/// ```
#[async_trait]
pub trait List: DeserializeOwned + Send {
    /// What the collection belongs to (an organization, a repository).
    type Scope: ?Sized + Sync;

    /// API path of the collection, relative to the API base URL.
    fn collection_path(scope: &Self::Scope) -> String;

    /// Extra query parameters sent with every page request.
    fn collection_query() -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Whether a decoded item belongs to this collection.
    fn is_member(&self) -> bool {
        true
    }

    /// List a single page of the collection.
    ///
    /// # Arguments
    ///
    /// * `client` - The GitHub API client
    /// * `scope` - Owner of the collection
    /// * `page` - Page number (1-indexed)
    /// * `per_page` - Number of items per page (max 100)
    /// * `notes` - Receives a notification if the request fails or an item
    ///   cannot be read
    async fn list_page(
        client: &GithubClient,
        scope: &Self::Scope,
        page: u32,
        per_page: u32,
        notes: &mut Notifications,
    ) -> Page<Self> {
        let path = Self::collection_path(scope);
        let mut query = Self::collection_query();
        query.push(("per_page", per_page.to_string()));
        query.push(("page", page.to_string()));

        let resource: Resource<Vec<serde_json::Value>> = client.fetch(&path, &query, notes).await;

        let mut items = Vec::with_capacity(resource.body.len());
        for value in resource.body {
            match serde_json::from_value::<Self>(value) {
                Ok(item) if item.is_member() => items.push(item),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(%path, page, "skipping unreadable item");
                    notes.record(&AnalyzerError::from(e));
                }
            }
        }

        Page::new(items, page, per_page, resource.links)
    }

    /// List every page of the collection, in page order.
    ///
    /// Pages are requested with an increasing page number for as long as the
    /// previous response advertised a `next` relation.
    async fn list_all(
        client: &GithubClient,
        scope: &Self::Scope,
        per_page: u32,
        notes: &mut Notifications,
    ) -> Vec<Self> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(client, scope, page, per_page, notes).await;
            let has_more = result.has_more();
            tracing::debug!(page, items = result.len(), has_more, "fetched page");
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;
        }

        all_items
    }
}
