//! Contributor model and trait implementations.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::identity::RepositoryIdentity;
use crate::traits::List;

/// Handle shown for contributors without a GitHub account.
pub const ANONYMOUS_HANDLE: &str = "-";

/// A repository contributor.
///
/// Anonymous contributors (commits whose e-mail maps to no account) carry no
/// `login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub login: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub contributions: u64,

    /// "User", "Bot" or "Anonymous".
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Contributor {
    /// The login, or [`ANONYMOUS_HANDLE`] when there is none.
    pub fn handle(&self) -> &str {
        self.login.as_deref().unwrap_or(ANONYMOUS_HANDLE)
    }
}

impl List for Contributor {
    type Scope = RepositoryIdentity;

    fn collection_path(repo: &RepositoryIdentity) -> String {
        repo.api_path("contributors")
    }

    fn collection_query() -> Vec<(&'static str, String)> {
        vec![("anon", "1".to_string())]
    }
}
