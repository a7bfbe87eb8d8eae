//! Repository model and trait implementations.

use serde::{Deserialize, Serialize};

use crate::traits::List;

/// A repository as listed under an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// The `owner/name` form, e.g. "rust-lang/cargo".
    pub full_name: String,
}

impl List for Repository {
    /// Organization login.
    type Scope = str;

    fn collection_path(org: &str) -> String {
        format!("orgs/{}/repos", urlencoding::encode(org))
    }
}
