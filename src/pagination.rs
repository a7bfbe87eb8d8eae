//! Pagination utilities for GitHub API responses.
//!
//! GitHub advertises further pages through the `Link` response header,
//! e.g. `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`.

use std::collections::HashMap;

use serde::Serialize;

/// Link relations parsed from a `Link` header, keyed by relation name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links {
    relations: HashMap<String, String>,
}

impl Links {
    /// Parse a raw `Link` header value.
    ///
    /// Entries that are not of the form `<url>; rel="..."` are skipped.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut relations = HashMap::new();

        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let Some(target) = parts.next().map(str::trim) else {
                continue;
            };
            let Some(url) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
                continue;
            };

            for param in parts {
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                if !key.trim().eq_ignore_ascii_case("rel") {
                    continue;
                }
                // rel may list several space-separated relation types
                for rel in value.trim().trim_matches('"').split_whitespace() {
                    relations.insert(rel.to_ascii_lowercase(), url.to_string());
                }
            }
        }

        Self { relations }
    }

    /// URL for a relation, if present.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.relations.get(rel).map(String::as_str)
    }

    /// Whether the server advertised another page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.relations.contains_key("next")
    }
}

/// A page of results from the GitHub API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items requested per page.
    pub per_page: u32,
    /// Link relations returned with this page.
    pub links: Links,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, per_page: u32, links: Links) -> Self {
        Self {
            items,
            page,
            per_page,
            links,
        }
    }

    /// Whether there are more pages.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.links.has_next()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            links: self.links,
        }
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GITHUB_LINK: &str = "<https://api.github.com/repositories/1/pulls?page=2>; rel=\"next\", \
                               <https://api.github.com/repositories/1/pulls?page=5>; rel=\"last\"";

    #[test]
    fn test_parse_next_and_last() {
        let links = Links::parse(GITHUB_LINK);
        assert!(links.has_next());
        assert_eq!(
            links.get("next"),
            Some("https://api.github.com/repositories/1/pulls?page=2")
        );
        assert_eq!(
            links.get("last"),
            Some("https://api.github.com/repositories/1/pulls?page=5")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let links = Links::parse(
            "<https://api.github.com/x?page=1>; rel=\"first\", <https://api.github.com/x?page=4>; rel=\"prev\"",
        );
        assert!(!links.has_next());
        assert!(links.get("prev").is_some());
    }

    #[test]
    fn test_empty_and_garbage_headers() {
        assert_eq!(Links::parse(""), Links::default());
        assert_eq!(Links::parse("rel=\"next\""), Links::default());
        assert!(!Links::parse("https://x; rel=\"next\"").has_next());
    }

    #[test]
    fn test_multiple_relation_names() {
        let links = Links::parse("<https://x/?page=2>; rel=\"next last\"");
        assert_eq!(links.get("next"), Some("https://x/?page=2"));
        assert_eq!(links.get("last"), Some("https://x/?page=2"));
    }

    #[test]
    fn test_unquoted_rel() {
        assert!(Links::parse("<https://x/?page=2>; rel=next").has_next());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 1, 100, Links::default());
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.page, 1);
        assert!(!mapped.has_more());
    }
}
