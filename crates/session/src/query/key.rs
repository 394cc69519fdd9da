//! Hierarchical cache keys

use fastadmin_http::types::Paging;
use std::fmt;

/// Cache key as a list of segments; invalidation matches by prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The authenticated user's own profile
    pub fn current_user() -> Self {
        Self::new(["usersReadUserMe"])
    }

    /// Every user listing regardless of page
    pub fn users() -> Self {
        Self::new(["users"])
    }

    pub fn users_page(paging: Paging) -> Self {
        Self::new([
            "users".to_string(),
            paging.skip.to_string(),
            paging.limit.to_string(),
        ])
    }

    /// Every item listing regardless of page
    pub fn items() -> Self {
        Self::new(["items"])
    }

    pub fn items_page(paging: Paging) -> Self {
        Self::new([
            "items".to_string(),
            paging.skip.to_string(),
            paging.limit.to_string(),
        ])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` selects this key
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching() {
        let page = QueryKey::users_page(Paging::page(1, 10));
        assert!(page.starts_with(&QueryKey::users()));
        assert!(page.starts_with(&page));
        assert!(!page.starts_with(&QueryKey::items()));
        assert!(!QueryKey::current_user().starts_with(&QueryKey::users()));
        assert_eq!(page.to_string(), "[users, 10, 10]");
    }
}
