//! Case-insensitive title search.

use std::sync::Arc;

use serde::Serialize;

use super::memo::Memo;
use crate::blog::{BlogCollection, BlogRecord, CollectionId};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub match_count: usize,
    /// Matching titles in collection order.
    pub filtered_blogs: Vec<String>,
}

/// Titles of `blogs` containing `query`, ignoring case.
///
/// An empty query matches every title.
pub fn search(blogs: &[BlogRecord], query: &str) -> SearchResult {
    let needle = query.to_lowercase();
    let filtered_blogs: Vec<String> = blogs
        .iter()
        .filter(|blog| blog.title().to_lowercase().contains(&needle))
        .map(|blog| blog.title().to_owned())
        .collect();

    SearchResult { match_count: filtered_blogs.len(), filtered_blogs }
}

/// [`search`], memoized on (collection identity, query).
pub struct SearchDeriver {
    memo: Memo<(CollectionId, String), SearchResult>,
}

impl SearchDeriver {
    pub fn new() -> Self {
        Self { memo: Memo::new("search") }
    }

    pub fn derive(&self, blogs: &BlogCollection, query: &str) -> Arc<SearchResult> {
        self.memo
            .get_or_compute((blogs.id(), query.to_owned()), || search(blogs, query))
    }

    /// How many searches have actually been run.
    pub fn computations(&self) -> u64 {
        self.memo.computations()
    }
}

impl Default for SearchDeriver {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(titles: &[&str]) -> BlogCollection {
        titles.iter().copied().map(BlogRecord::titled).collect()
    }

    #[test]
    fn matches_ignore_case_and_keep_order() {
        let blogs = collection(&["Privacy Policy", "Hello World", "hello again", "Bye"]);
        let result = search(&blogs, "HELLO");
        assert_eq!(result.filtered_blogs, ["Hello World", "hello again"]);
        assert_eq!(result.match_count, 2);
    }

    #[test]
    fn empty_query_matches_everything_in_order() {
        let titles = ["c", "a", "b", "a"];
        let result = search(&collection(&titles), "");
        assert_eq!(result.filtered_blogs, titles);
        assert_eq!(result.match_count, 4);
    }

    #[test]
    fn no_matches() {
        let result = search(&collection(&["Rust", "Go"]), "python");
        assert_eq!(result, SearchResult { match_count: 0, filtered_blogs: vec![] });
    }

    #[test]
    fn every_hit_contains_the_query_and_count_agrees() {
        let blogs = collection(&["Data Privacy", "privacy 101", "Hello", "PRIVATE", "apriva"]);
        for query in ["priva", "PRIVACY", "o", "", "zzz"] {
            let result = search(&blogs, query);
            assert_eq!(result.match_count, result.filtered_blogs.len());
            for title in &result.filtered_blogs {
                assert!(title.to_lowercase().contains(&query.to_lowercase()), "{title} / {query}");
            }
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(search(&collection(&["A"]), "a")).unwrap();
        assert_eq!(json, serde_json::json!({ "matchCount": 1, "filteredBlogs": ["A"] }));
    }

    #[test]
    fn memo_is_keyed_on_collection_and_query() {
        let deriver = SearchDeriver::new();
        let blogs = collection(&["Hello", "World"]);

        let first = deriver.derive(&blogs, "o");
        let again = deriver.derive(&blogs, "o");
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(deriver.computations(), 1);

        deriver.derive(&blogs, "w");
        assert_eq!(deriver.computations(), 2);

        deriver.derive(&collection(&["Hello", "World"]), "w");
        assert_eq!(deriver.computations(), 3);
    }
}
