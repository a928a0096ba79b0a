//! Aggregate statistics over a blog collection.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::memo::Memo;
use crate::blog::{BlogCollection, BlogRecord, CollectionId};

/// Titles containing this (case-insensitively) count as privacy-related.
const PRIVACY: &str = "privacy";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub total_blogs: usize,
    /// First record with the longest title; absent for an empty collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_with_longest_title: Option<BlogRecord>,
    pub number_of_blogs_with_privacy: usize,
    /// Titles in first-seen order, duplicates dropped.
    pub unique_blog_titles: Vec<String>,
}

/// Computes [`AnalyticsResult`] for `blogs`.
///
/// Title length is measured in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane (most emoji) counts as two.
pub fn analyze(blogs: &[BlogRecord]) -> AnalyticsResult {
    let mut longest: Option<(&BlogRecord, usize)> = None;
    let mut with_privacy = 0;
    let mut seen = HashSet::new();
    let mut unique_blog_titles = Vec::new();

    for blog in blogs {
        let len = blog.title().encode_utf16().count();
        // Strictly greater, so ties keep the earlier record.
        if longest.is_none_or(|(_, max)| len > max) {
            longest = Some((blog, len));
        }

        if blog.title().to_lowercase().contains(PRIVACY) {
            with_privacy += 1;
        }

        if seen.insert(blog.title()) {
            unique_blog_titles.push(blog.title().to_owned());
        }
    }

    AnalyticsResult {
        total_blogs: blogs.len(),
        blog_with_longest_title: longest.map(|(blog, _)| blog.clone()),
        number_of_blogs_with_privacy: with_privacy,
        unique_blog_titles,
    }
}

/// [`analyze`], memoized on collection identity.
pub struct AnalyticsDeriver {
    memo: Memo<CollectionId, AnalyticsResult>,
}

impl AnalyticsDeriver {
    pub fn new() -> Self {
        Self { memo: Memo::new("analytics") }
    }

    pub fn derive(&self, blogs: &BlogCollection) -> Arc<AnalyticsResult> {
        self.memo.get_or_compute(blogs.id(), || analyze(blogs))
    }

    /// How many times the analytics have actually been computed.
    pub fn computations(&self) -> u64 {
        self.memo.computations()
    }
}

impl Default for AnalyticsDeriver {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(titles: &[&str]) -> BlogCollection {
        titles.iter().copied().map(BlogRecord::titled).collect()
    }

    #[test]
    fn summarizes_a_mixed_collection() {
        let blogs = collection(&["Privacy Policy", "Hello World", "Privacy Policy"]);
        let result = analyze(&blogs);

        assert_eq!(result.total_blogs, 3);
        assert_eq!(result.number_of_blogs_with_privacy, 2);
        assert_eq!(result.unique_blog_titles, ["Privacy Policy", "Hello World"]);
        assert_eq!(result.blog_with_longest_title.as_ref(), Some(&blogs[0]));
    }

    #[test]
    fn longest_title_ties_go_to_the_first_record() {
        let first = BlogRecord::titled("abcd").with_field("id", 1);
        let second = BlogRecord::titled("wxyz").with_field("id", 2);
        let blogs = BlogCollection::new(vec![BlogRecord::titled("ab"), first.clone(), second]);

        assert_eq!(analyze(&blogs).blog_with_longest_title, Some(first));
    }

    #[test]
    fn title_length_counts_utf16_units_not_bytes() {
        // 4 units but 8 bytes, against 5 ASCII characters.
        let blogs = collection(&["ññññ", "abcde"]);
        assert_eq!(analyze(&blogs).blog_with_longest_title.unwrap().title(), "abcde");
    }

    #[test]
    fn astral_characters_count_twice() {
        // Two emoji are four UTF-16 units, longer than three ASCII letters.
        let blogs = collection(&["abc", "😀😀"]);
        assert_eq!(analyze(&blogs).blog_with_longest_title.unwrap().title(), "😀😀");

        let blogs = collection(&["😀😀", "abcd"]);
        assert_eq!(analyze(&blogs).blog_with_longest_title.unwrap().title(), "😀😀");
    }

    #[test]
    fn privacy_match_ignores_case_and_position() {
        let blogs = collection(&["PRIVACY", "data-privacy-101", "Privately", "priv acy"]);
        assert_eq!(analyze(&blogs).number_of_blogs_with_privacy, 2);
    }

    #[test]
    fn unique_titles_are_case_sensitive() {
        let blogs = collection(&["Rust", "rust", "Rust", "Go", "rust"]);
        assert_eq!(analyze(&blogs).unique_blog_titles, ["Rust", "rust", "Go"]);
    }

    #[test]
    fn empty_collection() {
        let result = analyze(&collection(&[]));
        assert_eq!(result.total_blogs, 0);
        assert_eq!(result.blog_with_longest_title, None);
        assert_eq!(result.number_of_blogs_with_privacy, 0);
        assert!(result.unique_blog_titles.is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("blogWithLongestTitle").is_none());
        assert_eq!(json["totalBlogs"], 0);
    }

    #[test]
    fn total_matches_length_and_unique_titles_have_no_duplicates() {
        let cases: &[&[&str]] = &[
            &[],
            &["a"],
            &["a", "a", "a"],
            &["b", "a", "b", "c", "a"],
            &["x", "Privacy", "privacy", "PRIVACY"],
        ];
        for titles in cases {
            let result = analyze(&collection(titles));
            assert_eq!(result.total_blogs, titles.len());

            let distinct: HashSet<_> = result.unique_blog_titles.iter().collect();
            assert_eq!(distinct.len(), result.unique_blog_titles.len(), "{titles:?}");

            let mut first_seen = Vec::new();
            for t in titles.iter() {
                if !first_seen.contains(t) {
                    first_seen.push(*t);
                }
            }
            assert_eq!(result.unique_blog_titles, first_seen, "{titles:?}");
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(analyze(&collection(&["A"]))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalBlogs": 1,
                "blogWithLongestTitle": { "title": "A" },
                "numberOfBlogsWithPrivacy": 0,
                "uniqueBlogTitles": ["A"],
            })
        );
    }

    #[test]
    fn same_collection_is_computed_once() {
        let deriver = AnalyticsDeriver::new();
        let blogs = collection(&["a", "b"]);

        let first = deriver.derive(&blogs);
        let second = deriver.derive(&blogs);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(deriver.computations(), 1);
    }

    #[test]
    fn equal_but_distinct_collections_are_recomputed() {
        let deriver = AnalyticsDeriver::new();
        let first = deriver.derive(&collection(&["a", "b"]));
        let second = deriver.derive(&collection(&["a", "b"]));
        assert_eq!(first, second);
        assert_eq!(deriver.computations(), 2);
    }
}
