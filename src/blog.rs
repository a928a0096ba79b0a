//! Blog records as served by the upstream API.

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// One blog entry.
///
/// Only `title` is inspected. The whole upstream object is kept as-is,
/// nulls and key order included, and is what gets serialized back out.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct BlogRecord {
    title: String,
    fields: Map<String, Value>,
}

impl BlogRecord {
    /// A record with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        let title = title.into();
        let mut fields = Map::new();
        fields.insert("title".to_owned(), Value::String(title.clone()));
        Self { title, fields }
    }

    /// Adds or replaces an upstream field other than `title`.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "title" {
            self.fields.insert(key, value.into());
        }
        self
    }

    pub fn title(&self) -> &str { &self.title }

    /// Any upstream field, `title` included.
    pub fn get(&self, key: &str) -> Option<&Value> { self.fields.get(key) }
}

impl TryFrom<Map<String, Value>> for BlogRecord {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get("title") {
            Some(Value::String(title)) => Ok(Self { title: title.clone(), fields }),
            Some(other) => Err(format!("blog `title` must be a string, got {other}")),
            None => Err("blog record is missing `title`".to_owned()),
        }
    }
}

impl Serialize for BlogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Identity of one fetched collection.
///
/// Assigned from a process-wide counter when the collection is created, so
/// two collections never share an id even when their contents are equal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CollectionId(u64);

impl CollectionId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The records returned by one upstream fetch, in upstream order.
///
/// Not `Clone`: a copy would share the identity of the original.
#[derive(Debug)]
pub struct BlogCollection {
    id: CollectionId,
    records: Vec<BlogRecord>,
}

impl BlogCollection {
    pub fn new(records: Vec<BlogRecord>) -> Self {
        Self { id: CollectionId::next(), records }
    }

    pub fn id(&self) -> CollectionId { self.id }
    pub fn records(&self) -> &[BlogRecord] { &self.records }
}

impl Deref for BlogCollection {
    type Target = [BlogRecord];

    fn deref(&self) -> &[BlogRecord] { &self.records }
}

impl FromIterator<BlogRecord> for BlogCollection {
    fn from_iter<I: IntoIterator<Item = BlogRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Body of the upstream listing endpoint: `{ "blogs": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct BlogListing {
    pub(crate) blogs: Vec<BlogRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_contents_get_distinct_ids() {
        let a: BlogCollection = [BlogRecord::titled("x")].into_iter().collect();
        let b: BlogCollection = [BlogRecord::titled("x")].into_iter().collect();
        assert_eq!(a.records(), b.records());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = r#"{"id":"7f3a","title":"Hello","image_url":"https://img","views":3}"#;
        let record: BlogRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.title(), "Hello");
        assert_eq!(record.get("id"), Some(&Value::from("7f3a")));
        assert_eq!(record.get("views"), Some(&Value::from(3)));

        let back: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(raw).unwrap());
    }

    #[test]
    fn records_are_echoed_verbatim() {
        let raw = r#"{"zeta":1,"title":"Hello","id":null,"alpha":[true]}"#;
        let record: BlogRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.get("id"), Some(&Value::Null));
        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
    }

    #[test]
    fn non_string_titles_are_rejected() {
        let err = serde_json::from_str::<BlogRecord>(r#"{"title":7}"#).unwrap_err();
        assert!(err.to_string().contains("title"), "{err}");
    }

    #[test]
    fn with_field_cannot_overwrite_the_title() {
        let record = BlogRecord::titled("Hello").with_field("title", "Other").with_field("id", 9);
        assert_eq!(record.title(), "Hello");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({ "title": "Hello", "id": 9 })
        );
    }

    #[test]
    fn records_without_a_title_are_rejected() {
        let err = serde_json::from_str::<BlogListing>(r#"{"blogs":[{"id":1}]}"#).unwrap_err();
        assert!(err.to_string().contains("title"), "{err}");
    }

    #[test]
    fn listings_without_blogs_are_rejected() {
        assert!(serde_json::from_str::<BlogListing>(r#"{"posts":[]}"#).is_err());
    }
}
