use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Field map of a document.
pub type Fields = serde_json::Map<String, Value>;

/// A JSON document in a `(database, collection)` namespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub database_id: String,
    pub collection_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: Fields,
}

impl Document {
    /// String value of a field, if present and a string.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }
}

/// One page of a listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    /// Number of documents matching the filters, before `Limit`/`Offset`.
    pub total: usize,
    pub documents: Vec<Document>,
}

/// Listing predicate or window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Keep documents whose `attribute` equals `value`.
    Equal { attribute: String, value: Value },
    /// Return at most `n` documents.
    Limit(usize),
    /// Skip the first `n` matching documents.
    Offset(usize),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equal {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Whether `doc` passes this query. Window queries pass everything.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Equal { attribute, value } => doc.data.get(attribute) == Some(value),
            Self::Limit(_) | Self::Offset(_) => true,
        }
    }
}

/// Apply filters, then the offset/limit window, to documents in store order.
///
/// At most one `Limit` and one `Offset` may appear.
pub fn apply_queries<I>(queries: &[Query], documents: I) -> StoreResult<DocumentList>
where
    I: IntoIterator<Item = Document>,
{
    let mut limit = None;
    let mut offset = None;
    for query in queries {
        match query {
            Query::Limit(n) => {
                if limit.replace(*n).is_some() {
                    return Err(StoreError::InvalidQuery("more than one limit".into()));
                }
            }
            Query::Offset(n) => {
                if offset.replace(*n).is_some() {
                    return Err(StoreError::InvalidQuery("more than one offset".into()));
                }
            }
            Query::Equal { .. } => {}
        }
    }

    let matching: Vec<Document> = documents
        .into_iter()
        .filter(|doc| queries.iter().all(|q| q.matches(doc)))
        .collect();
    let total = matching.len();
    let documents = matching
        .into_iter()
        .skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    Ok(DocumentList { total, documents })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, category: &str) -> Document {
        let now = Utc::now();
        let mut data = Fields::new();
        data.insert("category".into(), json!(category));
        Document {
            id: id.into(),
            database_id: "db".into(),
            collection_id: "posts".into(),
            created_at: now,
            updated_at: now,
            data,
        }
    }

    fn ids(list: &DocumentList) -> Vec<&str> {
        list.documents.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn equal_filters() {
        let docs = vec![doc("a", "tabla"), doc("b", "string"), doc("c", "tabla")];
        let list = apply_queries(&[Query::equal("category", "tabla")], docs).unwrap();
        assert_eq!(ids(&list), ["a", "c"]);
        assert_eq!(list.total, 2);
    }

    #[test]
    fn equal_on_missing_field_matches_nothing() {
        let docs = vec![doc("a", "tabla")];
        let list = apply_queries(&[Query::equal("maker", "x")], docs).unwrap();
        assert!(list.documents.is_empty());
    }

    #[test]
    fn window_applies_after_filter() {
        let docs: Vec<_> = (0..10).map(|i| doc(&format!("d{i}"), "tabla")).collect();
        let list = apply_queries(&[Query::Offset(3), Query::Limit(4)], docs).unwrap();
        assert_eq!(ids(&list), ["d3", "d4", "d5", "d6"]);
        assert_eq!(list.total, 10);
    }

    #[test]
    fn offset_past_end_is_empty() {
        let docs = vec![doc("a", "tabla")];
        let list = apply_queries(&[Query::Offset(5)], docs).unwrap();
        assert!(list.documents.is_empty());
        assert_eq!(list.total, 1);
    }

    #[test]
    fn duplicate_limit_rejected() {
        let err = apply_queries(&[Query::Limit(1), Query::Limit(2)], Vec::new()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuery(_)));
    }

    #[test]
    fn str_field() {
        let d = doc("a", "tabla");
        assert_eq!(d.str_field("category"), Some("tabla"));
        assert_eq!(d.str_field("missing"), None);
    }
}
