//! Conversions between event JSON and BSON.

use bson::{Bson, Document};
use opal_fetcher::{FetchError, Record};

/// Decode a JSON filter as MongoDB Extended JSON, so values like
/// `{"$oid": "..."}` or `{"$date": "..."}` reach the server typed.
pub fn filter_document(query: &Record) -> Result<Document, FetchError> {
    let value = serde_json::Value::Object(query.clone());

    match Bson::try_from(value) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(FetchError::Configuration(format!(
            "query must be a document, but it decodes to {:?}",
            other.element_type()
        ))),
        Err(e) => Err(FetchError::Configuration(format!("invalid query: {e}"))),
    }
}

/// Inclusion projection for the requested fields, or `None` to return
/// whole documents.
///
/// `_id` is excluded unless it is one of the requested fields.
pub fn projection_document(fields: &[String]) -> Option<Document> {
    if fields.is_empty() {
        return None;
    }

    let mut projection = Document::new();
    for field in fields {
        projection.insert(field.as_str(), 1);
    }
    if !projection.contains_key("_id") {
        projection.insert("_id", 0);
    }

    Some(projection)
}

/// Render a fetched document as relaxed Extended JSON.
pub fn document_to_record(document: Document) -> Record {
    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(map) => map,
        // a document always renders as an object
        other => Record::from_iter([("value".to_owned(), other)]),
    }
}
