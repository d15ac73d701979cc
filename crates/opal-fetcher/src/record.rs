/// A single fetched document: field name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Records in the order the data source yielded them.
pub type FetchResult = Vec<Record>;
