use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{FetchError, FetchEvent, FetchProvider, FetchResult, Record};

/// Request understood by [`InMemoryProvider`]: a top-level equality filter
/// and an optional field list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRequest {
    pub query: Record,
    pub fields: Vec<String>,
}

/// Handle for one open in-memory cycle.
#[derive(Debug)]
pub struct InMemoryHandle {
    pub id: usize,
}

/// How an [`InMemoryProvider`] should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Failure {
    #[default]
    None,
    Open,
    Fetch,
    Process,
}

/// In-memory provider for testing. Serves a fixed set of records and
/// counts lifecycle calls so tests can assert on them.
pub struct InMemoryProvider {
    kind: String,
    records: Vec<Record>,
    failure: Failure,
    opened: AtomicUsize,
    fetched: AtomicUsize,
    closed: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            records: Vec::new(),
            failure: Failure::None,
            opened: AtomicUsize::new(0),
            fetched: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
        }
    }

    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = failure;
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> usize {
        self.fetched.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FetchProvider for InMemoryProvider {
    type Request = InMemoryRequest;
    type Handle = InMemoryHandle;

    fn kind(&self) -> &str {
        &self.kind
    }

    fn parse_request(&self, event: &FetchEvent) -> Result<InMemoryRequest, FetchError> {
        event.expect_fetcher(&self.kind)?;
        let config = event.config_object()?;

        let query = match config.get("query") {
            None => Record::new(),
            Some(serde_json::Value::Object(map)) => map.clone(),
            Some(_) => return Err(FetchError::Configuration("query must be an object".into())),
        };

        let fields = match config.get("fields") {
            None => Vec::new(),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| FetchError::Configuration(format!("invalid fields: {e}")))?,
        };

        Ok(InMemoryRequest { query, fields })
    }

    async fn open(&self, _request: &InMemoryRequest) -> Result<InMemoryHandle, FetchError> {
        if self.failure == Failure::Open {
            return Err(FetchError::Connection("in-memory source unreachable".into()));
        }
        let id = self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryHandle { id })
    }

    async fn fetch(
        &self,
        _handle: &InMemoryHandle,
        request: &InMemoryRequest,
    ) -> Result<FetchResult, FetchError> {
        self.fetched.fetch_add(1, Ordering::SeqCst);
        if self.failure == Failure::Fetch {
            return Err(FetchError::Query("in-memory query failed".into()));
        }

        Ok(self
            .records
            .iter()
            .filter(|record| matches(record, &request.query))
            .map(|record| project(record, &request.fields))
            .collect())
    }

    async fn process(&self, result: FetchResult) -> Result<FetchResult, FetchError> {
        if self.failure == Failure::Process {
            return Err(FetchError::Query("in-memory processing failed".into()));
        }
        Ok(result)
    }

    async fn close(&self, _handle: InMemoryHandle) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

fn matches(record: &Record, filter: &Record) -> bool {
    filter
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}

fn project(record: &Record, fields: &[String]) -> Record {
    if fields.is_empty() {
        return record.clone();
    }

    record
        .iter()
        .filter(|(key, _)| fields.iter().any(|f| f == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Build a [`Record`] from a `json!` object literal.
pub fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
