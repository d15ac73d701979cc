use std::sync::Arc;

use crate::event::FetchEvent;
use crate::record::FetchResult;

/// Errors that can occur during a fetch cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The event or its config block is missing or malformed. Raised before any I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// A data source the host can pull records from.
///
/// A fetch cycle is `parse_request` → `open` → `fetch` → `process` → `close`.
/// Providers keep no per-cycle state of their own: the handle returned by
/// `open` belongs to the caller, so a single provider can serve concurrent
/// cycles.
#[async_trait::async_trait]
pub trait FetchProvider: Send + Sync {
    /// Validated, immutable form of an event's config.
    type Request: Send + Sync;

    /// Live connection owned by exactly one cycle.
    type Handle: Send + Sync;

    /// Identifier that events use to address this provider.
    fn kind(&self) -> &str;

    /// Validate the event and extract a request. Performs no I/O.
    fn parse_request(&self, event: &FetchEvent) -> Result<Self::Request, FetchError>;

    /// Open a connection for the request.
    async fn open(&self, request: &Self::Request) -> Result<Self::Handle, FetchError>;

    /// Run the request's query over an open connection.
    async fn fetch(
        &self,
        handle: &Self::Handle,
        request: &Self::Request,
    ) -> Result<FetchResult, FetchError>;

    /// Post-fetch shaping. Passes records through unchanged by default.
    async fn process(&self, result: FetchResult) -> Result<FetchResult, FetchError> {
        Ok(result)
    }

    /// Release the connection. Best effort; never fails.
    async fn close(&self, handle: Self::Handle);
}

#[async_trait::async_trait]
impl<T: FetchProvider + ?Sized> FetchProvider for Arc<T> {
    type Request = T::Request;
    type Handle = T::Handle;

    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn parse_request(&self, event: &FetchEvent) -> Result<Self::Request, FetchError> {
        (**self).parse_request(event)
    }

    async fn open(&self, request: &Self::Request) -> Result<Self::Handle, FetchError> {
        (**self).open(request).await
    }

    async fn fetch(
        &self,
        handle: &Self::Handle,
        request: &Self::Request,
    ) -> Result<FetchResult, FetchError> {
        (**self).fetch(handle, request).await
    }

    async fn process(&self, result: FetchResult) -> Result<FetchResult, FetchError> {
        (**self).process(result).await
    }

    async fn close(&self, handle: Self::Handle) {
        (**self).close(handle).await
    }
}
