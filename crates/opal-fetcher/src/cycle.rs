use crate::event::FetchEvent;
use crate::provider::{FetchError, FetchProvider};
use crate::record::FetchResult;

/// Run one fetch cycle for `event` against `provider`.
///
/// The handle from `open` is always passed to `close`, whether `fetch` and
/// `process` succeed or not. When `open` fails nothing else runs. Errors are
/// returned as-is so the host can decide whether to retry.
#[tracing::instrument(skip_all, fields(fetcher = %event.fetcher))]
pub async fn run_cycle<P>(provider: &P, event: &FetchEvent) -> Result<FetchResult, FetchError>
where
    P: FetchProvider + ?Sized,
{
    let request = provider.parse_request(event)?;
    tracing::debug!("fetch cycle started");
    let handle = provider.open(&request).await?;

    let outcome = match provider.fetch(&handle, &request).await {
        Ok(records) => provider.process(records).await,
        Err(e) => Err(e),
    };

    provider.close(handle).await;

    match &outcome {
        Ok(records) => tracing::debug!(records = records.len(), "fetch cycle complete"),
        Err(e) => tracing::error!(error = %e, "fetch cycle failed"),
    }

    outcome
}
