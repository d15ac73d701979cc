use anyhow::Result;
use opal_fetcher::{FetchEvent, FetchProvider, Record, run_cycle};

/// Run one fetch cycle and print the records to stdout as a JSON array.
pub async fn run<P>(provider: &P, event: &FetchEvent, pretty: bool) -> Result<()>
where
    P: FetchProvider + ?Sized,
{
    let records = run_cycle(provider, event).await?;
    println!("{}", render(&records, pretty)?);
    Ok(())
}

pub fn render(records: &[Record], pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(output)
}
