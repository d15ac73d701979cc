use anyhow::Result;
use opal_fetcher::{FetchEvent, FetchProvider};
use opal_fetcher_mongo::{MongoFetchProvider, MongoFetchRequest};

/// Validate an event and print what a fetch would do, without connecting.
pub fn run(provider: &MongoFetchProvider, event: &FetchEvent) -> Result<()> {
    let request = provider.parse_request(event)?;
    print!("{}", describe(&request));
    Ok(())
}

pub fn describe(request: &MongoFetchRequest) -> String {
    let projection = request
        .projection
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "(all fields)".to_owned());

    let mut out = String::new();
    out.push_str(&format!("URI:         {}\n", request.connection_uri().redacted()));
    out.push_str(&format!("Namespace:   {}\n", request.namespace()));
    out.push_str(&format!("Filter:      {}\n", request.filter));
    out.push_str(&format!("Projection:  {projection}\n"));
    out.push_str(&format!(
        "Timeouts:    connect {}s, query {}s\n",
        request.connect_timeout.as_secs(),
        request.query_timeout.as_secs()
    ));
    out
}
