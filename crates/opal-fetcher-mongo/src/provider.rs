use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use opal_fetcher::{FetchError, FetchEvent, FetchProvider, FetchResult};

use crate::config::MongoProviderOptions;
use crate::convert;
use crate::request::MongoFetchRequest;

/// Value of `FetchEvent::fetcher` that addresses this provider.
pub const FETCHER_KIND: &str = "MongoFetchProvider";

const APP_NAME: &str = "opal-fetcher-mongo";

/// A live client bound to the request's collection. Owned by one fetch cycle.
pub struct MongoConnection {
    client: Client,
    collection: Collection<Document>,
}

/// Fetches documents from a MongoDB collection.
///
/// Each cycle opens its own client and shuts it down afterwards; nothing is
/// pooled or shared between cycles.
#[derive(Debug, Clone, Default)]
pub struct MongoFetchProvider {
    options: MongoProviderOptions,
}

impl MongoFetchProvider {
    pub fn new(options: MongoProviderOptions) -> Self {
        Self { options }
    }

    async fn connect(&self, request: &MongoFetchRequest) -> Result<MongoConnection, FetchError> {
        let settings = &request.config.db_setting;
        let timeout = request.connect_timeout;

        let uri = request.connection_uri().build();
        let mut options = ClientOptions::parse(uri.as_str())
            .await
            .map_err(|e| FetchError::Connection(format!("invalid connection string: {e}")))?;
        options.app_name = Some(APP_NAME.to_owned());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| FetchError::Connection(format!("failed to create client: {e}")))?;

        // The driver connects lazily; ping so unreachable hosts and rejected
        // credentials fail here rather than at query time.
        let database = client.database(&settings.db);
        let ping = tokio::time::timeout(timeout, async {
            database.run_command(doc! { "ping": 1 }).await
        })
        .await;

        let failure = match ping {
            Ok(Ok(_)) => None,
            Ok(Err(e)) => Some(FetchError::Connection(e.to_string())),
            Err(_) => Some(FetchError::Connection(format!(
                "no response within {}s",
                timeout.as_secs()
            ))),
        };
        if let Some(e) = failure {
            client.shutdown().await;
            return Err(e);
        }

        let collection = database.collection::<Document>(&settings.table);
        Ok(MongoConnection { client, collection })
    }
}

#[async_trait::async_trait]
impl FetchProvider for MongoFetchProvider {
    type Request = MongoFetchRequest;
    type Handle = MongoConnection;

    fn kind(&self) -> &str {
        FETCHER_KIND
    }

    fn parse_request(&self, event: &FetchEvent) -> Result<MongoFetchRequest, FetchError> {
        event.expect_fetcher(FETCHER_KIND)?;
        MongoFetchRequest::from_event(event, &self.options)
    }

    async fn open(&self, request: &MongoFetchRequest) -> Result<MongoConnection, FetchError> {
        match self.connect(request).await {
            Ok(connection) => {
                tracing::debug!(
                    uri = %request.connection_uri().redacted(),
                    "connected"
                );
                Ok(connection)
            }
            Err(e) => {
                tracing::error!(
                    uri = %request.connection_uri().redacted(),
                    error = %e,
                    "connection failed"
                );
                Err(e)
            }
        }
    }

    async fn fetch(
        &self,
        handle: &MongoConnection,
        request: &MongoFetchRequest,
    ) -> Result<FetchResult, FetchError> {
        let timeout = request.query_timeout;

        let mut find = handle
            .collection
            .find(request.filter.clone())
            .max_time(timeout);
        if let Some(projection) = &request.projection {
            find = find.projection(projection.clone());
        }

        let query = async {
            let cursor = find.await?;
            cursor.try_collect::<Vec<Document>>().await
        };

        let documents = tokio::time::timeout(timeout, query)
            .await
            .map_err(|_| {
                FetchError::Query(format!(
                    "query on {} did not finish within {}s",
                    request.namespace(),
                    timeout.as_secs()
                ))
            })?
            .map_err(|e| FetchError::Query(e.to_string()))?;

        tracing::debug!(
            namespace = %request.namespace(),
            documents = documents.len(),
            "query complete"
        );

        Ok(documents.into_iter().map(convert::document_to_record).collect())
    }

    async fn close(&self, handle: MongoConnection) {
        let MongoConnection { client, collection } = handle;
        drop(collection);
        client.shutdown().await;
        tracing::debug!("connection closed");
    }
}
