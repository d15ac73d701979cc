use bson::Document;
use mongodb::Client;
use opal_fetcher::{FetchEvent, FetchProvider};
use opal_fetcher_mongo::{FETCHER_KIND, MongoFetchProvider};
use serde_json::json;

pub const DB: &str = "policy";

/// Connection details for a live MongoDB, read from the environment.
///
/// `OPAL_MONGO_TEST_URL` (default `localhost:27017`), `OPAL_MONGO_TEST_USER`
/// (default `root`), `OPAL_MONGO_TEST_PASSWORD` (default `example`).
pub struct LiveMongo {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl LiveMongo {
    pub fn from_env() -> Self {
        Self {
            url: env_or("OPAL_MONGO_TEST_URL", "localhost:27017"),
            username: env_or("OPAL_MONGO_TEST_USER", "root"),
            password: env_or("OPAL_MONGO_TEST_PASSWORD", "example"),
        }
    }

    pub fn event(
        &self,
        table: &str,
        query: serde_json::Value,
        fields: serde_json::Value,
    ) -> FetchEvent {
        FetchEvent::new(FETCHER_KIND, &self.url).with_config(json!({
            "db_setting": {
                "auth_db": "admin",
                "username": self.username,
                "password": self.password,
                "replica_set_name": "",
                "db": DB,
                "table": table
            },
            "query": query,
            "fields": fields,
            "connect_timeout_secs": 5,
            "query_timeout_secs": 5
        }))
    }

    /// Replace the contents of `policy.<table>` with `documents`.
    pub async fn seed(&self, table: &str, documents: Vec<Document>) {
        let provider = MongoFetchProvider::default();
        let request = provider
            .parse_request(&self.event(table, json!({}), json!([])))
            .unwrap();

        let client = Client::with_uri_str(request.connection_uri().build())
            .await
            .unwrap();
        let collection = client.database(DB).collection::<Document>(table);
        collection.drop().await.unwrap();
        if !documents.is_empty() {
            collection.insert_many(documents).await.unwrap();
        }
        client.shutdown().await;
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
