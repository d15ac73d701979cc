use std::fmt;

use serde::{Deserialize, Serialize};

/// Default authentication mechanism placed in the connection URI.
pub const DEFAULT_AUTH_MECHANISM: &str = "SCRAM-SHA-1";

/// Default bound on client construction, server selection and the ping on open.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default bound on running the query and draining its cursor.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Credentials and target namespace, carried in the event's `db_setting` block.
///
/// Every key is required. An empty `replica_set_name` means the target is
/// not a replica set.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionSettings {
    pub auth_db: String,
    pub username: String,
    pub password: String,
    pub replica_set_name: String,
    pub db: String,
    pub table: String,
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("auth_db", &self.auth_db)
            .field("username", &self.username)
            .field("password", &"****")
            .field("replica_set_name", &self.replica_set_name)
            .field("db", &self.db)
            .field("table", &self.table)
            .finish()
    }
}

/// The `config` block of a Mongo fetch event.
///
/// ```json
/// {
///   "db_setting": {
///     "auth_db": "admin",
///     "username": "opal",
///     "password": "secret",
///     "replica_set_name": "",
///     "db": "policy",
///     "table": "users"
///   },
///   "query": {"role": "admin"},
///   "fields": ["name"],
///   "query_timeout_secs": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MongoFetcherConfig {
    pub db_setting: ConnectionSettings,

    /// Filter document, as MongoDB Extended JSON. Empty matches everything.
    #[serde(default)]
    pub query: serde_json::Map<String, serde_json::Value>,

    /// Fields to include. Empty returns whole documents.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Overrides the provider's authentication mechanism.
    #[serde(default)]
    pub auth_mechanism: Option<String>,

    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    #[serde(default)]
    pub query_timeout_secs: Option<u64>,
}

/// Provider-wide defaults, applied when an event doesn't override them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MongoProviderOptions {
    pub auth_mechanism: String,
    pub connect_timeout_secs: u64,
    pub query_timeout_secs: u64,
}

impl Default for MongoProviderOptions {
    fn default() -> Self {
        Self {
            auth_mechanism: DEFAULT_AUTH_MECHANISM.to_owned(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}
