pub mod config;
pub mod convert;
pub mod provider;
pub mod request;
pub mod uri;

pub use config::{ConnectionSettings, MongoFetcherConfig, MongoProviderOptions};
pub use provider::{FETCHER_KIND, MongoConnection, MongoFetchProvider};
pub use request::{HostList, MongoFetchRequest, Scheme};
pub use uri::ConnectionUri;
