use serde::{Deserialize, Serialize};

use crate::provider::FetchError;

/// A fetch request as delivered by the host, before any provider has
/// validated it.
///
/// `config` is left untyped; each provider decides its own shape and
/// rejects events that don't carry it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FetchEvent {
    /// Kind of provider this event is addressed to.
    pub fetcher: String,
    /// Where the data lives. Providers interpret this (host list, URL, ...).
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

impl FetchEvent {
    pub fn new(fetcher: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            fetcher: fetcher.into(),
            url: url.into(),
            config: None,
        }
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Fail unless this event is addressed to the given provider kind.
    pub fn expect_fetcher(&self, kind: &str) -> Result<(), FetchError> {
        if self.fetcher == kind {
            Ok(())
        } else {
            Err(FetchError::Configuration(format!(
                "event is addressed to fetcher `{}`, not `{kind}`",
                self.fetcher
            )))
        }
    }

    /// The config block as a JSON object.
    pub fn config_object(&self) -> Result<&serde_json::Map<String, serde_json::Value>, FetchError> {
        match &self.config {
            Some(serde_json::Value::Object(map)) => Ok(map),
            Some(other) => Err(FetchError::Configuration(format!(
                "fetcher config must be an object, got {}",
                json_type_name(other)
            ))),
            None => Err(FetchError::Configuration(
                "event carries no fetcher config".into(),
            )),
        }
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
