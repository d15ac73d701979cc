use urlencoding::encode;

use crate::config::ConnectionSettings;
use crate::request::{HostList, Scheme};

const REDACTED: &str = "****";

/// Builds a MongoDB connection string from event settings.
///
/// Every user-supplied component is percent-encoded, so credentials may
/// contain `@`, `:`, `/`, `?` and the like.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionUri<'a> {
    pub hosts: &'a HostList,
    pub settings: &'a ConnectionSettings,
    pub auth_mechanism: &'a str,
}

impl ConnectionUri<'_> {
    /// The full connection string, including the password.
    pub fn build(&self) -> String {
        self.render(&encode(&self.settings.password))
    }

    /// The connection string with the password masked, for logs and diagnostics.
    pub fn redacted(&self) -> String {
        self.render(REDACTED)
    }

    fn render(&self, password: &str) -> String {
        let scheme = match self.hosts.scheme {
            Scheme::Standard => "mongodb",
            Scheme::Srv => "mongodb+srv",
        };

        let mut uri = format!(
            "{scheme}://{}:{password}@{}/{}?authSource={}&authMechanism={}",
            encode(&self.settings.username),
            self.hosts.hosts,
            encode(&self.settings.db),
            encode(&self.settings.auth_db),
            encode(self.auth_mechanism),
        );

        if !self.settings.replica_set_name.is_empty() {
            uri.push_str("&replicaSet=");
            uri.push_str(&encode(&self.settings.replica_set_name));
        }

        for option in &self.hosts.options {
            uri.push('&');
            uri.push_str(option);
        }

        uri
    }
}
