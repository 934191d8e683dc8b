//! # Store Configuration
//!
//! Where the spreadsheet API lives and how long to wait for it.
//!
//! ```toml
//! [store]
//! endpoint = "https://sheetdb.io/api/v1/fltl2wbu69rkj"
//! # timeout_secs = 10
//! ```
//!
//! The section is embedded in the desk's configuration file; loading and
//! saving that file happens there.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{StoreError, StoreResult};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://sheetdb.io/api/v1/fltl2wbu69rkj";

/// Environment variable overriding the endpoint.
pub const ENV_STORE_URL: &str = "PHARMACY_STORE_URL";

/// Environment variable overriding the request timeout.
pub const ENV_STORE_TIMEOUT: &str = "PHARMACY_STORE_TIMEOUT_SECS";

/// Remote store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the spreadsheet API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

impl StoreConfig {
    /// Creates a config for `endpoint` with no timeout.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        StoreConfig {
            endpoint: endpoint.into(),
            timeout_secs: None,
        }
    }

    /// Parses the endpoint into a URL.
    pub fn endpoint_url(&self) -> StoreResult<Url> {
        Ok(Url::parse(self.endpoint.trim())?)
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - Endpoint is an absolute `http` or `https` URL with a host
    /// - Timeout, if set, is at least one second
    pub fn validate(&self) -> StoreResult<()> {
        let url = self.endpoint_url()?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(StoreError::InvalidUrl(format!(
                "Store URL must start with http:// or https://, got: {}",
                self.endpoint
            )));
        }

        if url.host_str().is_none() {
            return Err(StoreError::InvalidUrl(format!(
                "Store URL has no host: {}",
                self.endpoint
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(StoreError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `PHARMACY_STORE_URL` and `PHARMACY_STORE_TIMEOUT_SECS` as
    /// resolved by `var`.
    ///
    /// The desk passes `std::env::var`; tests pass a map.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_STORE_URL) {
            debug!(url = %url, "Overriding store URL from environment");
            self.endpoint = url;
        }

        if let Some(secs) = var(ENV_STORE_TIMEOUT) {
            match secs.trim().parse::<u64>() {
                Ok(s) => self.timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring unparseable store timeout"),
            }
        }
    }
}
