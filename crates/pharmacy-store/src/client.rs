//! # Sheet Store
//!
//! [`RemoteStore`] over the spreadsheet REST API.
//!
//! ## Requests
//! ```text
//! list_rows   GET    <endpoint>            200 → { data: [...] } | [...]
//! create      POST   <endpoint>            body { data: {...} }
//! delete      DELETE <endpoint>/id/<id>
//! ```
//!
//! The endpoint's query string (SheetDB's `?sheet=` selector) is kept on
//! every request, including the delete URL.
//!
//! Any non-2xx status becomes [`StoreError::Status`]. Nothing is retried.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use pharmacy_core::Product;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::repository::RemoteStore;
use crate::wire::{CreateRequest, ListResponse, ProductRecord, RawProductRow};

/// HTTP-backed product store.
#[derive(Debug, Clone)]
pub struct SheetStore {
    client: Client,
    endpoint: Url,
}

impl SheetStore {
    /// Builds a store client from validated configuration.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;

        let mut builder = Client::builder()
            .user_agent(concat!("pharmacy-store/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::ClientBuild(e.to_string()))?;

        Ok(SheetStore { client, endpoint })
    }

    /// `<endpoint path>/id/<id>`, keeping the endpoint's query.
    fn row_url(&self, id: i64) -> StoreResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidUrl(format!("{} cannot take a path", self.endpoint)))?
            .pop_if_empty()
            .extend(["id", &id.to_string()]);
        Ok(url)
    }

    /// Passes 2xx responses through; turns anything else into `Status`.
    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::status(status.as_u16(), &body))
    }
}

#[async_trait]
impl RemoteStore for SheetStore {
    async fn list_rows(&self) -> StoreResult<Vec<RawProductRow>> {
        let start = Instant::now();
        debug!(endpoint = %self.endpoint, "Fetching product rows");

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        let rows = serde_json::from_str::<ListResponse>(&body)?.into_rows();

        debug!(
            rows = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched product rows"
        );
        Ok(rows)
    }

    async fn create(&self, product: &Product) -> StoreResult<()> {
        let start = Instant::now();
        let record = ProductRecord::from(product);
        debug!(id = record.id, name = %record.name, "Creating product row");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&CreateRequest { data: &record })
            .send()
            .await?;
        Self::check(response).await?;

        debug!(
            id = record.id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Product row created"
        );
        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let start = Instant::now();
        let url = self.row_url(id)?;
        debug!(id, url = %url, "Deleting product row");

        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;

        debug!(
            id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Product row deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let err = SheetStore::new(&StoreConfig::with_endpoint("file:///tmp/sheet")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));
    }

    fn row_url(endpoint: &str, id: i64) -> String {
        SheetStore::new(&StoreConfig::with_endpoint(endpoint))
            .unwrap()
            .row_url(id)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_row_url() {
        assert_eq!(
            row_url("https://sheetdb.io/api/v1/abc", 42),
            "https://sheetdb.io/api/v1/abc/id/42"
        );
        assert_eq!(
            row_url("https://sheetdb.io/api/v1/abc/", 42),
            "https://sheetdb.io/api/v1/abc/id/42"
        );
    }

    #[test]
    fn test_row_url_keeps_sheet_query() {
        assert_eq!(
            row_url("https://sheetdb.io/api/v1/abc?sheet=Stock", 42),
            "https://sheetdb.io/api/v1/abc/id/42?sheet=Stock"
        );
    }
}
