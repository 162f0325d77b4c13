//! REST client for the remote phone catalog.
//!
//! The catalog is a single read-only table exposed PostgREST-style. Every
//! query either returns the full row set for its filters or fails; there
//! are no partial results. Transient failures are retried per
//! `RetryPolicy`; a payload that is not a row list counts as zero rows,
//! which is an ordinary outcome, not an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use shop_agent_core::{CatalogRecord, PhoneStore, StoreError};

use crate::retry::RetryPolicy;

/// Connection settings for the catalog store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Base URL of the REST endpoint (no trailing slash needed).
    pub base_url: String,
    /// API key, sent as both `apikey` header and bearer token.
    pub api_key: String,
    /// Table holding the phone rows.
    pub table: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            table: "phones".to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Read-only client for the remote catalog table.
///
/// Holds a single long-lived HTTP client that is safe to reuse across
/// sequential calls; the client itself carries no mutable state.
#[derive(Clone)]
pub struct StoreClient {
    http: Client,
    options: StoreOptions,
}

impl StoreClient {
    pub fn new(options: StoreOptions) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, options })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.options.base_url.trim_end_matches('/'),
            self.options.table
        )
    }

    /// Single query attempt; the retry loop wraps this.
    async fn execute(&self, query: &[(&str, String)]) -> Result<Vec<CatalogRecord>, StoreError> {
        let response = self
            .http
            .get(self.table_url())
            .header("apikey", &self.options.api_key)
            .bearer_auth(&self.options.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(rows_from_payload(payload))
    }

    async fn query(&self, query: Vec<(&str, String)>) -> Result<Vec<CatalogRecord>, StoreError> {
        self.options.retry.run(|_attempt| self.execute(&query)).await
    }

    fn map_send_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::Timeout(self.options.timeout)
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

/// Normalize a store payload into rows.
///
/// A payload that is not a JSON array counts as zero results. Rows that
/// fail to deserialize or carry no id are dropped rather than failing the
/// batch: they are unusable for lookups and references.
fn rows_from_payload(payload: Value) -> Vec<CatalogRecord> {
    let Value::Array(items) = payload else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<CatalogRecord>(item) {
            Ok(record) if record.has_id() => Some(record),
            Ok(record) => {
                tracing::debug!(name = %record.phone_name, "dropping catalog row without id");
                None
            }
            Err(err) => {
                tracing::debug!(error = %err, "dropping malformed catalog row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl PhoneStore for StoreClient {
    async fn fetch_all(&self) -> Result<Vec<CatalogRecord>, StoreError> {
        self.query(vec![("select", "*".to_string())]).await
    }

    async fn fetch_filtered(
        &self,
        brand: Option<&str>,
        name_contains: Option<&str>,
    ) -> Result<Vec<CatalogRecord>, StoreError> {
        let mut query = vec![("select", "*".to_string())];
        if let Some(brand) = brand {
            // ilike without wildcards: case-insensitive equality
            query.push(("brand_name", format!("ilike.{brand}")));
        }
        if let Some(fragment) = name_contains {
            query.push(("phone_name", format!("ilike.*{fragment}*")));
        }
        self.query(query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<CatalogRecord>, StoreError> {
        let rows = self
            .query(vec![
                ("select", "*".to_string()),
                ("id", format!("eq.{id}")),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn fetch_by_name_contains(
        &self,
        text: &str,
    ) -> Result<Option<CatalogRecord>, StoreError> {
        let rows = self
            .query(vec![
                ("select", "*".to_string()),
                ("phone_name", format!("ilike.*{text}*")),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(rows.into_iter().next())
    }
}
