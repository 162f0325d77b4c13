//! Store trait for catalog access.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::CatalogRecord;

/// Read-only access to the phone catalog.
///
/// Implemented by the remote REST client and by the in-memory store used
/// in tests and offline runs. All methods are side-effect free and safe to
/// retry. There are no partial results: each call either returns the full
/// row set for its filters or fails.
#[async_trait]
pub trait PhoneStore: Send + Sync {
    /// Fetch every row in the catalog.
    async fn fetch_all(&self) -> Result<Vec<CatalogRecord>, StoreError>;

    /// Fetch rows matching an optional brand (case-insensitive equality)
    /// and an optional name fragment (case-insensitive contains).
    async fn fetch_filtered(
        &self,
        brand: Option<&str>,
        name_contains: Option<&str>,
    ) -> Result<Vec<CatalogRecord>, StoreError>;

    /// Look up a single row by exact id.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<CatalogRecord>, StoreError>;

    /// First row whose name contains the fragment, case-insensitively.
    async fn fetch_by_name_contains(
        &self,
        text: &str,
    ) -> Result<Option<CatalogRecord>, StoreError>;
}
