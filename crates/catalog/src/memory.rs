//! In-memory catalog store.
//!
//! Mirrors the remote client's lookup semantics over a plain `Vec`, for
//! unit tests and offline runs.

use async_trait::async_trait;

use shop_agent_core::{CatalogRecord, PhoneStore, StoreError};

/// A `PhoneStore` backed by a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct StaticStore {
    records: Vec<CatalogRecord>,
}

impl StaticStore {
    /// Records without an id are dropped, matching the remote boundary.
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records: records.into_iter().filter(|r| r.has_id()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PhoneStore for StaticStore {
    async fn fetch_all(&self) -> Result<Vec<CatalogRecord>, StoreError> {
        Ok(self.records.clone())
    }

    async fn fetch_filtered(
        &self,
        brand: Option<&str>,
        name_contains: Option<&str>,
    ) -> Result<Vec<CatalogRecord>, StoreError> {
        let needle = name_contains.map(str::to_lowercase);
        Ok(self
            .records
            .iter()
            .filter(|r| {
                let brand_ok = brand.map_or(true, |b| r.brand_name.eq_ignore_ascii_case(b));
                let name_ok = needle
                    .as_deref()
                    .map_or(true, |n| r.phone_name.to_lowercase().contains(n));
                brand_ok && name_ok
            })
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<CatalogRecord>, StoreError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    async fn fetch_by_name_contains(
        &self,
        text: &str,
    ) -> Result<Option<CatalogRecord>, StoreError> {
        let needle = text.to_lowercase();
        Ok(self
            .records
            .iter()
            .find(|r| r.phone_name.to_lowercase().contains(&needle))
            .cloned())
    }
}
