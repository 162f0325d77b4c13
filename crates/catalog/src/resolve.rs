//! Identifier resolution: exact id first, then name fragment.

use shop_agent_core::{CatalogRecord, PhoneStore, StoreError};

/// Resolve a user-supplied identifier to a single record.
///
/// Exact id match first; failing that, the first record whose name
/// contains the identifier case-insensitively. `Ok(None)` means no match,
/// an ordinary outcome distinct from a store failure.
pub async fn resolve(
    store: &dyn PhoneStore,
    identifier: &str,
) -> Result<Option<CatalogRecord>, StoreError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Ok(None);
    }

    if let Some(record) = store.fetch_by_id(identifier).await? {
        return Ok(Some(record));
    }

    store.fetch_by_name_contains(identifier).await
}
