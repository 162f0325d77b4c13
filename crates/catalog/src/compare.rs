//! Side-by-side comparison of two or three catalog records.

use thiserror::Error;

use shop_agent_core::{CatalogRecord, PhoneStore, StoreError};

use crate::resolve::resolve;

/// Comparison failure modes.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A mandatory identifier did not resolve.
    #[error("phone '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ordered records for a comparison, in input order.
#[derive(Debug, Clone)]
pub struct ComparisonSet {
    pub records: Vec<CatalogRecord>,
}

/// Resolve two mandatory identifiers and an optional third.
///
/// A mandatory miss fails the whole comparison; a third identifier that
/// fails to resolve is dropped silently.
pub async fn compare(
    store: &dyn PhoneStore,
    first: &str,
    second: &str,
    third: Option<&str>,
) -> Result<ComparisonSet, CompareError> {
    let mut records = Vec::with_capacity(3);

    for identifier in [first, second] {
        match resolve(store, identifier).await? {
            Some(record) => records.push(record),
            None => return Err(CompareError::NotFound(identifier.to_string())),
        }
    }

    if let Some(identifier) = third {
        match resolve(store, identifier).await? {
            Some(record) => records.push(record),
            None => {
                tracing::debug!(identifier, "optional comparison entry not found, omitting");
            }
        }
    }

    Ok(ComparisonSet { records })
}
