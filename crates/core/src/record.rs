//! Canonical catalog record shape.
//!
//! Records are rebuilt from every store response and never mutated or
//! cached across requests. The spec mappings are open-ended: the remote
//! schema is not fully enumerable, so their contents are interpreted
//! lazily, field by field, at the point of parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One phone in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Stable unique identifier. Rows without one are unusable for lookup
    /// and are dropped at the store boundary.
    #[serde(default)]
    pub id: String,

    /// Brand, free text. Empty means unknown.
    #[serde(default)]
    pub brand_name: String,

    /// Display name, also the fuzzy-match target for resolution.
    #[serde(default)]
    pub phone_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Free-text price field; may list several configuration/price pairs
    /// (e.g. "64GB 4GB RAM: ₹47,600, 128GB 4GB RAM: ₹52,600").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Short-form highlight fields (ram_size, battery_size, display, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub spotlight: BTreeMap<String, String>,

    /// Full spec sheet: category name to ordered label/info pairs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_specs: BTreeMap<String, Vec<SpecEntry>>,
}

/// A single label/info line within a spec category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub info: String,
}

impl CatalogRecord {
    /// Usable for id-keyed lookups and references.
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// JSON `null` collapses to the default value, so downstream parsing only
/// ever asks "is this key present".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_row_deserializes() {
        let record: CatalogRecord =
            serde_json::from_str(r#"{"id": "pixel-8a", "phone_name": "Google Pixel 8a"}"#).unwrap();
        assert_eq!(record.id, "pixel-8a");
        assert!(record.has_id());
        assert!(record.spotlight.is_empty());
        assert!(record.all_specs.is_empty());
    }

    #[test]
    fn test_null_mappings_become_empty() {
        let record: CatalogRecord = serde_json::from_str(
            r#"{"id": "x-1", "spotlight": null, "all_specs": null}"#,
        )
        .unwrap();
        assert!(record.spotlight.is_empty());
        assert!(record.all_specs.is_empty());
    }

    #[test]
    fn test_spec_entries_keep_order() {
        let record: CatalogRecord = serde_json::from_str(
            r#"{
                "id": "x-1",
                "all_specs": {
                    "Display": [
                        {"label": "Type", "info": "AMOLED"},
                        {"label": "Refresh", "info": "120Hz"}
                    ]
                }
            }"#,
        )
        .unwrap();
        let display = &record.all_specs["Display"];
        assert_eq!(display[0].info, "AMOLED");
        assert_eq!(display[1].info, "120Hz");
    }

    #[test]
    fn test_missing_id_is_flagged() {
        let record: CatalogRecord = serde_json::from_str(r#"{"phone_name": "Mystery"}"#).unwrap();
        assert!(!record.has_id());
    }
}
