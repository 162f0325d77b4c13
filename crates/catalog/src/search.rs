//! Filter engine over the catalog.
//!
//! Constraints are independent, optional, and compose conjunctively. A
//! record lacking comparable data for a constraint is retained (benefit of
//! the doubt) rather than excluded; the single exception is brand, where a
//! record with no brand is excluded whenever brand is constrained. Result
//! order is the store's native row order, with no ranking.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use shop_agent_core::{CatalogRecord, PhoneStore, StoreError};

use crate::extract;

/// Independent optional constraints over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact brand, matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Maximum price in rupees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Minimum price in rupees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Minimum RAM in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ram: Option<u32>,
    /// Minimum battery capacity in mAh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_battery: Option<u32>,
    /// Minimum display refresh rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_refresh_rate: Option<u32>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.max_price.is_none()
            && self.min_price.is_none()
            && self.min_ram.is_none()
            && self.min_battery.is_none()
            && self.min_refresh_rate.is_none()
    }

    /// Render the applied constraints for result observability, using the
    /// tool-surface field names.
    pub fn applied(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(ref brand) = self.brand {
            map.insert("brand".to_string(), json!(brand));
        }
        if let Some(value) = self.max_price {
            map.insert("max_price".to_string(), json!(value));
        }
        if let Some(value) = self.min_price {
            map.insert("min_price".to_string(), json!(value));
        }
        if let Some(value) = self.min_ram {
            map.insert("min_ram".to_string(), json!(value));
        }
        if let Some(value) = self.min_battery {
            map.insert("battery_threshold".to_string(), json!(value));
        }
        if let Some(value) = self.min_refresh_rate {
            map.insert("refresh_rate".to_string(), json!(value));
        }
        map
    }

    /// Whether a record survives every constraint.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        if let Some(ref brand) = self.brand {
            if record.brand_name.trim().is_empty()
                || !record.brand_name.eq_ignore_ascii_case(brand)
            {
                return false;
            }
        }

        if self.max_price.is_some() || self.min_price.is_some() {
            if let Some(price) = extract::lowest_price(record) {
                if self.max_price.is_some_and(|max| price > max) {
                    return false;
                }
                if self.min_price.is_some_and(|min| price < min) {
                    return false;
                }
            }
        }

        if let (Some(min_ram), Some(ram)) = (self.min_ram, extract::max_ram_gb(record)) {
            if ram < min_ram {
                return false;
            }
        }

        if let (Some(min_battery), Some(battery)) = (self.min_battery, extract::battery_mah(record))
        {
            if battery < min_battery {
                return false;
            }
        }

        if let (Some(min_refresh), Some(refresh)) =
            (self.min_refresh_rate, extract::refresh_hz(record))
        {
            if refresh < min_refresh {
                return false;
            }
        }

        true
    }
}

/// Search the catalog, pushing the brand constraint down to the store and
/// applying everything (brand included) locally.
pub async fn search(
    store: &dyn PhoneStore,
    criteria: &FilterCriteria,
) -> Result<Vec<CatalogRecord>, StoreError> {
    let rows = store.fetch_filtered(criteria.brand.as_deref(), None).await?;
    Ok(rows.into_iter().filter(|r| criteria.matches(r)).collect())
}
