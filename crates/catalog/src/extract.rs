//! Derived-field extraction from free-text spec fields.
//!
//! The store keeps price, RAM, battery and refresh rate as unstructured
//! text; the numeric views are recomputed on demand and are `None`
//! whenever the text yields nothing. A failed parse never aborts the rest
//! of the record, and absence is never conflated with zero.

use once_cell::sync::Lazy;
use regex::Regex;

use shop_agent_core::CatalogRecord;

/// Bare numbers below this are assumed to be spec fragments ("4GB", "18W"),
/// not prices. Known weakness: a year like "2025" still passes; kept as-is
/// because callers depend on the literal behavior.
const MIN_PLAUSIBLE_PRICE: f64 = 1000.0;

/// Currency-annotated amount: symbol or abbreviation directly before digits.
static CURRENCY_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:₹|\brs\.?|\binr\b)\s*(\d[\d,]*(?:\.\d+)?)").expect("valid regex")
});

/// Any digit group, commas allowed.
static BARE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid regex"));

static RAM_GB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*GB").expect("valid regex"));

static BATTERY_MAH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{3,5})\s*mAh").expect("valid regex"));

static REFRESH_HZ: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{2,3})\s*Hz").expect("valid regex"));

/// Lowest price mentioned in the free-text price field.
///
/// Currency-annotated tokens win; with none present, any digit group at or
/// above `MIN_PLAUSIBLE_PRICE` is considered.
pub fn lowest_price(record: &CatalogRecord) -> Option<f64> {
    let text = record.price.as_deref()?;

    let mut candidates: Vec<f64> = CURRENCY_AMOUNT
        .captures_iter(text)
        .filter_map(|caps| parse_number(&caps[1]))
        .collect();

    if candidates.is_empty() {
        candidates = BARE_NUMBER
            .find_iter(text)
            .filter_map(|m| parse_number(m.as_str()))
            .filter(|value| *value >= MIN_PLAUSIBLE_PRICE)
            .collect();
    }

    candidates.into_iter().reduce(f64::min)
}

/// Maximum RAM in GB across the spotlight and the Memory spec entries.
pub fn max_ram_gb(record: &CatalogRecord) -> Option<u32> {
    let mut values: Vec<u32> = Vec::new();
    if let Some(text) = record.spotlight.get("ram_size") {
        values.extend(gb_values(text));
    }
    for entry in record.all_specs.get("Memory").into_iter().flatten() {
        values.extend(gb_values(&entry.info));
    }
    values.into_iter().max()
}

/// Battery capacity in mAh; first match wins.
pub fn battery_mah(record: &CatalogRecord) -> Option<u32> {
    if let Some(value) = record
        .spotlight
        .get("battery_size")
        .and_then(|text| first_capture(&BATTERY_MAH, text))
    {
        return Some(value);
    }
    record
        .all_specs
        .get("Battery")
        .into_iter()
        .flatten()
        .find_map(|entry| first_capture(&BATTERY_MAH, &entry.info))
}

/// Display refresh rate in Hz; first match across the Display entries.
pub fn refresh_hz(record: &CatalogRecord) -> Option<u32> {
    record
        .all_specs
        .get("Display")
        .into_iter()
        .flatten()
        .find_map(|entry| first_capture(&REFRESH_HZ, &entry.info))
}

fn gb_values(text: &str) -> impl Iterator<Item = u32> + '_ {
    RAM_GB.captures_iter(text).filter_map(|caps| caps[1].parse().ok())
}

fn first_capture(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|caps| caps[1].parse().ok())
}

fn parse_number(text: &str) -> Option<f64> {
    text.replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_agent_core::SpecEntry;

    fn record_with_price(price: &str) -> CatalogRecord {
        CatalogRecord {
            id: "test".to_string(),
            price: Some(price.to_string()),
            ..CatalogRecord::default()
        }
    }

    fn spec_entry(info: &str) -> SpecEntry {
        SpecEntry {
            label: String::new(),
            info: info.to_string(),
        }
    }

    #[test]
    fn test_lowest_price_across_configurations() {
        let record = record_with_price("64GB 4GB RAM: ₹47,600, 128GB 4GB RAM: ₹52,600");
        assert_eq!(lowest_price(&record), Some(47600.0));
    }

    #[test]
    fn test_lowest_price_with_rs_abbreviation() {
        let record = record_with_price("Rs. 15,999 (launch price)");
        assert_eq!(lowest_price(&record), Some(15999.0));
    }

    #[test]
    fn test_price_fallback_accepts_large_bare_numbers() {
        // No currency token, so the fallback surfaces the 4-digit year.
        // This is a documented false-positive risk of the fallback path;
        // the literal behavior is load-bearing for callers.
        let record = record_with_price("Coming soon, check back in 2025");
        assert_eq!(lowest_price(&record), Some(2025.0));
    }

    #[test]
    fn test_price_fallback_rejects_small_numbers() {
        let record = record_with_price("8GB RAM and 128GB storage variants");
        assert_eq!(lowest_price(&record), None);
    }

    #[test]
    fn test_missing_price_field_is_none() {
        let record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        assert_eq!(lowest_price(&record), None);
    }

    #[test]
    fn test_ram_from_spotlight() {
        let mut record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        record
            .spotlight
            .insert("ram_size".to_string(), "8 GB".to_string());
        assert_eq!(max_ram_gb(&record), Some(8));
    }

    #[test]
    fn test_ram_takes_maximum_across_memory_entries() {
        let mut record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        record
            .all_specs
            .insert("Memory".to_string(), vec![spec_entry("8GB RAM, 12GB RAM")]);
        assert_eq!(max_ram_gb(&record), Some(12));
    }

    #[test]
    fn test_ram_absent_when_no_unit_marker() {
        let mut record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        record
            .spotlight
            .insert("ram_size".to_string(), "generous".to_string());
        assert_eq!(max_ram_gb(&record), None);
    }

    #[test]
    fn test_battery_from_spotlight_ignores_trailing_wattage() {
        let mut record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        record
            .spotlight
            .insert("battery_size".to_string(), "4492 mAh 18W".to_string());
        assert_eq!(battery_mah(&record), Some(4492));
    }

    #[test]
    fn test_battery_falls_back_to_battery_category() {
        let mut record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        record.all_specs.insert(
            "Battery".to_string(),
            vec![spec_entry("Li-Po 5000mAh, non-removable")],
        );
        assert_eq!(battery_mah(&record), Some(5000));
    }

    #[test]
    fn test_refresh_rate_from_display_entries() {
        let mut record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        record.all_specs.insert(
            "Display".to_string(),
            vec![
                spec_entry("6.7\" AMOLED"),
                spec_entry("120Hz adaptive refresh"),
            ],
        );
        assert_eq!(refresh_hz(&record), Some(120));
    }

    #[test]
    fn test_refresh_rate_absent_without_display_category() {
        let record = CatalogRecord {
            id: "test".to_string(),
            ..CatalogRecord::default()
        };
        assert_eq!(refresh_hz(&record), None);
    }
}
