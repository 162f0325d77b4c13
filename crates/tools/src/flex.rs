//! Tolerant numeric deserializers.
//!
//! The dialogue layer sends numbers as JSON numbers or as strings,
//! interchangeably; both forms land in the same typed argument fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value_as_f64(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a number, got {value}"))
        }),
    }
}

pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value_as_f64(&value)
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
            .map(|v| v.round() as u32)
            .map(Some)
            .ok_or_else(|| {
                serde::de::Error::custom(format!("expected a non-negative integer, got {value}"))
            }),
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize)]
    struct Args {
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "opt_u32")]
        ram: Option<u32>,
    }

    #[test]
    fn test_numbers_and_numeric_strings_both_parse() {
        let args: Args = serde_json::from_value(json!({"price": 30000, "ram": "8"})).unwrap();
        assert_eq!(args.price, Some(30000.0));
        assert_eq!(args.ram, Some(8));

        let args: Args =
            serde_json::from_value(json!({"price": "29,999", "ram": 12})).unwrap();
        assert_eq!(args.price, Some(29999.0));
        assert_eq!(args.ram, Some(12));
    }

    #[test]
    fn test_missing_and_null_are_none() {
        let args: Args = serde_json::from_value(json!({})).unwrap();
        assert_eq!(args.price, None);

        let args: Args = serde_json::from_value(json!({"price": null, "ram": null})).unwrap();
        assert_eq!(args.price, None);
        assert_eq!(args.ram, None);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(serde_json::from_value::<Args>(json!({"ram": "lots"})).is_err());
        assert!(serde_json::from_value::<Args>(json!({"ram": -4})).is_err());
    }
}
