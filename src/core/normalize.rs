//! Custom-data and timestamp normalization
//!
//! Every exported custom-data block carries ISO-8601 `createdAt`/`modifiedAt`
//! strings and never the raw `created_at`/`modified_at` keys.

use crate::domain::{CustomData, ExportError, Result, Timestamp};
use chrono::SecondsFormat;
use serde_json::{Map, Value};

const RAW_CREATED: &str = "created_at";
const RAW_MODIFIED: &str = "modified_at";

/// Renders a timestamp as ISO-8601 with millisecond precision and a `Z` offset
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use stormpath_export::core::normalize::iso8601;
///
/// let ts = Utc.with_ymd_and_hms(2015, 3, 2, 18, 2, 4).unwrap();
/// assert_eq!(iso8601(&ts), "2015-03-02T18:02:04.000Z");
/// ```
pub fn iso8601(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders an optional timestamp, keeping absence as `None`
pub fn optional_iso8601(timestamp: Option<&Timestamp>) -> Option<String> {
    timestamp.map(iso8601)
}

/// Renders a timestamp that the resource is required to carry
///
/// # Errors
///
/// Returns [`ExportError::Normalization`] naming the field and resource when
/// the timestamp is absent.
pub fn required_iso8601(timestamp: Option<&Timestamp>, field: &str, href: &str) -> Result<String> {
    timestamp.map(iso8601).ok_or_else(|| {
        ExportError::Normalization(format!("Resource {href} has no {field} timestamp"))
    })
}

/// Normalizes a custom-data bag into its export form
///
/// The output holds every custom field plus `createdAt`/`modifiedAt`. Raw
/// `created_at`/`modified_at` keys, if the bag carries any, are dropped.
///
/// # Errors
///
/// Returns [`ExportError::Normalization`] when either bag timestamp is
/// missing. Nothing is defaulted.
pub fn normalize_custom_data(custom_data: &CustomData, owner_href: &str) -> Result<Map<String, Value>> {
    let created_at = custom_data.created_at.as_ref().ok_or_else(|| {
        ExportError::Normalization(format!(
            "Custom data of {owner_href} has no created_at timestamp"
        ))
    })?;
    let modified_at = custom_data.modified_at.as_ref().ok_or_else(|| {
        ExportError::Normalization(format!(
            "Custom data of {owner_href} has no modified_at timestamp"
        ))
    })?;

    let mut normalized: Map<String, Value> = custom_data
        .fields
        .iter()
        .filter(|(key, _)| key.as_str() != RAW_CREATED && key.as_str() != RAW_MODIFIED)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    normalized.insert("createdAt".to_string(), Value::String(iso8601(created_at)));
    normalized.insert("modifiedAt".to_string(), Value::String(iso8601(modified_at)));

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 30, 0).unwrap()
    }

    fn bag(fields: Value) -> CustomData {
        CustomData {
            created_at: Some(ts(2015, 1, 2)),
            modified_at: Some(ts(2016, 3, 4)),
            fields: fields.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_normalize_keeps_fields_and_adds_timestamps() {
        let normalized =
            normalize_custom_data(&bag(json!({"plan": "gold", "seats": 5})), "href").unwrap();

        assert_eq!(normalized["plan"], "gold");
        assert_eq!(normalized["seats"], 5);
        assert_eq!(normalized["createdAt"], "2015-01-02T12:30:00.000Z");
        assert_eq!(normalized["modifiedAt"], "2016-03-04T12:30:00.000Z");
    }

    #[test]
    fn test_normalize_drops_raw_timestamp_keys() {
        let normalized = normalize_custom_data(
            &bag(json!({"created_at": "raw", "modified_at": "raw", "x": 1})),
            "href",
        )
        .unwrap();

        assert!(!normalized.contains_key("created_at"));
        assert!(!normalized.contains_key("modified_at"));
        assert_eq!(normalized.len(), 3);
    }

    #[test]
    fn test_normalize_output_timestamps_are_iso8601() {
        let normalized = normalize_custom_data(&bag(json!({})), "href").unwrap();
        for key in ["createdAt", "modifiedAt"] {
            let text = normalized[key].as_str().unwrap();
            assert!(DateTime::parse_from_rfc3339(text).is_ok(), "{key} = {text}");
        }
    }

    #[test]
    fn test_normalize_missing_created_at_fails() {
        let mut custom_data = bag(json!({}));
        custom_data.created_at = None;

        let err = normalize_custom_data(&custom_data, "https://x/accounts/a1").unwrap_err();
        assert!(matches!(err, ExportError::Normalization(_)));
        assert!(err.to_string().contains("https://x/accounts/a1"));
    }

    #[test]
    fn test_normalize_missing_modified_at_fails() {
        let mut custom_data = bag(json!({}));
        custom_data.modified_at = None;
        assert!(normalize_custom_data(&custom_data, "href").is_err());
    }

    #[test]
    fn test_required_and_optional_timestamps() {
        let t = ts(2020, 5, 6);
        assert_eq!(
            required_iso8601(Some(&t), "createdAt", "h").unwrap(),
            "2020-05-06T12:30:00.000Z"
        );
        assert!(required_iso8601(None, "createdAt", "h").is_err());
        assert_eq!(optional_iso8601(None), None);
    }
}
