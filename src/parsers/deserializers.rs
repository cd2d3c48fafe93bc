use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts any JSON value, keeping it only when it is a string
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Accepts any JSON value; only a literal `true` counts as true
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Option::<Value>::deserialize(deserializer)?, Some(Value::Bool(true))))
}

/// Interpret an opaque timestamp for ordering purposes.
///
/// Integers are Unix milliseconds, strings are RFC3339. Anything else has no position.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => s.parse::<DateTime<Utc>>().ok(),
        _ => None,
    }
}

/// Sort key for an optional timestamp, `None` when it can't be interpreted
pub fn timestamp_sort_key(value: Option<&Value>) -> Option<i64> {
    value.and_then(parse_timestamp).map(|ts| ts.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_bool")]
        flag: bool,
    }

    #[test]
    fn test_lenient_string() {
        let sample: Sample = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(sample.name.as_deref(), Some("x"));

        let sample: Sample = serde_json::from_value(json!({"name": ["x"]})).unwrap();
        assert_eq!(sample.name, None);

        let sample: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(sample.name, None);
    }

    #[test]
    fn test_lenient_bool() {
        let sample: Sample = serde_json::from_value(json!({"flag": true})).unwrap();
        assert!(sample.flag);

        let sample: Sample = serde_json::from_value(json!({"flag": 1})).unwrap();
        assert!(!sample.flag);

        let sample: Sample = serde_json::from_value(json!({"flag": null})).unwrap();
        assert!(!sample.flag);
    }

    #[test]
    fn test_parse_timestamp_integer_millis() {
        let expected = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(parse_timestamp(&json!(1762076480016_i64)), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp(&json!("2025-11-02T09:41:20.016Z")).unwrap();
        assert_eq!(ts.timestamp_millis(), 1762076480016);
    }

    #[test]
    fn test_parse_timestamp_rejects_other_shapes() {
        assert!(parse_timestamp(&json!("yesterday")).is_none());
        assert!(parse_timestamp(&json!({"at": 1})).is_none());
        assert!(timestamp_sort_key(None).is_none());
    }
}
