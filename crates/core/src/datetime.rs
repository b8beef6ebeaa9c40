//! Wire format for timestamps: `YYYY-MM-DD HH:MM:SS` in UTC.
//!
//! Use with `#[serde(with = "blog_core::datetime")]`. Deserialization also
//! accepts RFC 3339 so clients may send either form.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(FORMAT).to_string()
}

/// Parse either `YYYY-MM-DD HH:MM:SS` (taken as UTC) or RFC 3339.
pub fn parse(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("invalid timestamp '{s}', expected 'YYYY-MM-DD HH:MM:SS' or RFC 3339"))
}

pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Same format for `Option<DateTime<Utc>>`; `null` maps to `None`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_some(&format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                parse(&raw).map(Some).map_err(serde::de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        #[serde(with = "crate::datetime")]
        at: DateTime<Utc>,
        #[serde(with = "crate::datetime::option", default)]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn serializes_space_separated() {
        let row = Row {
            at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
            maybe: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["at"], "2024-03-09 14:05:00");
        assert!(json["maybe"].is_null());
    }

    #[test]
    fn accepts_both_input_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(parse("2024-03-09 14:05:00").unwrap(), expected);
        assert_eq!(parse("2024-03-09T16:05:00+02:00").unwrap(), expected);
        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn missing_optional_field_is_none() {
        let row: Row = serde_json::from_str(r#"{"at":"2024-01-01 00:00:00"}"#).unwrap();
        assert_eq!(row.maybe, None);
    }
}
