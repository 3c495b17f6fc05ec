//! Calendar parsing shared by the form and payload documents.
//!
//! The backend and the date pickers disagree on representation (plain dates,
//! minute precision date-times, RFC 3339 with offsets), so deserialization
//! accepts all of them while serialization always emits one canonical form.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in [SECOND_FORMAT, "%Y-%m-%dT%H:%M:%S%.f", MINUTE_FORMAT] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}

pub(crate) fn format_minutes(value: &NaiveDateTime) -> String {
    value.format(MINUTE_FORMAT).to_string()
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Date-time fields serialized as `YYYY-MM-DDTHH:MM:SS`.
pub(crate) mod datetime {
    use super::*;

    pub(crate) fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(SECOND_FORMAT).to_string())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_datetime(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("'{raw}' is not a date or date-time")))
    }
}

/// Optional date-time fields; blank strings read as absent.
pub(crate) mod optional_datetime {
    use super::*;

    pub(crate) fn serialize<S>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(SECOND_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match optional_text(deserializer)? {
            Some(raw) => parse_datetime(&raw).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("'{raw}' is not a date or date-time"))
            }),
            None => Ok(None),
        }
    }
}

/// Optional calendar dates serialized as `YYYY-MM-DD`; date-times are truncated on read.
pub(crate) mod optional_date {
    use super::*;

    pub(crate) fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match optional_text(deserializer)? {
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("'{raw}' is not a date"))),
            None => Ok(None),
        }
    }
}

/// Housing history bounds travel with minute precision.
pub(crate) mod minutes {
    use super::*;

    pub(crate) fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_minutes(value))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        super::datetime::deserialize(deserializer)
    }
}
