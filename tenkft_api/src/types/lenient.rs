//! Field decoders for values the API leaves blank.
//!
//! Unset dates arrive as `null` or `""`, and unset flags as `null`. These map
//! both to the field's empty value instead of failing the whole record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// `"YYYY-MM-DD"`, a full timestamp (date part kept), `""` or `null`.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = non_blank(deserializer)? else {
        return Ok(None);
    };
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    raw.parse::<DateTime<Utc>>()
        .map(|ts| Some(ts.date_naive()))
        .map_err(|e| D::Error::custom(format!("invalid date {:?}: {}", raw, e)))
}

/// RFC 3339 timestamp, `""` or `null`.
pub fn datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = non_blank(deserializer)? else {
        return Ok(None);
    };
    raw.parse::<DateTime<Utc>>()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
}

/// `null` reads as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
