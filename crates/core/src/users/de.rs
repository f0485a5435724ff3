//! Lenient deserializers for form payloads.
//!
//! Dashboard forms send `""` for untouched optional inputs and `null` for
//! cleared lists; both mean "absent".

use chrono::{DateTime, NaiveDate};
use serde::de::{Error, IntoDeserializer};
use serde::{Deserialize, Deserializer};

/// `""` or `null` becomes `None`; anything else deserializes as `T`.
pub fn empty_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(de)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => {
            let inner: serde::de::value::StringDeserializer<D::Error> = s.into_deserializer();
            T::deserialize(inner).map(Some)
        }
    }
}

/// `null` becomes an empty list.
pub fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

/// `null` becomes `true`, for flags that default on.
pub fn null_as_true<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(de)?.unwrap_or(true))
}

/// Accept `YYYY-MM-DD` or a full RFC 3339 timestamp (as produced by a date
/// picker); `""` and `null` become `None`.
pub fn optional_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(de)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|e| D::Error::custom(format!("invalid date {raw:?}: {e}")))
}
