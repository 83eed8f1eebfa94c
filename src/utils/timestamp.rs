//! Serde helpers for UTC instants (ISO-8601, `Z` suffix, fractional seconds only when present).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Format an instant as e.g. "2022-09-24T19:09:35.573036Z".
pub fn format(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serialize `DateTime<Utc>`. Used with #[serde(with = "crate::utils::timestamp")].
pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    format(instant).serialize(serializer)
}

/// Deserialize `DateTime<Utc>` from any RFC 3339 string, normalising the offset to UTC.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
