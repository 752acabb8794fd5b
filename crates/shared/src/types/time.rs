//! Wire timestamp encoding.
//!
//! The service writes UTC timestamps as `2019-03-01_14:05:00.000000`.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{TallyError, TallyResult};

/// Timestamp format used on the wire.
pub const WIRE_FORMAT: &str = "%Y-%m-%d_%H:%M:%S%.6f";

/// Parses a wire timestamp, also accepting RFC 3339.
///
/// # Errors
///
/// Returns `TallyError::MalformedResponse` if neither format matches.
pub fn parse_wire_time(raw: &str) -> TallyResult<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d_%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TallyError::malformed(format!("invalid timestamp: {raw:?}")))
}

/// Formats a timestamp for the wire.
#[must_use]
pub fn format_wire_time(time: &DateTime<Utc>) -> String {
    time.format(WIRE_FORMAT).to_string()
}

/// Serde adapter for wire timestamps.
pub mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a timestamp in the wire format.
    pub fn serialize<S: Serializer>(
        time: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_wire_time(time))
    }

    /// Deserializes a timestamp from the wire format or RFC 3339.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire_time(&raw).map_err(serde::de::Error::custom)
    }
}
