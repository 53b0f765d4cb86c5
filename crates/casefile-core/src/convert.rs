//! Column converters between record fields and their stored primitive forms.
//!
//! Identifiers are stored as hyphenated uuid text and timestamps as integer
//! milliseconds since the epoch. Both conversions round-trip exactly.

use crate::error::StoreError;
use crate::record::RecordId;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Encode a record id into its stored text form.
pub fn encode_id(id: RecordId) -> String {
    id.to_string()
}

/// Decode a stored id column back into a [`RecordId`].
pub fn decode_id(text: &str) -> Result<RecordId, StoreError> {
    Uuid::parse_str(text).map_err(|err| StoreError::Corrupt(format!("bad id {text:?}: {err}")))
}

/// Encode a timestamp into integer milliseconds since the epoch.
pub fn encode_timestamp(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}

/// Decode a stored millisecond timestamp.
pub fn decode_timestamp(millis: i64) -> Result<DateTime<Utc>, StoreError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| StoreError::Corrupt(format!("timestamp out of range: {millis}")))
}

/// Truncate a timestamp to the millisecond precision the store persists.
pub fn at_millis_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    // encode_timestamp truncates toward zero; re-decoding keeps in-memory
    // values identical to what a later read would produce.
    decode_timestamp(encode_timestamp(timestamp)).unwrap_or(timestamp)
}
