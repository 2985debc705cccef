//! Domain model for todos, categories and todo notes.
//!
//! # Responsibility
//! - Define the entity records persisted by the repository layer.
//! - Keep storage-agnostic helpers (priority levels, timestamp codec).
//!
//! # Invariants
//! - Every entity is identified by a store-assigned integer id; `0` marks a
//!   value that has not been persisted yet.
//! - Deletion is a hard delete; there are no tombstones.

pub mod category;
pub mod todo;
pub mod todo_note;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Store-assigned identity shared by all entities.
pub type EntityId = i64;

/// Id carried by entities that were built in memory and not yet inserted.
pub const UNSAVED_ID: EntityId = 0;

/// Formats a timestamp the way it is persisted: RFC 3339, UTC, microseconds.
///
/// Fixed width keeps lexical order equal to chronological order, which the
/// SQL sorts and the overdue comparison rely on.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Drops the sub-microsecond part that `format_timestamp` would lose, so a
/// value handed back from a write equals the value read back later.
pub fn to_storage_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(6)
}

/// Current time at storage precision.
pub fn timestamp_now() -> DateTime<Utc> {
    to_storage_precision(Utc::now())
}

/// Parses a persisted timestamp. Returns `None` for malformed input.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_timestamp, timestamp_now, to_storage_precision};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn timestamp_format_is_fixed_width_utc() {
        let value = Utc.with_ymd_and_hms(2025, 9, 22, 8, 30, 0).unwrap();
        assert_eq!(format_timestamp(&value), "2025-09-22T08:30:00.000000Z");
        assert_eq!(parse_timestamp(&format_timestamp(&value)), Some(value));
    }

    #[test]
    fn storage_precision_survives_the_text_codec() {
        let value = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap()
            + Duration::nanoseconds(123_456_789);
        let truncated = to_storage_precision(value);
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_456_000);
        assert_eq!(parse_timestamp(&format_timestamp(&truncated)), Some(truncated));

        let now = timestamp_now();
        assert_eq!(parse_timestamp(&format_timestamp(&now)), Some(now));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
