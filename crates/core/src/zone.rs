//! Host local time zone lookups
//!
//! The host zone is consulted through `chrono::Local`; no zone database is
//! carried here. Offsets are returned in ticks.

use chrono::{Local, LocalResult, Offset, TimeZone};

use crate::calendar::{MAX_TICKS, MIN_TICKS, TICKS_PER_SECOND, ticks_to_naive};

/// Local offset in effect at the given UTC instant
pub fn local_offset_at_utc(utc_ticks: i64) -> i64 {
    let naive = ticks_to_naive(utc_ticks);
    let offset = Local.offset_from_utc_datetime(&naive).fix();
    offset.local_minus_utc() as i64 * TICKS_PER_SECOND
}

/// Local offset for a wall-clock reading in the local zone
///
/// Ambiguous readings (the repeated hour when clocks fall back) resolve to
/// the smaller, standard-time offset. Readings inside a spring-forward gap
/// use the offset in effect at the same reading taken as UTC.
pub fn local_offset_at_local(local_ticks: i64) -> i64 {
    let naive = ticks_to_naive(local_ticks);
    let offset = match Local.offset_from_local_datetime(&naive) {
        LocalResult::Single(offset) => offset.fix(),
        LocalResult::Ambiguous(a, b) => {
            let (a, b) = (a.fix(), b.fix());
            if a.local_minus_utc() <= b.local_minus_utc() { a } else { b }
        }
        LocalResult::None => Local.offset_from_utc_datetime(&naive).fix(),
    };
    offset.local_minus_utc() as i64 * TICKS_PER_SECOND
}

/// UTC ticks to local ticks, clamped to the representable range
pub fn utc_to_local_ticks(utc_ticks: i64) -> i64 {
    (utc_ticks + local_offset_at_utc(utc_ticks)).clamp(MIN_TICKS, MAX_TICKS)
}

/// Local ticks to UTC ticks, clamped to the representable range
pub fn local_to_utc_ticks(local_ticks: i64) -> i64 {
    (local_ticks - local_offset_at_local(local_ticks)).clamp(MIN_TICKS, MAX_TICKS)
}
