//! Tempora Core
//!
//! Pure moment types for the tempora clock seam.
//! This crate performs no clock reads and is fully unit testable.
//!
//! ```text
//! CalendarMoment (ticks + kind)  ──from_calendar──►  OffsetMoment (utc ticks + offset)
//!        │                                                  │
//!        ├── binary / file time / OLE date codecs           ├── file time / Unix codecs
//!        └── parse_calendar(_exact)                         └── parse_offset(_exact)
//! ```

pub mod calendar;
pub mod culture;
pub mod error;
pub mod moment;
pub mod offset;
pub mod parse;
pub mod styles;
pub mod zone;

pub use calendar::{
    FILE_TIME_OFFSET, MAX_TICKS, MIN_TICKS, OA_DATE_OFFSET, TICKS_PER_DAY, TICKS_PER_HOUR,
    TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND, UNIX_EPOCH_TICKS, days_in_month,
    is_leap_year,
};
pub use culture::{Culture, DateOrder, StandardKind};
pub use error::{MomentError, MomentResult};
pub use moment::{CalendarMoment, MomentKind};
pub use offset::{
    MAX_OFFSET_MINUTES, OffsetMoment, UNIX_MAX_MILLISECONDS, UNIX_MAX_SECONDS,
    UNIX_MIN_MILLISECONDS, UNIX_MIN_SECONDS,
};
pub use parse::{
    ParseContext, parse_calendar, parse_calendar_exact, parse_offset, parse_offset_exact,
};
pub use styles::ParseStyles;
