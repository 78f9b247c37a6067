use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    self, FILE_TIME_OFFSET, MAX_TICKS, MIN_TICKS, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE,
    TICKS_PER_SECOND, UNIX_EPOCH_TICKS,
};
use crate::error::{MomentError, MomentResult};
use crate::moment::{CalendarMoment, MomentKind};
use crate::zone;

/// Largest offset magnitude, in minutes, an offset moment may carry
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

pub const UNIX_MIN_SECONDS: i64 =
    MIN_TICKS / TICKS_PER_SECOND - UNIX_EPOCH_TICKS / TICKS_PER_SECOND;
pub const UNIX_MAX_SECONDS: i64 =
    MAX_TICKS / TICKS_PER_SECOND - UNIX_EPOCH_TICKS / TICKS_PER_SECOND;
pub const UNIX_MIN_MILLISECONDS: i64 = UNIX_MIN_SECONDS * 1_000;
pub const UNIX_MAX_MILLISECONDS: i64 =
    MAX_TICKS / TICKS_PER_MILLISECOND - UNIX_EPOCH_TICKS / TICKS_PER_MILLISECOND;

/// A date and time paired with an explicit UTC offset
///
/// Both the UTC instant and the local clock reading stay inside the tick
/// range, and the offset never exceeds fourteen hours either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawOffsetMoment")]
pub struct OffsetMoment {
    utc_ticks: i64,
    offset_minutes: i16,
}

#[derive(Deserialize)]
struct RawOffsetMoment {
    utc_ticks: i64,
    offset_minutes: i16,
}

impl TryFrom<RawOffsetMoment> for OffsetMoment {
    type Error = MomentError;

    fn try_from(raw: RawOffsetMoment) -> MomentResult<Self> {
        OffsetMoment::from_utc_ticks(raw.utc_ticks, raw.offset_minutes as i32)
    }
}

pub(crate) fn check_offset(offset_minutes: i32) -> MomentResult<i16> {
    if offset_minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(MomentError::OffsetRange(offset_minutes));
    }
    Ok(offset_minutes as i16)
}

impl OffsetMoment {
    pub const MIN_VALUE: OffsetMoment = OffsetMoment {
        utc_ticks: MIN_TICKS,
        offset_minutes: 0,
    };

    pub const MAX_VALUE: OffsetMoment = OffsetMoment {
        utc_ticks: MAX_TICKS,
        offset_minutes: 0,
    };

    /// Build from a local clock reading and the offset that applies to it
    pub fn from_local_ticks(local_ticks: i64, offset_minutes: i32) -> MomentResult<Self> {
        let offset = check_offset(offset_minutes)?;
        calendar::check_ticks(local_ticks, "local")?;
        let utc_ticks = local_ticks - offset as i64 * TICKS_PER_MINUTE;
        calendar::check_ticks(utc_ticks, "UTC")?;
        Ok(Self {
            utc_ticks,
            offset_minutes: offset,
        })
    }

    /// Build from a UTC instant viewed at the given offset
    pub fn from_utc_ticks(utc_ticks: i64, offset_minutes: i32) -> MomentResult<Self> {
        let offset = check_offset(offset_minutes)?;
        calendar::check_ticks(utc_ticks, "UTC")?;
        calendar::check_ticks(utc_ticks + offset as i64 * TICKS_PER_MINUTE, "local")?;
        Ok(Self {
            utc_ticks,
            offset_minutes: offset,
        })
    }

    /// UTC moments get a zero offset, everything else the host's local offset
    pub fn from_calendar(moment: CalendarMoment) -> MomentResult<Self> {
        match moment.kind() {
            MomentKind::Utc => Self::from_utc_ticks(moment.ticks(), 0),
            MomentKind::Local | MomentKind::Unspecified => {
                let offset = zone::local_offset_at_local(moment.ticks());
                Self::from_local_ticks(moment.ticks(), (offset / TICKS_PER_MINUTE) as i32)
            }
        }
    }

    pub fn from_chrono(value: DateTime<FixedOffset>) -> MomentResult<Self> {
        let utc_ticks = calendar::naive_to_ticks(&value.naive_utc())?;
        Self::from_utc_ticks(utc_ticks, value.offset().local_minus_utc() / 60)
    }

    pub fn to_chrono(&self) -> DateTime<FixedOffset> {
        let utc = calendar::ticks_to_naive(self.utc_ticks).and_utc();
        match FixedOffset::east_opt(self.offset_minutes as i32 * 60) {
            Some(offset) => utc.with_timezone(&offset),
            None => utc.fixed_offset(),
        }
    }

    pub fn utc_ticks(&self) -> i64 {
        self.utc_ticks
    }

    /// Ticks of the clock reading at this moment's offset
    pub fn local_ticks(&self) -> i64 {
        self.utc_ticks + self.offset_minutes as i64 * TICKS_PER_MINUTE
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes as i32
    }

    pub fn offset(&self) -> FixedOffset {
        self.to_chrono().offset().to_owned()
    }

    /// The clock reading as a calendar moment with no kind
    pub fn clock_moment(&self) -> CalendarMoment {
        CalendarMoment::from_valid_ticks(self.local_ticks(), MomentKind::Unspecified)
    }

    /// The instant as a UTC calendar moment
    pub fn utc_moment(&self) -> CalendarMoment {
        CalendarMoment::from_valid_ticks(self.utc_ticks, MomentKind::Utc)
    }

    /// Same instant at a zero offset
    pub fn to_utc(&self) -> Self {
        Self {
            utc_ticks: self.utc_ticks,
            offset_minutes: 0,
        }
    }

    /// Same instant at the host's local offset
    pub fn to_local(&self) -> MomentResult<Self> {
        let offset = zone::local_offset_at_utc(self.utc_ticks);
        Self::from_utc_ticks(self.utc_ticks, (offset / TICKS_PER_MINUTE) as i32)
    }

    /// Whether both values denote the same instant, regardless of offset
    pub fn same_instant(&self, other: &Self) -> bool {
        self.utc_ticks == other.utc_ticks
    }

    pub fn from_unix_time_seconds(seconds: i64) -> MomentResult<Self> {
        if !(UNIX_MIN_SECONDS..=UNIX_MAX_SECONDS).contains(&seconds) {
            return Err(MomentError::range(format!(
                "unix seconds {seconds} outside [{UNIX_MIN_SECONDS}, {UNIX_MAX_SECONDS}]"
            )));
        }
        Ok(Self {
            utc_ticks: seconds * TICKS_PER_SECOND + UNIX_EPOCH_TICKS,
            offset_minutes: 0,
        })
    }

    pub fn from_unix_time_milliseconds(milliseconds: i64) -> MomentResult<Self> {
        if !(UNIX_MIN_MILLISECONDS..=UNIX_MAX_MILLISECONDS).contains(&milliseconds) {
            return Err(MomentError::range(format!(
                "unix milliseconds {milliseconds} outside \
                 [{UNIX_MIN_MILLISECONDS}, {UNIX_MAX_MILLISECONDS}]"
            )));
        }
        Ok(Self {
            utc_ticks: milliseconds * TICKS_PER_MILLISECOND + UNIX_EPOCH_TICKS,
            offset_minutes: 0,
        })
    }

    pub fn to_unix_time_seconds(&self) -> i64 {
        self.utc_ticks / TICKS_PER_SECOND - UNIX_EPOCH_TICKS / TICKS_PER_SECOND
    }

    pub fn to_unix_time_milliseconds(&self) -> i64 {
        self.utc_ticks / TICKS_PER_MILLISECOND - UNIX_EPOCH_TICKS / TICKS_PER_MILLISECOND
    }

    /// Decode Windows file time at the host's local offset
    pub fn from_file_time(file_time: i64) -> MomentResult<Self> {
        Self::from_calendar(CalendarMoment::from_file_time(file_time)?)
    }

    pub fn to_file_time(&self) -> MomentResult<i64> {
        let file_time = self.utc_ticks - FILE_TIME_OFFSET;
        if file_time < 0 {
            return Err(MomentError::range(format!(
                "{self} predates the file time epoch"
            )));
        }
        Ok(file_time)
    }
}

impl Default for OffsetMoment {
    fn default() -> Self {
        Self::MIN_VALUE
    }
}

impl fmt::Display for OffsetMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let minutes = self.offset_minutes.unsigned_abs();
        write!(
            f,
            "{}{}{:02}:{:02}",
            calendar::ticks_to_naive(self.local_ticks()).format("%Y-%m-%dT%H:%M:%S%.7f"),
            sign,
            minutes / 60,
            minutes % 60
        )
    }
}
