use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{
    self, FILE_TIME_OFFSET, MAX_MILLIS, MAX_TICKS, MILLIS_PER_DAY, MIN_TICKS, OA_DATE_MAX,
    OA_DATE_MIN, OA_DATE_MIN_TICKS, OA_DATE_OFFSET, TICKS_PER_DAY, TICKS_PER_MILLISECOND,
};
use crate::error::{MomentError, MomentResult};
use crate::zone;

const TICKS_MASK: i64 = 0x3FFF_FFFF_FFFF_FFFF;
const TICKS_CEILING: i64 = 0x4000_0000_0000_0000;
const UTC_FLAG: i64 = 0x4000_0000_0000_0000;
const LOCAL_FLAG: i64 = i64::MIN;

/// How a calendar moment relates to UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum MomentKind {
    /// Neither local nor UTC
    #[default]
    Unspecified,
    /// Wall-clock time in the host's local zone
    Local,
    /// Coordinated Universal Time
    Utc,
}

/// A date and time with a kind tag but no explicit offset
///
/// Stored as a count of 100ns ticks since 0001-01-01T00:00:00. Equality
/// compares both ticks and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarMoment")]
pub struct CalendarMoment {
    ticks: i64,
    kind: MomentKind,
}

#[derive(Deserialize)]
struct RawCalendarMoment {
    ticks: i64,
    kind: MomentKind,
}

impl TryFrom<RawCalendarMoment> for CalendarMoment {
    type Error = MomentError;

    fn try_from(raw: RawCalendarMoment) -> MomentResult<Self> {
        CalendarMoment::new(raw.ticks, raw.kind)
    }
}

impl CalendarMoment {
    /// Earliest representable moment, 0001-01-01T00:00:00
    pub const MIN_VALUE: CalendarMoment = CalendarMoment {
        ticks: MIN_TICKS,
        kind: MomentKind::Unspecified,
    };

    /// Latest representable moment, 9999-12-31T23:59:59.9999999
    pub const MAX_VALUE: CalendarMoment = CalendarMoment {
        ticks: MAX_TICKS,
        kind: MomentKind::Unspecified,
    };

    pub fn new(ticks: i64, kind: MomentKind) -> MomentResult<Self> {
        calendar::check_ticks(ticks, "moment")?;
        Ok(Self { ticks, kind })
    }

    /// Build from a chrono date-time; precision below 100ns is truncated
    pub fn from_naive(naive: NaiveDateTime, kind: MomentKind) -> MomentResult<Self> {
        Ok(Self {
            ticks: calendar::naive_to_ticks(&naive)?,
            kind,
        })
    }

    /// Ticks already known to be in range
    pub(crate) fn from_valid_ticks(ticks: i64, kind: MomentKind) -> Self {
        Self {
            ticks: ticks.clamp(MIN_TICKS, MAX_TICKS),
            kind,
        }
    }

    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    pub fn kind(&self) -> MomentKind {
        self.kind
    }

    pub fn to_naive(&self) -> NaiveDateTime {
        calendar::ticks_to_naive(self.ticks)
    }

    /// Same moment with the time of day set to midnight
    pub fn date(&self) -> Self {
        Self {
            ticks: self.ticks - self.ticks % TICKS_PER_DAY,
            kind: self.kind,
        }
    }

    /// Same ticks, different kind
    pub fn with_kind(&self, kind: MomentKind) -> Self {
        Self {
            ticks: self.ticks,
            kind,
        }
    }

    /// Convert to local time; Unspecified is treated as UTC
    pub fn to_local_time(&self) -> Self {
        match self.kind {
            MomentKind::Local => *self,
            MomentKind::Utc | MomentKind::Unspecified => {
                Self::from_valid_ticks(zone::utc_to_local_ticks(self.ticks), MomentKind::Local)
            }
        }
    }

    /// Convert to UTC; Unspecified is treated as local
    pub fn to_universal_time(&self) -> Self {
        match self.kind {
            MomentKind::Utc => *self,
            MomentKind::Local | MomentKind::Unspecified => {
                Self::from_valid_ticks(zone::local_to_utc_ticks(self.ticks), MomentKind::Utc)
            }
        }
    }

    /// Pack into 64 bits: two kind bits followed by 62 tick bits
    ///
    /// Local moments are stored as their UTC ticks so they can be
    /// re-localized wherever they are decoded.
    pub fn to_binary(&self) -> i64 {
        match self.kind {
            MomentKind::Unspecified => self.ticks,
            MomentKind::Utc => self.ticks | UTC_FLAG,
            MomentKind::Local => {
                let mut ticks = self.ticks - zone::local_offset_at_local(self.ticks);
                if ticks < 0 {
                    ticks += TICKS_CEILING;
                }
                ticks | LOCAL_FLAG
            }
        }
    }

    /// Inverse of [`CalendarMoment::to_binary`]
    pub fn from_binary(data: i64) -> MomentResult<Self> {
        if data & LOCAL_FLAG != 0 {
            let mut ticks = data & TICKS_MASK;
            // negative UTC ticks were wrapped into the ceiling
            if ticks > TICKS_CEILING - TICKS_PER_DAY {
                ticks -= TICKS_CEILING;
            }
            let offset = zone::local_offset_at_utc(ticks.clamp(MIN_TICKS, MAX_TICKS));
            ticks += offset;
            if ticks < 0 {
                ticks += TICKS_PER_DAY;
            }
            if !calendar::is_valid_ticks(ticks) {
                return Err(MomentError::format(format!(
                    "binary data {data:#x} decodes outside the representable range"
                )));
            }
            return Ok(Self {
                ticks,
                kind: MomentKind::Local,
            });
        }

        let ticks = data & TICKS_MASK;
        if !calendar::is_valid_ticks(ticks) {
            return Err(MomentError::format(format!(
                "binary data {data:#x} decodes outside the representable range"
            )));
        }
        let kind = if data & UTC_FLAG != 0 {
            MomentKind::Utc
        } else {
            MomentKind::Unspecified
        };
        Ok(Self { ticks, kind })
    }

    /// Decode Windows file time (100ns ticks since 1601-01-01 UTC) as UTC
    pub fn from_file_time_utc(file_time: i64) -> MomentResult<Self> {
        if !(0..=MAX_TICKS - FILE_TIME_OFFSET).contains(&file_time) {
            return Err(MomentError::range(format!(
                "file time {file_time} outside [0, {}]",
                MAX_TICKS - FILE_TIME_OFFSET
            )));
        }
        Ok(Self {
            ticks: file_time + FILE_TIME_OFFSET,
            kind: MomentKind::Utc,
        })
    }

    /// Decode Windows file time as local time
    pub fn from_file_time(file_time: i64) -> MomentResult<Self> {
        Ok(Self::from_file_time_utc(file_time)?.to_local_time())
    }

    /// Encode as Windows file time; Local moments are converted to UTC first
    pub fn to_file_time_utc(&self) -> MomentResult<i64> {
        let ticks = match self.kind {
            MomentKind::Local => self.to_universal_time().ticks,
            _ => self.ticks,
        };
        let file_time = ticks - FILE_TIME_OFFSET;
        if file_time < 0 {
            return Err(MomentError::range(format!(
                "{self} predates the file time epoch"
            )));
        }
        Ok(file_time)
    }

    /// Encode as Windows file time after converting to UTC
    pub fn to_file_time(&self) -> MomentResult<i64> {
        self.to_universal_time().to_file_time_utc()
    }

    /// Decode an OLE Automation date (days since 1899-12-30)
    pub fn from_oa_date(value: f64) -> MomentResult<Self> {
        if !(value < OA_DATE_MAX && value > OA_DATE_MIN) {
            return Err(MomentError::format(format!(
                "{value} is not a legal OLE Automation date"
            )));
        }
        let rounding = if value >= 0.0 { 0.5 } else { -0.5 };
        let mut millis = (value * MILLIS_PER_DAY as f64 + rounding) as i64;
        // the fraction of a negative date still counts forward from midnight
        if millis < 0 {
            millis -= (millis % MILLIS_PER_DAY) * 2;
        }
        millis += OA_DATE_OFFSET / TICKS_PER_MILLISECOND;
        if !(0..MAX_MILLIS).contains(&millis) {
            return Err(MomentError::range(format!(
                "OLE Automation date {value} outside the representable range"
            )));
        }
        Ok(Self {
            ticks: millis * TICKS_PER_MILLISECOND,
            kind: MomentKind::Unspecified,
        })
    }

    /// Encode as an OLE Automation date
    pub fn to_oa_date(&self) -> MomentResult<f64> {
        let mut value = self.ticks;
        if value == 0 {
            return Ok(0.0);
        }
        // time-only values are anchored at the OLE epoch
        if value < TICKS_PER_DAY {
            value += OA_DATE_OFFSET;
        }
        if value < OA_DATE_MIN_TICKS {
            return Err(MomentError::range(format!(
                "{self} is before the first OLE Automation date"
            )));
        }
        let mut millis = (value - OA_DATE_OFFSET) / TICKS_PER_MILLISECOND;
        if millis < 0 {
            let frac = millis % MILLIS_PER_DAY;
            if frac != 0 {
                millis -= (MILLIS_PER_DAY + frac) * 2;
            }
        }
        Ok(millis as f64 / MILLIS_PER_DAY as f64)
    }
}

impl Default for CalendarMoment {
    fn default() -> Self {
        Self::MIN_VALUE
    }
}

impl fmt::Display for CalendarMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive().format("%Y-%m-%dT%H:%M:%S%.7f"))?;
        match self.kind {
            MomentKind::Utc => write!(f, "Z"),
            MomentKind::Local => write!(f, " (local)"),
            MomentKind::Unspecified => Ok(()),
        }
    }
}
