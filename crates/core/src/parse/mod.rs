//! Free-form and pattern-driven parsing
//!
//! Both parsers produce a `Fields` record of whatever components the input
//! carried. Resolution then fills the gaps (default date, 12-hour clock,
//! zone adjustments) and builds the moment.

mod exact;
mod lenient;

use chrono::{Datelike, NaiveDate};

use crate::calendar::{self, TICKS_PER_MINUTE};
use crate::culture::Culture;
use crate::error::{MomentError, MomentResult};
use crate::moment::{CalendarMoment, MomentKind};
use crate::offset::OffsetMoment;
use crate::styles::ParseStyles;
use crate::zone;

/// Inputs a parse needs from outside the string itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    /// Date used when the input carries none, and year when it omits one
    pub today: NaiveDate,
}

impl ParseContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Zone {
    Utc,
    /// Minutes east of UTC
    Offset(i32),
}

impl Zone {
    fn minutes(self) -> i32 {
        match self {
            Zone::Utc => 0,
            Zone::Offset(minutes) => minutes,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Fields {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// 0 is Sunday
    pub day_of_week: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub fraction_ticks: Option<i64>,
    pub meridiem: Option<Meridiem>,
    /// The hour was read on a 12-hour clock
    pub hour12: bool,
    pub zone: Option<Zone>,
}

/// Store a component, failing if the input already supplied it
pub(crate) fn set_once<T>(slot: &mut Option<T>, value: T, what: &str) -> MomentResult<()> {
    if slot.is_some() {
        return Err(MomentError::format(format!("{what} appears more than once")));
    }
    *slot = Some(value);
    Ok(())
}

impl Fields {
    pub(crate) fn has_date(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    fn resolve_date(&self, styles: ParseStyles, ctx: &ParseContext) -> (i32, u32, u32) {
        let today = ctx.today;
        match (self.year, self.month, self.day) {
            (None, None, None) => {
                if styles.contains(ParseStyles::NO_CURRENT_DATE_DEFAULT) {
                    (1, 1, 1)
                } else {
                    (today.year(), today.month(), today.day())
                }
            }
            (Some(year), None, None) => (year, 1, 1),
            (year, month, day) => (
                year.unwrap_or(today.year()),
                month.unwrap_or(1),
                day.unwrap_or(1),
            ),
        }
    }

    fn resolve_hour(&self) -> MomentResult<u32> {
        let hour = self.hour.unwrap_or(0);
        if self.hour12 {
            if hour > 12 {
                return Err(MomentError::format(format!(
                    "hour {hour} is not valid on a 12-hour clock"
                )));
            }
            return Ok(match self.meridiem.unwrap_or(Meridiem::Am) {
                Meridiem::Am if hour == 12 => 0,
                Meridiem::Am => hour,
                Meridiem::Pm if hour == 12 => 12,
                Meridiem::Pm => hour + 12,
            });
        }
        match self.meridiem {
            Some(Meridiem::Am) if hour >= 12 => Err(MomentError::format(format!(
                "AM designator does not match hour {hour}"
            ))),
            Some(Meridiem::Pm) if hour < 12 => Err(MomentError::format(format!(
                "PM designator does not match hour {hour}"
            ))),
            _ => Ok(hour),
        }
    }

    /// Clock ticks of the reading, before any zone handling
    fn resolve_ticks(&self, styles: ParseStyles, ctx: &ParseContext) -> MomentResult<i64> {
        let (year, month, day) = self.resolve_date(styles, ctx);
        let max_day = calendar::days_in_month(year, month as i32)
            .map_err(|e| MomentError::format(e.to_string()))?;
        if day == 0 || day > max_day {
            return Err(MomentError::format(format!(
                "day {day} is not valid for {year:04}-{month:02}"
            )));
        }
        if let Some(expected) = self.day_of_week {
            let actual = NaiveDate::from_ymd_opt(year, month, day)
                .map(|d| d.weekday().num_days_from_sunday());
            if actual != Some(expected) {
                return Err(MomentError::format(format!(
                    "day of week does not match {year:04}-{month:02}-{day:02}"
                )));
            }
        }

        let hour = self.resolve_hour()?;
        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);
        if hour > 23 || minute > 59 || second > 59 {
            return Err(MomentError::format(format!(
                "time {hour}:{minute:02}:{second:02} is not valid"
            )));
        }

        Ok(calendar::date_to_ticks(year, month, day)
            + calendar::time_to_ticks(hour, minute, second)
            + self.fraction_ticks.unwrap_or(0))
    }

    fn into_calendar(
        self,
        styles: ParseStyles,
        ctx: &ParseContext,
    ) -> MomentResult<CalendarMoment> {
        let ticks = self.resolve_ticks(styles, ctx)?;

        if let Some(zone) = self.zone {
            let utc = ticks - zone.minutes() as i64 * TICKS_PER_MINUTE;
            let utc = calendar::check_ticks(utc, "UTC")?;
            if styles.contains(ParseStyles::ADJUST_TO_UNIVERSAL)
                || (styles.contains(ParseStyles::ROUNDTRIP_KIND) && zone == Zone::Utc)
            {
                return CalendarMoment::new(utc, MomentKind::Utc);
            }
            let local = utc + zone::local_offset_at_utc(utc);
            return CalendarMoment::new(calendar::check_ticks(local, "local")?, MomentKind::Local);
        }

        let adjust = styles.contains(ParseStyles::ADJUST_TO_UNIVERSAL);
        if styles.contains(ParseStyles::ASSUME_LOCAL) {
            if adjust {
                let utc = ticks - zone::local_offset_at_local(ticks);
                return CalendarMoment::new(calendar::check_ticks(utc, "UTC")?, MomentKind::Utc);
            }
            return CalendarMoment::new(ticks, MomentKind::Local);
        }
        if styles.contains(ParseStyles::ASSUME_UNIVERSAL) {
            if adjust {
                return CalendarMoment::new(ticks, MomentKind::Utc);
            }
            let local = ticks + zone::local_offset_at_utc(ticks);
            return CalendarMoment::new(calendar::check_ticks(local, "local")?, MomentKind::Local);
        }
        CalendarMoment::new(ticks, MomentKind::Unspecified)
    }

    fn into_offset(self, styles: ParseStyles, ctx: &ParseContext) -> MomentResult<OffsetMoment> {
        let ticks = self.resolve_ticks(styles, ctx)?;
        let offset_minutes = match self.zone {
            Some(zone) => zone.minutes(),
            None if styles.contains(ParseStyles::ASSUME_UNIVERSAL) => 0,
            None => (zone::local_offset_at_local(ticks) / TICKS_PER_MINUTE) as i32,
        };
        let moment = OffsetMoment::from_local_ticks(ticks, offset_minutes)?;
        if styles.contains(ParseStyles::ADJUST_TO_UNIVERSAL) {
            return Ok(moment.to_utc());
        }
        Ok(moment)
    }
}

/// Free-form, culture-aware parse into a calendar moment
///
/// Style flags are validated before the input is examined.
pub fn parse_calendar(
    input: &str,
    culture: &Culture,
    styles: ParseStyles,
    ctx: &ParseContext,
) -> MomentResult<CalendarMoment> {
    let styles = styles.validate_calendar()?;
    lenient::parse(input, culture)?.into_calendar(styles, ctx)
}

/// Strict parse into a calendar moment against the first matching pattern
pub fn parse_calendar_exact(
    input: &str,
    formats: &[&str],
    culture: &Culture,
    styles: ParseStyles,
    ctx: &ParseContext,
) -> MomentResult<CalendarMoment> {
    let styles = styles.validate_calendar()?;
    exact::parse_any(input, formats, culture, styles)?.into_calendar(styles, ctx)
}

/// Free-form, culture-aware parse into an offset moment
pub fn parse_offset(
    input: &str,
    culture: &Culture,
    styles: ParseStyles,
    ctx: &ParseContext,
) -> MomentResult<OffsetMoment> {
    let styles = styles.validate_offset()?;
    lenient::parse(input, culture)?.into_offset(styles, ctx)
}

/// Strict parse into an offset moment against the first matching pattern
pub fn parse_offset_exact(
    input: &str,
    formats: &[&str],
    culture: &Culture,
    styles: ParseStyles,
    ctx: &ParseContext,
) -> MomentResult<OffsetMoment> {
    let styles = styles.validate_offset()?;
    exact::parse_any(input, formats, culture, styles)?.into_offset(styles, ctx)
}
