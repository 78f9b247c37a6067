//! Gregorian calendar rules and tick arithmetic
//!
//! A tick is 100 nanoseconds. Tick 0 is 0001-01-01T00:00:00 and the last
//! representable tick is 9999-12-31T23:59:59.9999999.

use chrono::{DateTime, NaiveDateTime, Timelike};

use crate::error::{MomentError, MomentResult};

pub const TICKS_PER_MILLISECOND: i64 = 10_000;
pub const TICKS_PER_SECOND: i64 = TICKS_PER_MILLISECOND * 1_000;
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

pub const MILLIS_PER_DAY: i64 = 86_400_000;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_4_YEARS: i64 = DAYS_PER_YEAR * 4 + 1;
const DAYS_PER_100_YEARS: i64 = DAYS_PER_4_YEARS * 25 - 1;
const DAYS_PER_400_YEARS: i64 = DAYS_PER_100_YEARS * 4 + 1;

const DAYS_TO_1601: i64 = DAYS_PER_400_YEARS * 4;
const DAYS_TO_1899: i64 = DAYS_PER_400_YEARS * 4 + DAYS_PER_100_YEARS * 3 - 367;
const DAYS_TO_1970: i64 =
    DAYS_PER_400_YEARS * 4 + DAYS_PER_100_YEARS * 3 + DAYS_PER_4_YEARS * 17 + DAYS_PER_YEAR;
const DAYS_TO_10000: i64 = DAYS_PER_400_YEARS * 25 - 366;

pub const MIN_TICKS: i64 = 0;
pub const MAX_TICKS: i64 = DAYS_TO_10000 * TICKS_PER_DAY - 1;

/// Ticks between 0001-01-01 and the Windows file-time epoch (1601-01-01)
pub const FILE_TIME_OFFSET: i64 = DAYS_TO_1601 * TICKS_PER_DAY;

/// Ticks between 0001-01-01 and the OLE Automation epoch (1899-12-30)
pub const OA_DATE_OFFSET: i64 = DAYS_TO_1899 * TICKS_PER_DAY;

/// Ticks between 0001-01-01 and the Unix epoch (1970-01-01)
pub const UNIX_EPOCH_TICKS: i64 = DAYS_TO_1970 * TICKS_PER_DAY;

/// Earliest moment expressible as an OLE Automation date (0100-01-01)
pub const OA_DATE_MIN_TICKS: i64 = (DAYS_PER_100_YEARS - DAYS_PER_YEAR) * TICKS_PER_DAY;
pub const OA_DATE_MIN: f64 = -657_435.0;
pub const OA_DATE_MAX: f64 = 2_958_466.0;
pub const MAX_MILLIS: i64 = DAYS_TO_10000 * MILLIS_PER_DAY;

const DAYS_TO_MONTH_365: [u32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const DAYS_TO_MONTH_366: [u32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

fn check_year(year: i32) -> MomentResult<()> {
    if !(1..=9999).contains(&year) {
        return Err(MomentError::range(format!(
            "year must be between 1 and 9999, got {year}"
        )));
    }
    Ok(())
}

/// Gregorian leap-year rule for years 1 through 9999
pub fn is_leap_year(year: i32) -> MomentResult<bool> {
    check_year(year)?;
    Ok(year % 4 == 0 && (year % 100 != 0 || year % 400 == 0))
}

/// Number of days in `month` of `year`
pub fn days_in_month(year: i32, month: i32) -> MomentResult<u32> {
    if !(1..=12).contains(&month) {
        return Err(MomentError::range(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    let table = if is_leap_year(year)? {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    };
    let m = month as usize;
    Ok(table[m] - table[m - 1])
}

pub fn is_valid_ticks(ticks: i64) -> bool {
    (MIN_TICKS..=MAX_TICKS).contains(&ticks)
}

pub(crate) fn check_ticks(ticks: i64, what: &str) -> MomentResult<i64> {
    if is_valid_ticks(ticks) {
        Ok(ticks)
    } else {
        Err(MomentError::range(format!(
            "{what} ticks {ticks} outside [{MIN_TICKS}, {MAX_TICKS}]"
        )))
    }
}

/// Ticks at midnight of the given date
///
/// Callers validate the date first; `day` is not checked against the month.
pub(crate) fn date_to_ticks(year: i32, month: u32, day: u32) -> i64 {
    let y = (year - 1) as i64;
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    let table = if leap {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    };
    let days_before_year = y * 365 + y / 4 - y / 100 + y / 400;
    let days = days_before_year + table[(month - 1) as usize] as i64 + day as i64 - 1;
    days * TICKS_PER_DAY
}

pub(crate) fn time_to_ticks(hour: u32, minute: u32, second: u32) -> i64 {
    hour as i64 * TICKS_PER_HOUR
        + minute as i64 * TICKS_PER_MINUTE
        + second as i64 * TICKS_PER_SECOND
}

/// Convert a tick count into a chrono date-time
///
/// Ticks are clamped into the representable range first.
pub fn ticks_to_naive(ticks: i64) -> NaiveDateTime {
    let since_epoch = ticks.clamp(MIN_TICKS, MAX_TICKS) - UNIX_EPOCH_TICKS;
    let secs = since_epoch.div_euclid(TICKS_PER_SECOND);
    let nanos = (since_epoch.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
        .unwrap_or_default()
        .naive_utc()
}

/// Convert a chrono date-time into ticks, truncating below 100ns
pub fn naive_to_ticks(naive: &NaiveDateTime) -> MomentResult<i64> {
    let utc = naive.and_utc();
    let ticks = utc
        .timestamp()
        .checked_mul(TICKS_PER_SECOND)
        .and_then(|t| t.checked_add(UNIX_EPOCH_TICKS))
        .and_then(|t| t.checked_add((naive.nanosecond() % 1_000_000_000) as i64 / 100))
        .ok_or_else(|| MomentError::range(format!("{naive} outside the tick range")))?;
    check_ticks(ticks, "date-time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_epoch_constants() {
        assert_eq!(MAX_TICKS, 3_155_378_975_999_999_999);
        assert_eq!(FILE_TIME_OFFSET, 504_911_232_000_000_000);
        assert_eq!(UNIX_EPOCH_TICKS, 621_355_968_000_000_000);
        assert_eq!(OA_DATE_OFFSET, 599_264_352_000_000_000);
        assert_eq!(MAX_MILLIS, 315_537_897_600_000);
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2020, 2).unwrap(), 29);
        assert_eq!(days_in_month(2021, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
    }

    #[test]
    fn test_days_in_month_matches_chrono() {
        for year in [1, 4, 100, 1600, 1999, 2024, 9999] {
            for month in 1..=12 {
                let first = NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap();
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month as u32 + 1, 1)
                }
                .unwrap();
                let expected = (next - first).num_days() as u32;
                assert_eq!(days_in_month(year, month).unwrap(), expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_calendar_arguments_out_of_range() {
        assert!(matches!(days_in_month(0, 1), Err(MomentError::Range(_))));
        assert!(matches!(days_in_month(10000, 1), Err(MomentError::Range(_))));
        assert!(matches!(days_in_month(2020, 0), Err(MomentError::Range(_))));
        assert!(matches!(days_in_month(2020, 13), Err(MomentError::Range(_))));
        assert!(matches!(is_leap_year(0), Err(MomentError::Range(_))));
        assert!(matches!(is_leap_year(10000), Err(MomentError::Range(_))));
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2020).unwrap());
        assert!(!is_leap_year(2021).unwrap());
        assert!(!is_leap_year(1900).unwrap());
        assert!(is_leap_year(2000).unwrap());
    }

    #[test]
    fn test_ticks_naive_conversion() {
        let naive = NaiveDate::from_ymd_opt(2010, 3, 14)
            .unwrap()
            .and_hms_nano_opt(2, 30, 0, 123_456_700)
            .unwrap();
        let ticks = naive_to_ticks(&naive).unwrap();
        assert_eq!(ticks, date_to_ticks(2010, 3, 14) + time_to_ticks(2, 30, 0) + 1_234_567);
        assert_eq!(ticks_to_naive(ticks), naive);

        let first = NaiveDate::from_ymd_opt(1, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(naive_to_ticks(&first).unwrap(), 0);
        assert_eq!(
            ticks_to_naive(MAX_TICKS).date(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()
        );
    }
}
