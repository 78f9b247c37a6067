use tempora_core::{CalendarMoment, Culture, MomentKind, MomentResult, ParseStyles};

/// Port for naive (offset-less) moment operations
///
/// Mirrors the read, parse and conversion surface of [`CalendarMoment`]
/// while routing the two current-time reads through injectable sources.
/// Parsing and conversion never consult those sources.
pub trait CalendarMomentProvider: Send + Sync {
    /// Earliest representable moment
    fn min_value(&self) -> CalendarMoment {
        CalendarMoment::MIN_VALUE
    }

    /// Latest representable moment
    fn max_value(&self) -> CalendarMoment {
        CalendarMoment::MAX_VALUE
    }

    /// Current local time from the injected local source
    fn now(&self) -> CalendarMoment;

    /// Midnight of the current local date, kind Local
    fn today(&self) -> CalendarMoment;

    /// Current UTC time from the injected UTC source
    fn utc_now(&self) -> CalendarMoment;

    fn days_in_month(&self, year: i32, month: i32) -> MomentResult<u32>;

    fn is_leap_year(&self, year: i32) -> MomentResult<bool>;

    /// Decode a value produced by [`CalendarMoment::to_binary`]
    fn from_binary(&self, data: i64) -> MomentResult<CalendarMoment>;

    /// Decode a Windows file time into local time
    fn from_file_time(&self, file_time: i64) -> MomentResult<CalendarMoment>;

    /// Decode a Windows file time as UTC
    fn from_file_time_utc(&self, file_time: i64) -> MomentResult<CalendarMoment>;

    /// Decode an OLE Automation date
    fn from_oa_date(&self, value: f64) -> MomentResult<CalendarMoment>;

    /// Free-form parse using the provider's culture
    fn parse(&self, input: &str) -> MomentResult<CalendarMoment>;

    fn parse_with_culture(&self, input: &str, culture: &Culture) -> MomentResult<CalendarMoment>;

    fn parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<CalendarMoment>;

    /// Strict parse against a single pattern
    fn parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
    ) -> MomentResult<CalendarMoment>;

    fn parse_exact_with_styles(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<CalendarMoment>;

    /// Strict parse against the first matching pattern
    fn parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<CalendarMoment>;

    /// Same ticks with the kind replaced
    fn specify_kind(&self, moment: CalendarMoment, kind: MomentKind) -> CalendarMoment {
        moment.with_kind(kind)
    }

    /// Like [`parse`](Self::parse) but never fails; `None` on any error
    fn try_parse(&self, input: &str) -> Option<CalendarMoment>;

    fn try_parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<CalendarMoment>;

    fn try_parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<CalendarMoment>;

    fn try_parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<CalendarMoment>;
}
