use std::fmt;

use log::{debug, trace};
use tempora_core::{CalendarMoment, Culture, MomentKind, MomentResult, ParseStyles};
use tempora_ports::{CalendarMomentProvider, Clock, MomentSource, source};

use crate::system::SystemClock;

/// Log and drop the error of a failed `try_*` parse
pub(crate) fn discard_error<T>(result: MomentResult<T>, input: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("try-parse of {input:?} failed: {e}");
            None
        }
    }
}

/// Calendar-moment provider with injectable current-time sources
///
/// Only `now` and `utc_now` read the sources; `today` derives from `now`.
/// Everything else is a pure computation. Cloning shares the sources.
#[derive(Clone)]
pub struct CalendarProvider {
    now_source: MomentSource<CalendarMoment>,
    utc_now_source: MomentSource<CalendarMoment>,
    culture: &'static Culture,
}

impl CalendarProvider {
    /// Provider backed by the system clock and the invariant culture
    pub fn new() -> Self {
        Self {
            now_source: source(|| SystemClock::new().local_now()),
            utc_now_source: source(|| SystemClock::new().utc_now()),
            culture: Culture::invariant(),
        }
    }

    /// Provider reading both current-time values from the given sources
    pub fn with_sources(
        now_source: MomentSource<CalendarMoment>,
        utc_now_source: MomentSource<CalendarMoment>,
    ) -> Self {
        Self::new()
            .with_now_source(now_source)
            .with_utc_now_source(utc_now_source)
    }

    /// Builder: Replace the local current-time source
    pub fn with_now_source(mut self, now_source: MomentSource<CalendarMoment>) -> Self {
        debug!("CalendarProvider: local time source overridden");
        self.now_source = now_source;
        self
    }

    /// Builder: Replace the UTC current-time source
    pub fn with_utc_now_source(mut self, utc_now_source: MomentSource<CalendarMoment>) -> Self {
        debug!("CalendarProvider: UTC time source overridden");
        self.utc_now_source = utc_now_source;
        self
    }

    /// Builder: Culture used by `parse` and `try_parse`
    pub fn with_culture(mut self, culture: &'static Culture) -> Self {
        self.culture = culture;
        self
    }

    /// Builder: Culture looked up by name
    pub fn with_culture_name(self, name: &str) -> MomentResult<Self> {
        Ok(self.with_culture(Culture::from_name(name)?))
    }

    pub fn culture(&self) -> &'static Culture {
        self.culture
    }
}

impl Default for CalendarProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CalendarProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarProvider")
            .field("culture", &self.culture.name)
            .finish_non_exhaustive()
    }
}

impl CalendarMomentProvider for CalendarProvider {
    fn now(&self) -> CalendarMoment {
        (self.now_source)()
    }

    fn today(&self) -> CalendarMoment {
        self.now().date().with_kind(MomentKind::Local)
    }

    fn utc_now(&self) -> CalendarMoment {
        (self.utc_now_source)()
    }

    fn days_in_month(&self, year: i32, month: i32) -> MomentResult<u32> {
        tempora_core::days_in_month(year, month)
    }

    fn is_leap_year(&self, year: i32) -> MomentResult<bool> {
        tempora_core::is_leap_year(year)
    }

    fn from_binary(&self, data: i64) -> MomentResult<CalendarMoment> {
        CalendarMoment::from_binary(data)
    }

    fn from_file_time(&self, file_time: i64) -> MomentResult<CalendarMoment> {
        CalendarMoment::from_file_time(file_time)
    }

    fn from_file_time_utc(&self, file_time: i64) -> MomentResult<CalendarMoment> {
        CalendarMoment::from_file_time_utc(file_time)
    }

    fn from_oa_date(&self, value: f64) -> MomentResult<CalendarMoment> {
        CalendarMoment::from_oa_date(value)
    }

    fn parse(&self, input: &str) -> MomentResult<CalendarMoment> {
        self.parse_with_styles(input, self.culture, ParseStyles::NONE)
    }

    fn parse_with_culture(&self, input: &str, culture: &Culture) -> MomentResult<CalendarMoment> {
        self.parse_with_styles(input, culture, ParseStyles::NONE)
    }

    fn parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<CalendarMoment> {
        let ctx = SystemClock::new().parse_context();
        tempora_core::parse_calendar(input, culture, styles, &ctx)
    }

    fn parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
    ) -> MomentResult<CalendarMoment> {
        self.parse_exact_any(input, &[format], culture, ParseStyles::NONE)
    }

    fn parse_exact_with_styles(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<CalendarMoment> {
        self.parse_exact_any(input, &[format], culture, styles)
    }

    fn parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<CalendarMoment> {
        let ctx = SystemClock::new().parse_context();
        tempora_core::parse_calendar_exact(input, formats, culture, styles, &ctx)
    }

    fn try_parse(&self, input: &str) -> Option<CalendarMoment> {
        discard_error(self.parse(input), input)
    }

    fn try_parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<CalendarMoment> {
        discard_error(self.parse_with_styles(input, culture, styles), input)
    }

    fn try_parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<CalendarMoment> {
        discard_error(self.parse_exact_with_styles(input, format, culture, styles), input)
    }

    fn try_parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<CalendarMoment> {
        discard_error(self.parse_exact_any(input, formats, culture, styles), input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_core::MomentError;
    use tempora_ports::fixed_source;

    #[test]
    fn test_default_reads_system_clock() {
        let provider = CalendarProvider::default();
        assert_eq!(provider.now().kind(), MomentKind::Local);
        assert_eq!(provider.utc_now().kind(), MomentKind::Utc);
        assert!(provider.culture().is_invariant());
    }

    #[test]
    fn test_culture_by_name() {
        let provider = CalendarProvider::new().with_culture_name("de-DE").unwrap();
        assert_eq!(provider.culture().name, "de-DE");
        assert_eq!(
            CalendarProvider::new().with_culture_name("tlh").unwrap_err(),
            MomentError::UnknownCulture("tlh".to_string())
        );
    }

    #[test]
    fn test_clone_shares_sources() {
        let t0 = CalendarMoment::new(42, MomentKind::Utc).unwrap();
        let provider = CalendarProvider::new().with_utc_now_source(fixed_source(t0));
        let copy = provider.clone();
        assert_eq!(copy.utc_now(), t0);
    }

    #[test]
    fn test_debug_hides_sources() {
        let provider = CalendarProvider::new();
        assert_eq!(format!("{provider:?}"), "CalendarProvider { culture: \"\", .. }");
    }

    #[test]
    fn test_discard_error() {
        assert_eq!(discard_error::<u8>(Ok(3), "3"), Some(3));
        assert_eq!(discard_error::<u8>(Err(MomentError::NullInput("formats")), "x"), None);
    }
}
