use std::fmt;

use log::debug;
use tempora_core::{Culture, MomentResult, OffsetMoment, ParseStyles};
use tempora_ports::{Clock, MomentSource, OffsetMomentProvider, source};

use crate::calendar::discard_error;
use crate::system::SystemClock;

/// Offset-moment provider with injectable current-time sources
#[derive(Clone)]
pub struct OffsetProvider {
    now_source: MomentSource<OffsetMoment>,
    utc_now_source: MomentSource<OffsetMoment>,
    culture: &'static Culture,
}

impl OffsetProvider {
    /// Provider backed by the system clock and the invariant culture
    pub fn new() -> Self {
        Self {
            now_source: source(|| SystemClock::new().offset_now()),
            utc_now_source: source(|| SystemClock::new().offset_utc_now()),
            culture: Culture::invariant(),
        }
    }

    pub fn with_sources(
        now_source: MomentSource<OffsetMoment>,
        utc_now_source: MomentSource<OffsetMoment>,
    ) -> Self {
        Self::new()
            .with_now_source(now_source)
            .with_utc_now_source(utc_now_source)
    }

    /// Builder: Replace the local current-time source
    pub fn with_now_source(mut self, now_source: MomentSource<OffsetMoment>) -> Self {
        debug!("OffsetProvider: local time source overridden");
        self.now_source = now_source;
        self
    }

    /// Builder: Replace the UTC current-time source
    pub fn with_utc_now_source(mut self, utc_now_source: MomentSource<OffsetMoment>) -> Self {
        debug!("OffsetProvider: UTC time source overridden");
        self.utc_now_source = utc_now_source;
        self
    }

    /// Builder: Culture used by `parse` and `try_parse`
    pub fn with_culture(mut self, culture: &'static Culture) -> Self {
        self.culture = culture;
        self
    }

    pub fn with_culture_name(self, name: &str) -> MomentResult<Self> {
        Ok(self.with_culture(Culture::from_name(name)?))
    }

    pub fn culture(&self) -> &'static Culture {
        self.culture
    }
}

impl Default for OffsetProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OffsetProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetProvider")
            .field("culture", &self.culture.name)
            .finish_non_exhaustive()
    }
}

impl OffsetMomentProvider for OffsetProvider {
    fn now(&self) -> OffsetMoment {
        (self.now_source)()
    }

    fn utc_now(&self) -> OffsetMoment {
        (self.utc_now_source)()
    }

    fn from_file_time(&self, file_time: i64) -> MomentResult<OffsetMoment> {
        OffsetMoment::from_file_time(file_time)
    }

    fn from_unix_time_milliseconds(&self, milliseconds: i64) -> MomentResult<OffsetMoment> {
        OffsetMoment::from_unix_time_milliseconds(milliseconds)
    }

    fn from_unix_time_seconds(&self, seconds: i64) -> MomentResult<OffsetMoment> {
        OffsetMoment::from_unix_time_seconds(seconds)
    }

    fn parse(&self, input: &str) -> MomentResult<OffsetMoment> {
        self.parse_with_styles(input, self.culture, ParseStyles::NONE)
    }

    fn parse_with_culture(&self, input: &str, culture: &Culture) -> MomentResult<OffsetMoment> {
        self.parse_with_styles(input, culture, ParseStyles::NONE)
    }

    fn parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<OffsetMoment> {
        let ctx = SystemClock::new().parse_context();
        tempora_core::parse_offset(input, culture, styles, &ctx)
    }

    fn parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
    ) -> MomentResult<OffsetMoment> {
        self.parse_exact_any(input, &[format], culture, ParseStyles::NONE)
    }

    fn parse_exact_with_styles(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<OffsetMoment> {
        self.parse_exact_any(input, &[format], culture, styles)
    }

    fn parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<OffsetMoment> {
        let ctx = SystemClock::new().parse_context();
        tempora_core::parse_offset_exact(input, formats, culture, styles, &ctx)
    }

    fn try_parse(&self, input: &str) -> Option<OffsetMoment> {
        discard_error(self.parse(input), input)
    }

    fn try_parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<OffsetMoment> {
        discard_error(self.parse_with_styles(input, culture, styles), input)
    }

    fn try_parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<OffsetMoment> {
        discard_error(self.parse_exact_with_styles(input, format, culture, styles), input)
    }

    fn try_parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<OffsetMoment> {
        discard_error(self.parse_exact_any(input, formats, culture, styles), input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_ports::fixed_source;

    #[test]
    fn test_default_reads_system_clock() {
        let provider = OffsetProvider::default();
        assert_eq!(provider.utc_now().offset_minutes(), 0);
        assert!(provider.culture().is_invariant());
    }

    #[test]
    fn test_sources_are_independent() {
        let local = OffsetMoment::from_utc_ticks(633_491_154_000_000_000, 120).unwrap();
        let utc = local.to_utc();
        let provider = OffsetProvider::with_sources(fixed_source(local), fixed_source(utc));
        assert_eq!(provider.now(), local);
        assert_eq!(provider.utc_now(), utc);
        assert!(provider.now().same_instant(&provider.utc_now()));
    }

    #[test]
    fn test_parse_uses_configured_culture() {
        let provider = OffsetProvider::new().with_culture_name("en-GB").unwrap();
        let parsed = provider.parse("15/06/2008 08:30 +01:00").unwrap();
        assert_eq!(parsed.offset_minutes(), 60);
        assert!(
            provider
                .parse_with_culture("15/06/2008 08:30 +01:00", Culture::invariant())
                .is_err()
        );
    }
}
