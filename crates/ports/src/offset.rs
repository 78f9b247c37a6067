use tempora_core::{Culture, MomentResult, OffsetMoment, ParseStyles};

/// Port for offset-aware moment operations
///
/// Parsed offsets must lie within fourteen hours of UTC.
pub trait OffsetMomentProvider: Send + Sync {
    fn min_value(&self) -> OffsetMoment {
        OffsetMoment::MIN_VALUE
    }

    fn max_value(&self) -> OffsetMoment {
        OffsetMoment::MAX_VALUE
    }

    /// Current time at the local offset, from the injected local source
    fn now(&self) -> OffsetMoment;

    /// Current time at offset zero, from the injected UTC source
    fn utc_now(&self) -> OffsetMoment;

    /// Decode a Windows file time at the local offset
    fn from_file_time(&self, file_time: i64) -> MomentResult<OffsetMoment>;

    fn from_unix_time_milliseconds(&self, milliseconds: i64) -> MomentResult<OffsetMoment>;

    fn from_unix_time_seconds(&self, seconds: i64) -> MomentResult<OffsetMoment>;

    fn parse(&self, input: &str) -> MomentResult<OffsetMoment>;

    fn parse_with_culture(&self, input: &str, culture: &Culture) -> MomentResult<OffsetMoment>;

    fn parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<OffsetMoment>;

    fn parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
    ) -> MomentResult<OffsetMoment>;

    fn parse_exact_with_styles(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<OffsetMoment>;

    fn parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> MomentResult<OffsetMoment>;

    fn try_parse(&self, input: &str) -> Option<OffsetMoment>;

    fn try_parse_with_styles(
        &self,
        input: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<OffsetMoment>;

    fn try_parse_exact(
        &self,
        input: &str,
        format: &str,
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<OffsetMoment>;

    fn try_parse_exact_any(
        &self,
        input: &str,
        formats: &[&str],
        culture: &Culture,
        styles: ParseStyles,
    ) -> Option<OffsetMoment>;
}
