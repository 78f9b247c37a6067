use std::sync::Arc;

use tempora_core::{CalendarMoment, OffsetMoment};

/// Zero-argument time source a provider delegates its current-time reads to
pub type MomentSource<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Wrap a closure as a [`MomentSource`]
pub fn source<T, F>(f: F) -> MomentSource<T>
where
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A source that returns the same value on every call
pub fn fixed_source<T>(value: T) -> MomentSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    Arc::new(move || value.clone())
}

/// Port for reading the current time
///
/// Real implementations read the host clock; tests substitute their own.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in the local zone, kind Local
    fn local_now(&self) -> CalendarMoment;

    /// Current time in UTC, kind Utc
    fn utc_now(&self) -> CalendarMoment;

    /// Current time with the local zone's offset
    fn offset_now(&self) -> OffsetMoment;

    /// Current time with a zero offset
    fn offset_utc_now(&self) -> OffsetMoment;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_core::MomentKind;

    #[test]
    fn test_fixed_source_repeats() {
        let t0 = CalendarMoment::new(633_491_154_000_000_000, MomentKind::Local).unwrap();
        let now = fixed_source(t0);
        assert_eq!(now(), t0);
        assert_eq!(now(), t0);
    }

    #[test]
    fn test_source_wraps_closure() {
        let now = source(|| OffsetMoment::MAX_VALUE);
        assert_eq!(now(), OffsetMoment::MAX_VALUE);
    }
}
