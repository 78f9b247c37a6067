use chrono::{Local, NaiveDateTime, Utc};
use tempora_core::{CalendarMoment, MomentKind, OffsetMoment, ParseContext};
use tempora_ports::Clock;

/// Real system clock for production use
///
/// Reads the host wall clock and local zone on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }

    /// Parse defaults taken from the host's current local date
    pub fn parse_context(&self) -> ParseContext {
        ParseContext::new(Local::now().date_naive())
    }
}

// Host readings always fall inside the tick range; saturate if one ever doesn't
fn reading(naive: NaiveDateTime, kind: MomentKind) -> CalendarMoment {
    CalendarMoment::from_naive(naive, kind)
        .unwrap_or_else(|_| CalendarMoment::MAX_VALUE.with_kind(kind))
}

impl Clock for SystemClock {
    fn local_now(&self) -> CalendarMoment {
        reading(Local::now().naive_local(), MomentKind::Local)
    }

    fn utc_now(&self) -> CalendarMoment {
        reading(Utc::now().naive_utc(), MomentKind::Utc)
    }

    fn offset_now(&self) -> OffsetMoment {
        OffsetMoment::from_chrono(Local::now().fixed_offset()).unwrap_or(OffsetMoment::MAX_VALUE)
    }

    fn offset_utc_now(&self) -> OffsetMoment {
        OffsetMoment::from_chrono(Utc::now().fixed_offset()).unwrap_or(OffsetMoment::MAX_VALUE)
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread;
    use tempora_core::TICKS_PER_MILLISECOND;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let time1 = clock.utc_now();
        thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.utc_now();

        assert!(time2 > time1);
        assert!(time2.ticks() - time1.ticks() >= 9 * TICKS_PER_MILLISECOND);
    }

    #[test]
    fn test_system_clock_kinds() {
        let clock = SystemClock::new();
        assert_eq!(clock.local_now().kind(), MomentKind::Local);
        assert_eq!(clock.utc_now().kind(), MomentKind::Utc);
        assert_eq!(clock.offset_utc_now().offset_minutes(), 0);
        assert_eq!(clock.name(), "SystemClock");
    }

    #[test]
    fn test_offset_now_agrees_with_utc() {
        let clock = SystemClock::new();
        let local = clock.offset_now();
        let utc = clock.offset_utc_now();
        // both reads land within a second of each other
        assert!((utc.utc_ticks() - local.utc_ticks()).abs() < 10_000_000);
    }

    #[test]
    fn test_parse_context_is_today() {
        let ctx = SystemClock::new().parse_context();
        assert!(ctx.today.year() >= 2024);
    }
}
