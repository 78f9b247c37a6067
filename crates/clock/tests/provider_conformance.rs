//! Integration test: providers against the core moment types
//!
//! Checks the injected sources are honoured and that every delegated
//! operation behaves exactly like the core call it wraps.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempora_clock::{CalendarMomentProvider, CalendarProvider, OffsetMomentProvider, OffsetProvider};
use tempora_core::{
    CalendarMoment, Culture, FILE_TIME_OFFSET, MAX_TICKS, MomentError, MomentKind, OffsetMoment,
    ParseStyles, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND, UNIX_EPOCH_TICKS,
    UNIX_MAX_MILLISECONDS, UNIX_MAX_SECONDS, UNIX_MIN_SECONDS,
};
use tempora_ports::{fixed_source, source};

/// 2008-06-15T08:30:00
const T0_TICKS: i64 = 633_491_154_000_000_000;

fn t0(kind: MomentKind) -> CalendarMoment {
    CalendarMoment::new(T0_TICKS, kind).unwrap()
}

fn fr() -> &'static Culture {
    Culture::from_name("fr-FR").unwrap()
}

#[test]
fn test_injected_now_is_returned_every_call() {
    let _ = env_logger::try_init();

    let provider = CalendarProvider::with_sources(
        fixed_source(t0(MomentKind::Local)),
        fixed_source(t0(MomentKind::Utc)),
    );
    for _ in 0..3 {
        assert_eq!(provider.now(), t0(MomentKind::Local));
        assert_eq!(provider.utc_now(), t0(MomentKind::Utc));
    }
}

#[test]
fn test_sources_are_read_on_every_call() {
    let _ = env_logger::try_init();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let provider = CalendarProvider::new().with_now_source(source(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) as i64;
        CalendarMoment::new(T0_TICKS + n * TICKS_PER_SECOND, MomentKind::Local).unwrap()
    }));

    let first = provider.now();
    let second = provider.now();
    assert_eq!(second.ticks() - first.ticks(), TICKS_PER_SECOND);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_today_follows_injected_now() {
    let _ = env_logger::try_init();

    let provider =
        CalendarProvider::new().with_now_source(fixed_source(t0(MomentKind::Unspecified)));
    let today = provider.today();
    assert_eq!(today.kind(), MomentKind::Local);
    assert_eq!(today.ticks(), T0_TICKS - 8 * TICKS_PER_HOUR - 30 * TICKS_PER_MINUTE);
}

#[test]
fn test_bounds() {
    let calendar = CalendarProvider::new();
    assert_eq!(calendar.min_value(), CalendarMoment::MIN_VALUE);
    assert_eq!(calendar.max_value().ticks(), MAX_TICKS);

    let offset = OffsetProvider::new();
    assert_eq!(offset.min_value().utc_ticks(), 0);
    assert_eq!(offset.max_value().utc_ticks(), MAX_TICKS);
}

#[test]
fn test_calendar_queries() {
    let provider = CalendarProvider::new();
    assert_eq!(provider.days_in_month(2020, 2), Ok(29));
    assert_eq!(provider.days_in_month(2021, 2), Ok(28));
    assert_eq!(provider.days_in_month(2021, 12), Ok(31));
    assert!(matches!(provider.days_in_month(2021, 13), Err(MomentError::Range(_))));
    assert!(matches!(provider.days_in_month(0, 1), Err(MomentError::Range(_))));

    assert_eq!(provider.is_leap_year(2000), Ok(true));
    assert_eq!(provider.is_leap_year(1900), Ok(false));
    assert!(matches!(provider.is_leap_year(10_000), Err(MomentError::Range(_))));
}

#[test]
fn test_file_time_matches_core() {
    let provider = CalendarProvider::new();

    let utc = provider.from_file_time_utc(0).unwrap();
    assert_eq!(utc, CalendarMoment::new(FILE_TIME_OFFSET, MomentKind::Utc).unwrap());

    let ft = 128_578_254_000_000_000;
    let local = provider.from_file_time(ft).unwrap();
    assert_eq!(local, CalendarMoment::from_file_time(ft).unwrap());
    assert_eq!(local.kind(), MomentKind::Local);
    assert_eq!(provider.from_file_time_utc(ft).unwrap().to_file_time_utc(), Ok(ft));

    assert!(matches!(provider.from_file_time(-1), Err(MomentError::Range(_))));
    assert!(matches!(
        provider.from_file_time_utc(MAX_TICKS - FILE_TIME_OFFSET + 1),
        Err(MomentError::Range(_))
    ));
}

#[test]
fn test_binary_round_trip() {
    let provider = CalendarProvider::new();
    for moment in [t0(MomentKind::Utc), t0(MomentKind::Unspecified), CalendarMoment::MAX_VALUE] {
        assert_eq!(provider.from_binary(moment.to_binary()), Ok(moment));
    }
    assert!(matches!(
        provider.from_binary(MAX_TICKS + 1),
        Err(MomentError::Format(_))
    ));
}

#[test]
fn test_oa_date() {
    let provider = CalendarProvider::new();
    let noon = provider.from_oa_date(39_614.5).unwrap();
    assert_eq!(
        noon.ticks(),
        T0_TICKS - 8 * TICKS_PER_HOUR - 30 * TICKS_PER_MINUTE + 12 * TICKS_PER_HOUR
    );
    assert_eq!(noon.kind(), MomentKind::Unspecified);
    assert!(matches!(provider.from_oa_date(3e6), Err(MomentError::Format(_))));
    assert!(matches!(provider.from_oa_date(f64::NAN), Err(MomentError::Format(_))));
}

#[test]
fn test_specify_kind_keeps_ticks() {
    let provider = CalendarProvider::new();
    let utc = provider.specify_kind(t0(MomentKind::Local), MomentKind::Utc);
    assert_eq!(utc, t0(MomentKind::Utc));
}

#[test]
fn test_culture_parse_matches_general_pattern() {
    let _ = env_logger::try_init();

    let provider = CalendarProvider::new().with_culture(fr());
    let free = provider.try_parse("15/06/2008 08:30").unwrap();
    let strict = provider.parse_exact("15/06/2008 08:30", "g", fr()).unwrap();
    assert_eq!(free, strict);
    assert_eq!(free, t0(MomentKind::Unspecified));

    // the same text is month-first under the invariant culture
    assert!(CalendarProvider::new().try_parse("15/06/2008 08:30").is_none());
}

#[test]
fn test_try_parse_exact_general_pattern() {
    let _ = env_logger::try_init();

    let provider = CalendarProvider::new();
    let m = provider
        .try_parse_exact("15/06/2008 08:30", "g", fr(), ParseStyles::ADJUST_TO_UNIVERSAL)
        .unwrap();
    // no zone in the input and no assume flag, so nothing to adjust
    assert_eq!(m, t0(MomentKind::Unspecified));

    let styles = ParseStyles::ASSUME_UNIVERSAL | ParseStyles::ADJUST_TO_UNIVERSAL;
    let utc = provider
        .try_parse_exact("15/06/2008 08:30", "g", fr(), styles)
        .unwrap();
    assert_eq!(utc, t0(MomentKind::Utc));

    assert_eq!(provider.try_parse_exact("15/06/2008", "g", fr(), ParseStyles::NONE), None);
    let inv = Culture::invariant();
    assert_eq!(
        provider.try_parse_exact("99999999999", "yyyyyyyyyyy", inv, ParseStyles::NONE),
        None
    );
}

#[test]
fn test_try_parse_garbage_is_none() {
    let _ = env_logger::try_init();

    let calendar = CalendarProvider::new();
    assert_eq!(calendar.try_parse("not a date"), None);
    assert_eq!(
        calendar.try_parse("not a date").unwrap_or(calendar.min_value()),
        CalendarMoment::MIN_VALUE
    );
    assert!(matches!(calendar.parse("not a date"), Err(MomentError::Format(_))));

    let offset = OffsetProvider::new();
    assert_eq!(offset.try_parse(""), None);
    assert!(
        offset
            .try_parse_exact("2008", "yyyy-MM", Culture::invariant(), ParseStyles::NONE)
            .is_none()
    );
}

#[test]
fn test_conflicting_styles_fail_first() {
    let styles = ParseStyles::ASSUME_LOCAL | ParseStyles::ASSUME_UNIVERSAL;
    let calendar = CalendarProvider::new();
    let offset = OffsetProvider::new();
    let inv = Culture::invariant();

    for input in ["2008-06-15 08:30", "garbage"] {
        assert!(matches!(
            calendar.parse_with_styles(input, inv, styles),
            Err(MomentError::Range(_))
        ));
        assert!(matches!(
            calendar.parse_exact_with_styles(input, "yyyy-MM-dd HH:mm", inv, styles),
            Err(MomentError::Range(_))
        ));
        assert!(matches!(offset.parse_with_styles(input, inv, styles), Err(MomentError::Range(_))));
        assert!(calendar.try_parse_with_styles(input, inv, styles).is_none());
        assert!(offset.try_parse_with_styles(input, inv, styles).is_none());
    }
}

#[test]
fn test_exact_any_picks_first_match() {
    let provider = CalendarProvider::new();
    let formats = ["dd.MM.yyyy", "yyyy-MM-dd'T'HH:mm"];
    let m = provider
        .parse_exact_any("2008-06-15T08:30", &formats, Culture::invariant(), ParseStyles::NONE)
        .unwrap();
    assert_eq!(m, t0(MomentKind::Unspecified));
    assert_eq!(
        provider.parse_exact_any("2008", &[], Culture::invariant(), ParseStyles::NONE),
        Err(MomentError::NullInput("formats"))
    );
    assert!(provider
        .try_parse_exact_any("2008", &[], Culture::invariant(), ParseStyles::NONE)
        .is_none());
}

#[test]
fn test_unix_time_conversions() {
    let provider = OffsetProvider::new();
    let from_ms = provider.from_unix_time_milliseconds(300_000).unwrap();
    let from_s = provider.from_unix_time_seconds(300).unwrap();
    assert_eq!(from_ms, from_s);
    assert_eq!(from_ms.utc_ticks(), UNIX_EPOCH_TICKS + 300 * TICKS_PER_SECOND);
    assert_eq!(from_ms.offset_minutes(), 0);

    assert_eq!(provider.from_unix_time_seconds(UNIX_MIN_SECONDS).unwrap().utc_ticks(), 0);
    assert!(provider.from_unix_time_seconds(UNIX_MAX_SECONDS).is_ok());
    assert!(matches!(
        provider.from_unix_time_seconds(UNIX_MAX_SECONDS + 1),
        Err(MomentError::Range(_))
    ));
    assert!(matches!(
        provider.from_unix_time_milliseconds(UNIX_MAX_MILLISECONDS + 1),
        Err(MomentError::Range(_))
    ));
}

#[test]
fn test_offset_file_time() {
    let provider = OffsetProvider::new();
    let moment = provider.from_file_time(128_578_254_000_000_000).unwrap();
    assert_eq!(moment.utc_ticks(), FILE_TIME_OFFSET + 128_578_254_000_000_000);
    assert_eq!(moment.to_file_time(), Ok(128_578_254_000_000_000));
    assert!(matches!(provider.from_file_time(-1), Err(MomentError::Range(_))));
}

#[test]
fn test_offset_parse_validates_offset() {
    let _ = env_logger::try_init();

    let provider = OffsetProvider::new();
    let inv = Culture::invariant();

    let m = provider.parse("2008-06-15T08:30:00+14:00").unwrap();
    assert_eq!(m.offset_minutes(), 840);

    assert_eq!(
        provider.parse("2008-06-15T08:30:00+14:01"),
        Err(MomentError::OffsetRange(841))
    );
    assert_eq!(
        provider.parse_exact("2008-06-15 08:30 -15:00", "yyyy-MM-dd HH:mm zzz", inv),
        Err(MomentError::OffsetRange(-900))
    );
    assert!(provider.try_parse("2008-06-15T08:30:00-14:30").is_none());
}

#[test]
fn test_offset_parse_styles() {
    let provider = OffsetProvider::new();
    let inv = Culture::invariant();

    let m = provider
        .parse_with_styles("2008-06-15 08:30", inv, ParseStyles::ASSUME_UNIVERSAL)
        .unwrap();
    assert_eq!(m, OffsetMoment::from_utc_ticks(T0_TICKS, 0).unwrap());

    let m = provider
        .parse_exact_with_styles(
            "2008-06-15 10:30 +02:00",
            "yyyy-MM-dd HH:mm zzz",
            inv,
            ParseStyles::ADJUST_TO_UNIVERSAL,
        )
        .unwrap();
    assert_eq!(m, OffsetMoment::from_utc_ticks(T0_TICKS, 0).unwrap());

    assert!(matches!(
        provider.parse_with_styles("08:30", inv, ParseStyles::NO_CURRENT_DATE_DEFAULT),
        Err(MomentError::Range(_))
    ));
    // ignored for offset moments
    assert!(provider
        .try_parse_with_styles("2008-06-15 08:30", inv, ParseStyles::ROUNDTRIP_KIND)
        .is_some());
}

#[tokio::test]
async fn test_provider_shared_across_tasks() {
    let _ = env_logger::try_init();

    let pinned = OffsetMoment::from_utc_ticks(T0_TICKS, 120).unwrap();
    let provider: Arc<dyn OffsetMomentProvider> =
        Arc::new(OffsetProvider::new().with_now_source(fixed_source(pinned)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let provider = provider.clone();
            tokio::spawn(async move { provider.now() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), pinned);
    }
}
