use std::sync::Arc;

use nexttime_test::CalendarBuilder;
use nexttime_test::config::{LoggingConfig, ScheduleConfig, Settings};
use nexttime_test::rfc::rfc::ical::expand::TimeZoneResolver;
use nexttime_test::schedule::{Direction, ScheduleResolver};

use super::helpers::{next, previous, utc};

#[test_log::test]
fn walks_daily_rule_skipping_exclusions() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240101T090000Z")
        .rule("FREQ=DAILY")
        .exclude_day("20240103")
        .exclude("20240105T090000Z")
        .build();

    let mut fired = Vec::new();
    let mut reference = utc(2024, 1, 1, 0, 0);
    while let Some(found) = next(&resolver, &text, reference) {
        fired.push(found);
        if fired.len() == 4 {
            break;
        }
        reference = found;
    }

    assert_eq!(
        fired,
        vec![
            utc(2024, 1, 1, 9, 0),
            utc(2024, 1, 2, 9, 0),
            utc(2024, 1, 4, 9, 0),
            utc(2024, 1, 6, 9, 0),
        ]
    );
}

#[test_log::test]
fn weekly_rule_keeps_wall_clock_across_dst() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART;TZID=America/New_York:20240101T090000")
        .rule("FREQ=WEEKLY;BYDAY=MO,WE,FR")
        .build();

    // Friday 2024-03-08 08:00 EST
    assert_eq!(
        next(&resolver, &text, utc(2024, 3, 8, 13, 0)),
        Some(utc(2024, 3, 8, 14, 0))
    );
    // Monday after the switch fires at 09:00 EDT
    assert_eq!(
        next(&resolver, &text, utc(2024, 3, 8, 15, 0)),
        Some(utc(2024, 3, 11, 13, 0))
    );
    assert_eq!(
        previous(&resolver, &text, utc(2024, 3, 11, 12, 0)),
        Some(utc(2024, 3, 8, 14, 0))
    );
}

#[test_log::test]
fn previous_far_after_start() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240101T090000Z")
        .rule("FREQ=DAILY")
        .build();

    assert_eq!(
        previous(&resolver, &text, utc(2030, 1, 1, 0, 0)),
        Some(utc(2029, 12, 31, 9, 0))
    );
}

#[test_log::test]
fn until_bounded_rule_stops() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240101T090000Z")
        .rule("FREQ=WEEKLY;UNTIL=20240131T235959Z")
        .build();

    assert_eq!(next(&resolver, &text, utc(2024, 2, 1, 0, 0)), None);
    assert_eq!(
        previous(&resolver, &text, utc(2024, 6, 1, 0, 0)),
        Some(utc(2024, 1, 29, 9, 0))
    );
}

#[test_log::test]
fn local_until_is_read_in_schedule_zone() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART;TZID=Europe/Berlin:20240101T090000")
        .rule("FREQ=DAILY;UNTIL=20240103")
        .build();

    assert_eq!(
        previous(&resolver, &text, utc(2024, 6, 1, 0, 0)),
        Some(utc(2024, 1, 3, 8, 0))
    );
    assert_eq!(next(&resolver, &text, utc(2024, 1, 3, 9, 0)), None);
}

#[test_log::test]
fn rule_without_occurrences_keeps_start() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240110T090000Z")
        .rule("FREQ=DAILY;UNTIL=20240101T000000Z")
        .build();

    assert_eq!(
        next(&resolver, &text, utc(2024, 1, 1, 0, 0)),
        Some(utc(2024, 1, 10, 9, 0))
    );
    // start compared strictly, as without a rule
    assert_eq!(next(&resolver, &text, utc(2024, 1, 10, 9, 0)), None);
    assert_eq!(previous(&resolver, &text, utc(2024, 1, 10, 9, 0)), None);

    let excluded = CalendarBuilder::starting("DTSTART:20240110T090000Z")
        .rule("FREQ=DAILY;COUNT=0")
        .line("EXDATE:20240110T090000Z")
        .build();
    assert_eq!(next(&resolver, &excluded, utc(2024, 1, 1, 0, 0)), None);
}

#[test_log::test]
fn additions_fill_in_after_rule_ends() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240101T090000Z")
        .rule("FREQ=DAILY;COUNT=2")
        .add("20240110T120000Z,20240120T120000Z")
        .build();

    assert_eq!(
        next(&resolver, &text, utc(2024, 1, 5, 0, 0)),
        Some(utc(2024, 1, 10, 12, 0))
    );
    assert_eq!(
        previous(&resolver, &text, utc(2024, 1, 15, 0, 0)),
        Some(utc(2024, 1, 10, 12, 0))
    );
    assert_eq!(next(&resolver, &text, utc(2024, 1, 20, 12, 0)), None);
}

#[test_log::test]
fn date_only_addition_fires_at_local_midnight() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART;TZID=Europe/Berlin:20240301T120000")
        .line("RDATE;VALUE=DATE:20240215")
        .build();

    assert_eq!(
        previous(&resolver, &text, utc(2024, 2, 20, 0, 0)),
        Some(utc(2024, 2, 14, 23, 0))
    );
}

#[test_log::test]
fn date_only_start_uses_midnight() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART;VALUE=DATE:20240101")
        .rule("FREQ=WEEKLY")
        .build();

    assert_eq!(
        next(&resolver, &text, utc(2024, 1, 2, 0, 0)),
        Some(utc(2024, 1, 8, 0, 0))
    );
}

#[test_log::test]
fn unknown_tzid_falls_back_to_default_zone() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART;TZID=Mars/Olympus_Mons:20240101T090000")
        .rule("FREQ=DAILY")
        .build();

    let found = resolver
        .resolve(&text, Some(utc(2024, 1, 5, 0, 0)), Some("Asia/Tokyo"), Direction::Next)
        .unwrap();

    // 09:00 JST
    assert_eq!(found, Some(utc(2024, 1, 6, 0, 0)));
}

#[test_log::test]
fn configured_default_timezone_applies() {
    let settings = Settings {
        schedule: ScheduleConfig {
            default_timezone: Some("Australia/Sydney".to_string()),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
    };
    let zones = Arc::new(TimeZoneResolver::builtin());
    let resolver = ScheduleResolver::from_settings(zones, &settings).unwrap();
    let text = CalendarBuilder::starting("DTSTART:20240101T090000")
        .rule("FREQ=DAILY")
        .build();

    // 09:00 AEDT is 22:00 UTC the day before
    assert_eq!(
        next(&resolver, &text, utc(2024, 1, 5, 0, 0)),
        Some(utc(2024, 1, 5, 22, 0))
    );

    let overridden = resolver
        .resolve(&text, Some(utc(2024, 1, 5, 0, 0)), Some("UTC"), Direction::Next)
        .unwrap();
    assert_eq!(overridden, Some(utc(2024, 1, 5, 9, 0)));
}

#[test_log::test]
fn only_first_event_is_used() {
    let resolver = ScheduleResolver::builtin();
    let text = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART:20240101T090000Z\r\n\
RRULE:FREQ=DAILY\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
DTSTART:20240101T060000Z\r\n\
RRULE:FREQ=DAILY\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_eq!(
        next(&resolver, text, utc(2024, 1, 5, 0, 0)),
        Some(utc(2024, 1, 5, 9, 0))
    );
}

#[test_log::test]
fn folded_lines_are_unfolded() {
    let resolver = ScheduleResolver::builtin();
    let text = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART;TZID=Europe/Lon\r\n don:20240101T090000\r\n\
RRULE:FREQ=WEEKLY;\r\n BYDAY=TU\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_eq!(
        next(&resolver, text, utc(2024, 1, 3, 0, 0)),
        Some(utc(2024, 1, 9, 9, 0))
    );
}

#[test_log::test]
fn errors_surface_through_typed_api() {
    let resolver = ScheduleResolver::builtin();
    let reference = Some(utc(2024, 1, 5, 0, 0));

    assert!(resolver.resolve("not a calendar", reference, None, Direction::Next).is_err());

    let bad_rule = CalendarBuilder::starting("DTSTART:20240101T090000Z")
        .rule("FREQ=DAILY;BYHOUR=25")
        .build();
    assert!(resolver.resolve(&bad_rule, reference, None, Direction::Next).is_err());

    let no_start = CalendarBuilder::new().rule("FREQ=DAILY").build();
    assert!(resolver.resolve(&no_start, reference, None, Direction::Next).is_err());
}

#[test_log::test]
fn resolver_is_shared_across_threads() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART;TZID=Europe/Berlin:20240101T090000")
        .rule("FREQ=DAILY")
        .build();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|day| {
                let resolver = &resolver;
                let text = &text;
                scope.spawn(move || next(resolver, text, utc(2024, 1, day, 0, 0)))
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![
            Some(utc(2024, 1, 1, 8, 0)),
            Some(utc(2024, 1, 2, 8, 0)),
            Some(utc(2024, 1, 3, 8, 0)),
            Some(utc(2024, 1, 4, 8, 0)),
        ]
    );
}
