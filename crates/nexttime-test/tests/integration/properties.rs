//! Invariants checked over sweeps of reference instants.

use nexttime_test::CalendarBuilder;
use nexttime_test::schedule::{Direction, ScheduleResolver, next_time_ical};

use super::helpers::{hourly, next, previous, utc};

fn sample_schedules() -> Vec<String> {
    vec![
        CalendarBuilder::starting("DTSTART:20240101T090000Z")
            .rule("FREQ=DAILY")
            .exclude_day("20240103")
            .build(),
        CalendarBuilder::starting("DTSTART;TZID=Europe/Berlin:20240329T013000")
            .rule("FREQ=HOURLY;INTERVAL=5")
            .add("20240330T120000Z")
            .build(),
        CalendarBuilder::starting("DTSTART:20240102T000000Z")
            .add("20240101T060000Z,20240103T180000Z")
            .build(),
    ]
}

#[test_log::test]
fn next_is_after_and_previous_is_not() {
    let resolver = ScheduleResolver::builtin();
    for text in sample_schedules() {
        let references =
            hourly(utc(2024, 1, 1, 0, 0), 96).chain(hourly(utc(2024, 3, 29, 0, 0), 72));
        for reference in references {
            if let Some(found) = next(&resolver, &text, reference) {
                assert!(found > reference, "next {found} not after {reference}");
            }
            if let Some(found) = previous(&resolver, &text, reference) {
                assert!(found <= reference, "previous {found} after {reference}");
            }
        }
    }
}

#[test_log::test]
fn next_never_moves_backwards() {
    let resolver = ScheduleResolver::builtin();
    for text in sample_schedules() {
        let mut last = None;
        for reference in hourly(utc(2024, 1, 1, 0, 0), 96) {
            let found = next(&resolver, &text, reference);
            if let (Some(last), Some(found)) = (last, found) {
                assert!(found >= last, "next went from {last} to {found}");
            }
            if found.is_some() {
                last = found;
            }
        }
    }
}

#[test_log::test]
fn resolution_is_repeatable() {
    let resolver = ScheduleResolver::builtin();
    let reference = utc(2024, 1, 2, 12, 0);
    for text in sample_schedules() {
        for direction in [Direction::Next, Direction::Previous] {
            let first = resolver.resolve(&text, Some(reference), None, direction).unwrap();
            let second = resolver.resolve(&text, Some(reference), None, direction).unwrap();
            assert_eq!(first, second);
        }
    }
}

#[test_log::test]
fn previous_of_a_rule_fire_time_is_itself() {
    let resolver = ScheduleResolver::builtin();
    for text in sample_schedules().into_iter().take(2) {
        for reference in hourly(utc(2024, 1, 1, 0, 0), 48) {
            if let Some(found) = next(&resolver, &text, reference) {
                assert_eq!(previous(&resolver, &text, found), Some(found));
            }
        }
    }
}

#[test_log::test]
fn start_without_rule_is_strict_on_both_sides() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240102T000000Z").build();
    let start = utc(2024, 1, 2, 0, 0);

    assert_eq!(next(&resolver, &text, start), None);
    assert_eq!(previous(&resolver, &text, start), None);
    assert_eq!(next(&resolver, &text, utc(2024, 1, 1, 23, 0)), Some(start));
    assert_eq!(previous(&resolver, &text, utc(2024, 1, 2, 1, 0)), Some(start));
}

#[test_log::test]
fn excluded_instants_never_fire() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240110T090000Z")
        .add("20240105T090000Z,20240120T090000Z")
        .exclude("20240105T090000Z")
        .exclude("20240110T090000Z")
        .build();

    assert_eq!(
        next(&resolver, &text, utc(2024, 1, 1, 0, 0)),
        Some(utc(2024, 1, 20, 9, 0))
    );
    assert_eq!(previous(&resolver, &text, utc(2024, 1, 15, 0, 0)), None);
}

#[test_log::test]
fn unsupported_offsets_return_zero() {
    let resolver = ScheduleResolver::builtin();
    let text = sample_schedules().remove(0);
    let reference = Some(utc(2024, 1, 5, 0, 0).timestamp());

    for offset in [1, -2, 7, i32::MIN, i32::MAX] {
        assert_eq!(
            next_time_ical(&resolver, &text, reference, None, Some(offset)),
            0,
            "offset {offset}"
        );
    }
    assert_ne!(next_time_ical(&resolver, &text, reference, None, Some(-1)), 0);
    assert_ne!(next_time_ical(&resolver, &text, reference, None, None), 0);
}

#[test_log::test]
fn missing_reference_means_now() {
    let resolver = ScheduleResolver::builtin();
    let text = CalendarBuilder::starting("DTSTART:20240101T090000Z")
        .rule("FREQ=DAILY")
        .build();

    let before = chrono::Utc::now();
    let found = resolver
        .resolve(&text, None, None, Direction::Next)
        .unwrap()
        .unwrap();

    assert!(found > before);
    assert!(found <= before + chrono::Duration::days(1) + chrono::Duration::minutes(1));
}
