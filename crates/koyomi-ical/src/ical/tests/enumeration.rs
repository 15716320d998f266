//! Enumeration behavior over whole components.
//!
//! These tests drive the public surface the way a calendar application
//! would: build a component, enumerate its occurrences, inspect the
//! materialized instances.

use koyomi_core::{CalDateTime, Date};

use super::fixtures::*;
use crate::error::IcalError;
use crate::ical::core::{
    Component, ComponentKind, Frequency, Parameter, Period, Property, RRule, RecurrenceDate,
    Until, names,
};
use crate::ical::expand::{OccurrenceOptions, collect_occurrences, occurrences};

fn starts(instances: &[Component]) -> Vec<CalDateTime> {
    instances.iter().filter_map(Component::start_value).collect()
}

#[test]
fn daily_count_yields_hour_long_instances() {
    let instances = collect_occurrences(&daily_standup(), OccurrenceOptions::new()).unwrap();

    assert_eq!(
        starts(&instances),
        [dt(2024, 1, 1, 9, 0), dt(2024, 1, 2, 9, 0), dt(2024, 1, 3, 9, 0)]
    );
    for instance in &instances {
        let start = instance.start_value().unwrap();
        assert_eq!(
            instance.recurrence_id().and_then(Property::as_datetime),
            Some(start)
        );
        assert_eq!(
            instance.end_value().unwrap().signed_duration_since(start),
            chrono::TimeDelta::hours(1)
        );
        assert!(instance.get_property(names::RRULE).is_none());
        assert_eq!(instance.uid(), Some("standup@koyomi"));
    }
}

#[test]
fn exdate_removes_the_matching_instance() {
    let mut event = daily_standup();
    event.add_property(Property::recurrence_dates(
        names::EXDATE,
        vec![RecurrenceDate::from(dt(2024, 1, 2, 9, 0))],
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(starts(&instances), [dt(2024, 1, 1, 9, 0), dt(2024, 1, 3, 9, 0)]);
}

#[test]
fn exdate_with_a_different_time_removes_nothing() {
    let mut event = daily_standup();
    event.add_property(Property::recurrence_dates(
        names::EXDATE,
        vec![RecurrenceDate::from(dt(2024, 1, 2, 10, 0))],
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(instances.len(), 3);
}

#[test]
fn coincident_rules_yield_one_instance() {
    // 2024-01-08 is a Monday; the daily and weekly rules both generate it.
    let mut event = Component::event();
    event.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 8, 9, 0)));
    event.add_property(Property::rrule(names::RRULE, RRule::new(Frequency::Daily)));
    event.add_property(Property::rrule(names::RRULE, RRule::new(Frequency::Weekly)));

    let options = OccurrenceOptions::new().with_before(dt(2024, 1, 10, 0, 0));
    let instances = collect_occurrences(&event, options).unwrap();

    assert_eq!(starts(&instances), [dt(2024, 1, 8, 9, 0), dt(2024, 1, 9, 9, 0)]);
}

#[test]
fn count_option_caps_an_unbounded_rule() {
    let options = OccurrenceOptions::new().with_count(4);
    let instances = collect_occurrences(&unbounded_daily(), options).unwrap();

    assert_eq!(instances.len(), 4);
    assert_eq!(starts(&instances).last(), Some(&dt(2024, 1, 4, 9, 0)));
}

#[test]
fn before_cutoff_is_exclusive() {
    let options = OccurrenceOptions::new().with_before(dt(2024, 1, 4, 9, 0));
    let instances = collect_occurrences(&unbounded_daily(), options).unwrap();

    assert_eq!(
        starts(&instances),
        [dt(2024, 1, 1, 9, 0), dt(2024, 1, 2, 9, 0), dt(2024, 1, 3, 9, 0)]
    );
}

#[test]
fn starting_skips_earlier_instances() {
    let mut event = Component::event();
    event.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0)));
    event.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Daily).with_count(5),
    ));

    let options = OccurrenceOptions::new().with_starting(dt(2024, 1, 3, 9, 0));
    let instances = collect_occurrences(&event, options).unwrap();

    assert_eq!(
        starts(&instances),
        [dt(2024, 1, 3, 9, 0), dt(2024, 1, 4, 9, 0), dt(2024, 1, 5, 9, 0)]
    );
}

#[test]
fn eager_collection_rejects_unbounded_components() {
    let result = collect_occurrences(&unbounded_daily(), OccurrenceOptions::new());
    assert!(matches!(result, Err(IcalError::UnboundedOccurrences)));
}

#[test]
fn until_makes_a_rule_collectible() {
    let mut event = Component::event();
    event.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0)));
    event.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Daily).with_until(Until::Date(Date::new(2024, 1, 5).unwrap())),
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(instances.len(), 5);
    assert_eq!(starts(&instances).last(), Some(&dt(2024, 1, 5, 9, 0)));
}

#[test]
fn rdate_only_components_enumerate_sorted() {
    let mut event = Component::event();
    event.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0)));
    event.add_property(Property::recurrence_dates(
        names::RDATE,
        vec![
            RecurrenceDate::from(dt(2024, 2, 3, 12, 0)),
            RecurrenceDate::from(dt(2024, 1, 15, 8, 0)),
        ],
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(starts(&instances), [dt(2024, 1, 15, 8, 0), dt(2024, 2, 3, 12, 0)]);
}

#[test]
fn rdate_coinciding_with_a_rule_emits_once() {
    let mut event = Component::event();
    event.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0)));
    event.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Daily).with_count(2),
    ));
    event.add_property(Property::recurrence_dates(
        names::RDATE,
        vec![
            RecurrenceDate::from(dt(2024, 1, 1, 9, 0)),
            RecurrenceDate::from(dt(2024, 1, 20, 9, 0)),
        ],
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(
        starts(&instances),
        [dt(2024, 1, 1, 9, 0), dt(2024, 1, 2, 9, 0), dt(2024, 1, 20, 9, 0)]
    );
}

#[test_log::test]
fn exrule_excludes_its_pattern() {
    // Seeded on a Monday: the weekly exclusion rule knocks out Jan 1 and 8.
    let mut event = Component::event();
    event.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0)));
    event.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Daily).with_count(10),
    ));
    event.add_property(Property::rrule(names::EXRULE, RRule::new(Frequency::Weekly)));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    let instance_starts = starts(&instances);

    assert_eq!(instances.len(), 8);
    assert!(!instance_starts.contains(&dt(2024, 1, 1, 9, 0)));
    assert!(!instance_starts.contains(&dt(2024, 1, 8, 9, 0)));
}

#[test]
fn period_rdate_supplies_an_explicit_end() {
    let mut event = Component::event();
    event.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0)));
    event.add_property(Property::datetime(names::DTEND, dt(2024, 1, 1, 10, 0)));
    event.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Daily).with_count(1),
    ));
    event.add_property(Property::recurrence_dates(
        names::RDATE,
        vec![RecurrenceDate::from(Period::Explicit {
            start: dt(2024, 1, 20, 14, 0),
            end: dt(2024, 1, 20, 16, 30),
        })],
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(instances.len(), 2);
    // The rule instance carries the template's one-hour span; the period
    // instance keeps its own end.
    assert_eq!(instances[0].end_value(), Some(dt(2024, 1, 1, 10, 0)));
    assert_eq!(instances[1].end_value(), Some(dt(2024, 1, 20, 16, 30)));
}

#[test]
fn all_day_instances_keep_the_date_form() {
    let mut event = Component::event();
    event.add_property(Property::date(names::DTSTART, Date::new(2024, 1, 1).unwrap()));
    event.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Daily).with_count(3),
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(instances.len(), 3);

    let second = &instances[1];
    assert_eq!(
        second.dtstart().and_then(Property::as_date),
        Some(Date::new(2024, 1, 2).unwrap())
    );
    assert_eq!(second.dtstart().unwrap().get_param_value("VALUE"), Some("DATE"));
}

#[test]
fn tzid_parameter_follows_instances() {
    let mut event = Component::event();
    event.add_property(
        Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0))
            .with_param(Parameter::tzid("Europe/Paris")),
    );
    event.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Daily).with_count(2),
    ));

    let instances = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
    assert_eq!(
        instances[1].dtstart().and_then(Property::tzid),
        Some("Europe/Paris")
    );
}

#[test]
fn todo_instances_move_their_due() {
    let mut todo = Component::todo();
    todo.add_property(Property::datetime(names::DTSTART, dt(2024, 1, 1, 9, 0)));
    todo.add_property(Property::datetime(names::DUE, dt(2024, 1, 1, 17, 0)));
    todo.add_property(Property::rrule(
        names::RRULE,
        RRule::new(Frequency::Weekly).with_count(2),
    ));

    let instances = collect_occurrences(&todo, OccurrenceOptions::new()).unwrap();
    assert_eq!(
        instances[1]
            .get_property(names::DUE)
            .and_then(Property::as_datetime),
        Some(dt(2024, 1, 8, 17, 0))
    );
}

#[test_log::test]
fn timezone_transition_rules_enumerate() {
    let tz = paris_timezone();
    let daylight = &tz.children_of_kind(ComponentKind::Daylight)[0];
    let standard = &tz.children_of_kind(ComponentKind::Standard)[0];

    let to_daylight: Vec<CalDateTime> = occurrences(daylight, OccurrenceOptions::new())
        .take(3)
        .filter_map(|c| c.start_value())
        .collect();
    assert_eq!(
        to_daylight,
        [dt(1996, 3, 31, 2, 0), dt(1997, 3, 30, 2, 0), dt(1998, 3, 29, 2, 0)]
    );

    let to_standard: Vec<CalDateTime> = occurrences(standard, OccurrenceOptions::new())
        .take(2)
        .filter_map(|c| c.start_value())
        .collect();
    assert_eq!(to_standard, [dt(1996, 10, 27, 3, 0), dt(1997, 10, 26, 3, 0)]);
}

#[test]
fn calendar_children_are_reachable_by_kind() {
    let mut calendar = Component::calendar();
    calendar.add_child(daily_standup());
    calendar.add_child(paris_timezone());
    let mut errands = Component::todo();
    errands.add_property(Property::text(names::UID, "errands@koyomi"));
    calendar.add_child(errands);

    let events = calendar.events();
    assert_eq!(events.len(), 1);
    let instances = collect_occurrences(events[0], OccurrenceOptions::new()).unwrap();
    assert_eq!(instances.len(), 3);

    assert_eq!(calendar.todos()[0].uid(), Some("errands@koyomi"));
    assert_eq!(
        calendar.timezones()[0]
            .get_property(names::TZID)
            .and_then(Property::as_text),
        Some("Europe/Paris")
    );
}
