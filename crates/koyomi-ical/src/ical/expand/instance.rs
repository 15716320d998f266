//! Materialization of single occurrences.

use koyomi_core::CalDateTime;
use tracing::warn;

use super::stream::Occurrence;
use crate::ical::core::{Component, Property, Value, names};

/// ## Summary
/// Builds the standalone component for one occurrence of a template.
///
/// The instance is an independent copy of the template with the recurrence
/// machinery removed: RRULE, EXRULE, RDATE and EXDATE are cleared, since a
/// single occurrence does not itself recur. RECURRENCE-ID and DTSTART are
/// both set to the occurrence start, in the template start's value form and
/// with its parameters. The end property (DTEND, or DUE for a VTODO) is the
/// occurrence's explicit end when its source carried one, otherwise the
/// template's own span carried onto the new start; a template without an
/// end yields an instance without one.
#[must_use]
pub fn occurrence_instance(template: &Component, occurrence: Occurrence) -> Component {
    let mut instance = template.clone();

    instance.remove_properties(names::RRULE);
    instance.remove_properties(names::EXRULE);
    instance.remove_properties(names::RDATE);
    instance.remove_properties(names::EXDATE);

    instance.set_property(start_shaped_property(
        names::RECURRENCE_ID,
        occurrence.start,
        template.dtstart(),
    ));
    instance.set_property(start_shaped_property(
        names::DTSTART,
        occurrence.start,
        template.dtstart(),
    ));

    let end_name = instance.kind.end_property_name();
    if let Some(end) = occurrence.end {
        instance.set_property(Property::datetime(end_name, end));
    } else if let Some(end_prop) = derived_end(template, occurrence.start) {
        instance.set_property(end_prop);
    } else {
        if template.end_property().is_some() {
            warn!(
                uid = template.uid(),
                "could not carry the template span onto an occurrence, dropping its end"
            );
        }
        instance.remove_properties(end_name);
    }

    instance
}

/// Builds a start-valued property in the template start's form.
///
/// A DATE-valued template start keeps producing DATE values (occurrence
/// starts of all-day components are midnights); parameters such as TZID
/// follow along.
fn start_shaped_property(
    name: &str,
    start: CalDateTime,
    template_start: Option<&Property>,
) -> Property {
    let mut prop = match template_start.map(|p| &p.value) {
        Some(Value::Date(_)) => Property::date(name, start.date()),
        _ => Property::datetime(name, start),
    };
    if let Some(template) = template_start {
        for param in &template.params {
            prop.set_param(param.clone());
        }
    }
    prop
}

/// Carries the template's own (end - start) span onto a new start, in the
/// template end property's form and with its parameters.
fn derived_end(template: &Component, start: CalDateTime) -> Option<Property> {
    let template_start = template.start_value()?;
    let end_prop = template.end_property()?;
    let span = template.end_value()?.signed_duration_since(template_start);
    let end = start.checked_add(span)?;

    let mut prop = match &end_prop.value {
        Value::Date(_) => Property::date(end_prop.name.as_str(), end.date()),
        _ => Property::datetime(end_prop.name.as_str(), end),
    };
    for param in &end_prop.params {
        prop.set_param(param.clone());
    }
    Some(prop)
}
