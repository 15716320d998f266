//! Occurrence enumeration for recurring components.
//!
//! Enumeration is a single forward pass: inclusion streams (RRULE, RDATE)
//! merge into one sorted candidate stream, exclusion streams (EXRULE,
//! EXDATE) merge into another, and the exclusion stream is advanced just
//! far enough to decide each candidate. Both streams move strictly forward,
//! so filtering costs amortized constant time per candidate.

use koyomi_core::CalDateTime;
use tracing::{debug, instrument};

use super::instance::occurrence_instance;
use super::merge::OccurrenceMerger;
use super::stream::{DateListStream, Occurrence, OccurrenceStream, RRuleStream};
use crate::error::{IcalError, IcalResult};
use crate::ical::core::{Component, RRule, RecurrenceDate};

/// Bounds on an occurrence enumeration.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceOptions {
    /// Skip occurrences starting before this instant.
    pub starting: Option<CalDateTime>,
    /// Stop at the first occurrence starting at or after this instant.
    pub before: Option<CalDateTime>,
    /// Yield at most this many occurrences.
    pub count: Option<usize>,
}

impl OccurrenceOptions {
    /// No bounds: every occurrence the component generates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            starting: None,
            before: None,
            count: None,
        }
    }

    /// Skips occurrences starting before the given instant.
    #[must_use]
    pub const fn with_starting(mut self, starting: CalDateTime) -> Self {
        self.starting = Some(starting);
        self
    }

    /// Stops at the first occurrence starting at or after the given instant.
    #[must_use]
    pub const fn with_before(mut self, before: CalDateTime) -> Self {
        self.before = Some(before);
        self
    }

    /// Yields at most `count` occurrences.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Lazy iterator of materialized single-occurrence components.
///
/// Yielded components are independent copies of the template with their
/// recurrence properties cleared and RECURRENCE-ID/DTSTART rewritten; the
/// template itself is never touched. Starts are strictly increasing. The
/// iterator ends cleanly when its bounds are reached; an unbounded
/// component without bounds simply never ends.
#[derive(Debug)]
pub struct Occurrences<'a> {
    template: &'a Component,
    inclusions: OccurrenceMerger,
    exclusions: OccurrenceMerger,
    next_exclusion: Option<Occurrence>,
    options: OccurrenceOptions,
    yielded: usize,
    done: bool,
}

impl Occurrences<'_> {
    /// Whether this sequence is known finite: bounded rules, a count limit,
    /// or a cutoff.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.inclusions.is_bounded()
            || self.options.count.is_some()
            || self.options.before.is_some()
    }

    /// Advances the exclusion stream until its front is at or past the
    /// candidate start.
    fn catch_up_exclusions(&mut self, candidate: CalDateTime) {
        if self.next_exclusion.is_none() {
            self.next_exclusion = self.exclusions.next_occurrence();
        }
        while self.next_exclusion.is_some_and(|e| e.start < candidate) {
            self.next_exclusion = self.exclusions.next_occurrence();
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Component;

    fn next(&mut self) -> Option<Component> {
        if self.done {
            return None;
        }
        if self.options.count.is_some_and(|limit| self.yielded >= limit) {
            self.done = true;
            return None;
        }
        loop {
            let Some(candidate) = self.inclusions.next_occurrence() else {
                self.done = true;
                return None;
            };
            if self
                .options
                .before
                .is_some_and(|cutoff| candidate.start >= cutoff)
            {
                self.done = true;
                return None;
            }
            if self
                .options
                .starting
                .is_some_and(|lower| candidate.start < lower)
            {
                continue;
            }
            self.catch_up_exclusions(candidate.start);
            if self
                .next_exclusion
                .is_some_and(|e| e.start == candidate.start)
            {
                debug!(start = %candidate.start, "occurrence excluded");
                continue;
            }
            self.yielded += 1;
            return Some(occurrence_instance(self.template, candidate));
        }
    }
}

impl std::iter::FusedIterator for Occurrences<'_> {}

/// ## Summary
/// Returns the lazy occurrence sequence of a component.
///
/// The component's recurrence properties are read once here; enumeration
/// state is private to the returned iterator, so concurrent enumerations of
/// the same component are independent.
#[must_use]
pub fn occurrences(component: &Component, options: OccurrenceOptions) -> Occurrences<'_> {
    Occurrences {
        template: component,
        inclusions: inclusion_merger(component),
        exclusions: exclusion_merger(component),
        next_exclusion: None,
        options,
        yielded: 0,
        done: false,
    }
}

/// ## Summary
/// Eagerly collects a component's occurrences into a vector.
///
/// ## Errors
/// Returns [`IcalError::UnboundedOccurrences`] before any enumeration work
/// when the rules are unbounded and the options carry neither a count nor a
/// cutoff.
#[instrument(skip(component), fields(uid = component.uid()))]
pub fn collect_occurrences(
    component: &Component,
    options: OccurrenceOptions,
) -> IcalResult<Vec<Component>> {
    let iter = occurrences(component, options);
    if !iter.is_bounded() {
        return Err(IcalError::UnboundedOccurrences);
    }
    let instances: Vec<Component> = iter.collect();
    debug!(instances = instances.len(), "collected occurrences");
    Ok(instances)
}

/// Whether a component's occurrence set is provably finite under the given
/// bounds, without enumerating anything.
#[must_use]
pub fn is_bounded(component: &Component, options: OccurrenceOptions) -> bool {
    occurrences(component, options).is_bounded()
}

fn inclusion_merger(component: &Component) -> OccurrenceMerger {
    merger_for(component, &component.rrules(), component.rdate_entries())
}

fn exclusion_merger(component: &Component) -> OccurrenceMerger {
    merger_for(component, &component.exrules(), component.exdate_entries())
}

/// One stream per rule, plus a single stream over all explicit date entries.
fn merger_for(
    component: &Component,
    rules: &[&RRule],
    dates: Vec<RecurrenceDate>,
) -> OccurrenceMerger {
    let seed = component.start_value();
    let mut sources: Vec<Box<dyn OccurrenceStream>> = Vec::new();
    for rule in rules {
        sources.push(Box::new(RRuleStream::new(rule, seed)));
    }
    if !dates.is_empty() {
        sources.push(Box::new(DateListStream::new(&dates)));
    }
    OccurrenceMerger::new(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::core::{Frequency, Property, names};

    fn daily_event() -> Component {
        let mut event = Component::event();
        event.add_property(Property::datetime(
            names::DTSTART,
            CalDateTime::new(2024, 1, 1, 9, 0, 0).unwrap(),
        ));
        event.add_property(Property::rrule(names::RRULE, RRule::new(Frequency::Daily)));
        event
    }

    #[test]
    fn collect_rejects_unbounded_rules() {
        let result = collect_occurrences(&daily_event(), OccurrenceOptions::new());
        assert!(matches!(result, Err(IcalError::UnboundedOccurrences)));
    }

    #[test]
    fn count_or_cutoff_makes_collection_bounded() {
        let event = daily_event();
        assert!(!is_bounded(&event, OccurrenceOptions::new()));
        assert!(is_bounded(&event, OccurrenceOptions::new().with_count(5)));
        assert!(is_bounded(
            &event,
            OccurrenceOptions::new()
                .with_before(CalDateTime::new(2024, 2, 1, 0, 0, 0).unwrap())
        ));
    }

    #[test]
    fn non_recurring_component_has_no_occurrences() {
        let mut event = Component::event();
        event.add_property(Property::datetime(
            names::DTSTART,
            CalDateTime::new(2024, 1, 1, 9, 0, 0).unwrap(),
        ));

        let collected = collect_occurrences(&event, OccurrenceOptions::new()).unwrap();
        assert!(collected.is_empty());
    }

    #[test]
    fn lazy_iteration_stays_available_for_unbounded_rules() {
        let event = daily_event();
        let starts: Vec<CalDateTime> = occurrences(&event, OccurrenceOptions::new())
            .take(3)
            .filter_map(|c| c.start_value())
            .collect();

        assert_eq!(
            starts,
            [
                CalDateTime::new(2024, 1, 1, 9, 0, 0).unwrap(),
                CalDateTime::new(2024, 1, 2, 9, 0, 0).unwrap(),
                CalDateTime::new(2024, 1, 3, 9, 0, 0).unwrap(),
            ]
        );
    }
}
