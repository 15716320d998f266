//! Per-rule occurrence streams.
//!
//! Each recurrence-generating or exclusion property contributes one stream:
//! RRULE and EXRULE expand through [`RecurIter`], RDATE and EXDATE are a
//! pre-sorted list. Streams yield occurrences in non-decreasing start order
//! and signal exhaustion with `None`, never an error.

use koyomi_core::CalDateTime;
use tracing::warn;

use super::recur::RecurIter;
use crate::ical::core::{RRule, RecurrenceDate};

/// One concrete instance of a recurring component.
///
/// Ordering and equality during merging consider only the start; two
/// occurrences with equal starts are the same instance regardless of end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Start instant.
    pub start: CalDateTime,
    /// End instant, when the source carries one (PERIOD entries do, rule
    /// expansions do not).
    pub end: Option<CalDateTime>,
}

impl Occurrence {
    /// Creates an occurrence.
    #[must_use]
    pub const fn new(start: CalDateTime, end: Option<CalDateTime>) -> Self {
        Self { start, end }
    }
}

/// A sorted source of occurrences for one recurrence or exclusion property.
///
/// Implementations yield occurrences in non-decreasing start order, never
/// rewind, and keep returning `None` once exhausted.
pub trait OccurrenceStream: std::fmt::Debug {
    /// Returns the next occurrence, or `None` once the stream is exhausted.
    fn next_occurrence(&mut self) -> Option<Occurrence>;

    /// Whether this stream is known to terminate.
    fn is_bounded(&self) -> bool;
}

/// Occurrences expanded from a single RRULE or EXRULE.
#[derive(Debug)]
pub struct RRuleStream {
    iter: Option<RecurIter>,
    bounded: bool,
}

impl RRuleStream {
    /// Builds a stream for a rule seeded at the component's start.
    ///
    /// A rule on a component without a start has nothing to expand from and
    /// becomes an empty, bounded stream.
    #[must_use]
    pub fn new(rule: &RRule, seed: Option<CalDateTime>) -> Self {
        match seed {
            Some(seed) => Self {
                bounded: rule.is_bounded(),
                iter: Some(RecurIter::new(rule.clone(), seed)),
            },
            None => {
                warn!(rule = %rule, "recurrence rule on a component without a start, treating as empty");
                Self { iter: None, bounded: true }
            }
        }
    }
}

impl OccurrenceStream for RRuleStream {
    fn next_occurrence(&mut self) -> Option<Occurrence> {
        let start = self.iter.as_mut()?.next()?;
        Some(Occurrence::new(start, None))
    }

    fn is_bounded(&self) -> bool {
        self.bounded
    }
}

/// Occurrences from explicit RDATE or EXDATE entries.
///
/// Entries are sorted once at construction and equal starts collapsed, so
/// the stream honors the non-decreasing contract whatever order the
/// properties listed them in.
#[derive(Debug)]
pub struct DateListStream {
    entries: std::vec::IntoIter<Occurrence>,
}

impl DateListStream {
    /// Builds a stream over the given entries.
    #[must_use]
    pub fn new(entries: &[RecurrenceDate]) -> Self {
        let mut occurrences: Vec<Occurrence> = entries
            .iter()
            .map(|e| Occurrence::new(e.start(), e.end()))
            .collect();
        occurrences.sort_by_key(|o| o.start);
        occurrences.dedup_by_key(|o| o.start);
        Self {
            entries: occurrences.into_iter(),
        }
    }
}

impl OccurrenceStream for DateListStream {
    fn next_occurrence(&mut self) -> Option<Occurrence> {
        self.entries.next()
    }

    fn is_bounded(&self) -> bool {
        true
    }
}
