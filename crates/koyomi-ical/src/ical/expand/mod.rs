//! Occurrence expansion for recurring components.
//!
//! This module turns a component's recurrence properties into its concrete
//! occurrences: per-rule streams expand RRULE/EXRULE and list RDATE/EXDATE,
//! a merger folds them into one sorted stream, and an enumeration pass
//! applies exclusions and bounds and materializes each accepted occurrence
//! into a standalone component.

mod instance;
mod merge;
mod occurrences;
mod recur;
mod stream;

pub use instance::occurrence_instance;
pub use merge::OccurrenceMerger;
pub use occurrences::{OccurrenceOptions, Occurrences, collect_occurrences, is_bounded, occurrences};
pub use recur::RecurIter;
pub use stream::{DateListStream, Occurrence, OccurrenceStream, RRuleStream};
