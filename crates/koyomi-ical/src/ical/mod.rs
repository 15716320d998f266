//! iCalendar data model (RFC 5545) and occurrence expansion.
//!
//! Components are assembled programmatically from typed properties. A
//! recurring component (RRULE, RDATE, and their EX counterparts) expands into
//! concrete single-occurrence components with `RECURRENCE-ID` set.
//!
//! ## Usage
//!
//! ```rust
//! use koyomi_core::CalDateTime;
//! use koyomi_ical::error::IcalResult;
//! use koyomi_ical::ical::core::{Component, Frequency, Property, RRule, names};
//! use koyomi_ical::ical::expand::{OccurrenceOptions, collect_occurrences};
//!
//! fn main() -> IcalResult<()> {
//!     let mut event = Component::event();
//!     event.add_property(Property::text(names::UID, "standup@example.com"));
//!     event.add_property(Property::datetime(
//!         names::DTSTART,
//!         CalDateTime::new(2024, 1, 1, 9, 0, 0)?,
//!     ));
//!     event.add_property(Property::rrule(
//!         names::RRULE,
//!         RRule::new(Frequency::Daily).with_count(3),
//!     ));
//!
//!     let mornings = collect_occurrences(&event, OccurrenceOptions::new())?;
//!     assert_eq!(mornings.len(), 3);
//!     assert!(mornings.iter().all(|m| m.get_property(names::RRULE).is_none()));
//!     Ok(())
//! }
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Component, property, and recurrence rule types
//! - [`expand`] - Occurrence streams, merging, and enumeration

pub mod core;
pub mod expand;

#[cfg(test)]
mod tests;
