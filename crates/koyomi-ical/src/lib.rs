//! iCalendar component model and occurrence enumeration.
//!
//! Components are assembled programmatically from typed properties; the
//! expand module turns a recurring component into its concrete occurrences.
//! There is no text parser or serializer in this crate.

pub mod error;
pub mod ical;
