//! iCalendar core models (RFC 5545).
//!
//! This module defines the data structures for representing iCalendar
//! content: components, typed properties and parameters, value forms, and
//! the recurrence rule model. Values are constructed through the typed
//! helpers rather than parsed from text.

mod component;
mod parameter;
mod property;
mod rrule;
mod value;

pub use chrono::Weekday;
pub use component::{Component, ComponentKind};
pub use parameter::Parameter;
pub use property::{Property, names};
pub use rrule::{Frequency, RRule, Until, WeekdayNum};
pub use value::{Period, RecurrenceDate, Value};
