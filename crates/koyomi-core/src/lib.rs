//! Calendar value primitives shared across the koyomi crates.
//!
//! Dates, wall-clock date-times, and durations in their RFC 5545 value forms,
//! backed by `chrono` for arithmetic. Timezone identifiers are carried as
//! opaque strings at the property layer; nothing here computes offsets.

pub mod datetime;
pub mod duration;
pub mod error;

pub use datetime::{CalDateTime, Date};
pub use duration::Duration;
pub use error::{CoreError, CoreResult};
