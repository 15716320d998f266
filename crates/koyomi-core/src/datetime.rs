//! Calendar date and date-time values (RFC 5545 §3.3.4, §3.3.5).
//!
//! `CalDateTime` is a wall-clock instant: a civil date and time plus a UTC
//! marker. Zoned wall times keep their TZID as a property parameter at a
//! higher layer; no offset arithmetic happens here. Comparison, equality, and
//! hashing consider the wall-clock value only, so values of different forms
//! order deterministically.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CoreError, CoreResult};

/// A calendar date (RFC 5545 §3.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from calendar components.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidDate` if the components do not name a real
    /// calendar day (e.g. month 13, or February 30).
    pub fn new(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CoreError::InvalidDate { year, month, day })
    }

    /// Creates a date from a `chrono` naive date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying naive date.
    #[must_use]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Returns midnight at the start of this day, as a floating date-time.
    #[must_use]
    pub fn midnight(self) -> CalDateTime {
        CalDateTime {
            naive: self.0.and_time(chrono::NaiveTime::MIN),
            utc: false,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// A wall-clock date-time value (RFC 5545 §3.3.5).
///
/// Covers the floating form (`19970714T133000`) and the UTC form
/// (`19970714T133000Z`). Ordering ignores the UTC marker; components are
/// expected to use one form consistently across their date properties.
#[derive(Debug, Clone, Copy)]
pub struct CalDateTime {
    naive: NaiveDateTime,
    utc: bool,
}

impl CalDateTime {
    /// Creates a floating date-time from calendar components.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidDate` or `CoreError::InvalidTime` if the
    /// components are out of range.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> CoreResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(CoreError::InvalidDate { year, month, day })?;
        let naive = date.and_hms_opt(hour, minute, second).ok_or(CoreError::InvalidTime {
            hour,
            minute,
            second,
        })?;
        Ok(Self { naive, utc: false })
    }

    /// Creates a UTC date-time from calendar components.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidDate` or `CoreError::InvalidTime` if the
    /// components are out of range.
    pub fn utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> CoreResult<Self> {
        let mut dt = Self::new(year, month, day, hour, minute, second)?;
        dt.utc = true;
        Ok(dt)
    }

    /// Creates a date-time from a `chrono` naive date-time.
    #[must_use]
    pub const fn from_naive(naive: NaiveDateTime, utc: bool) -> Self {
        Self { naive, utc }
    }

    /// Returns the underlying naive date-time.
    #[must_use]
    pub const fn naive(self) -> NaiveDateTime {
        self.naive
    }

    /// Returns whether this value carries the UTC marker.
    #[must_use]
    pub const fn is_utc(self) -> bool {
        self.utc
    }

    /// Returns the calendar date of this instant.
    #[must_use]
    pub fn date(self) -> Date {
        Date(self.naive.date())
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        self.naive.hour()
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        self.naive.minute()
    }

    #[must_use]
    pub fn second(self) -> u32 {
        self.naive.second()
    }

    /// Adds a signed delta, keeping the value form.
    ///
    /// Returns `None` when the result falls outside the representable range.
    #[must_use]
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        self.naive
            .checked_add_signed(delta)
            .map(|naive| Self { naive, utc: self.utc })
    }

    /// Returns the signed delta from `other` to `self`.
    #[must_use]
    pub fn signed_duration_since(self, other: Self) -> TimeDelta {
        self.naive.signed_duration_since(other.naive)
    }
}

impl PartialEq for CalDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.naive == other.naive
    }
}

impl Eq for CalDateTime {}

impl PartialOrd for CalDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalDateTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.naive.cmp(&other.naive)
    }
}

impl Hash for CalDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.naive.hash(state);
    }
}

impl From<Date> for CalDateTime {
    fn from(date: Date) -> Self {
        date.midnight()
    }
}

impl fmt::Display for CalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            self.naive.year(),
            self.naive.month(),
            self.naive.day(),
            self.naive.hour(),
            self.naive.minute(),
            self.naive.second()
        )?;
        if self.utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_display() {
        let d = Date::new(1997, 7, 14).unwrap();
        assert_eq!(d.to_string(), "19970714");
    }

    #[test]
    fn date_rejects_invalid() {
        assert_eq!(
            Date::new(2023, 2, 29),
            Err(CoreError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn datetime_display_forms() {
        let floating = CalDateTime::new(1997, 7, 14, 13, 30, 0).unwrap();
        assert_eq!(floating.to_string(), "19970714T133000");

        let utc = CalDateTime::utc(1997, 7, 14, 13, 30, 0).unwrap();
        assert_eq!(utc.to_string(), "19970714T133000Z");
    }

    #[test]
    fn datetime_ordering_ignores_form() {
        let floating = CalDateTime::new(2024, 1, 1, 9, 0, 0).unwrap();
        let utc = CalDateTime::utc(2024, 1, 1, 9, 0, 0).unwrap();
        assert_eq!(floating, utc);

        let later = CalDateTime::new(2024, 1, 1, 9, 0, 1).unwrap();
        assert!(floating < later);
    }

    #[test]
    fn date_to_midnight() {
        let d = Date::new(2024, 3, 15).unwrap();
        let dt = CalDateTime::from(d);
        assert_eq!(dt.to_string(), "20240315T000000");
        assert!(!dt.is_utc());
    }

    #[test]
    fn checked_add_keeps_form() {
        let dt = CalDateTime::utc(2024, 1, 1, 9, 0, 0).unwrap();
        let next = dt.checked_add(TimeDelta::hours(25)).unwrap();
        assert_eq!(next.to_string(), "20240102T100000Z");
        assert!(next.is_utc());
    }
}
