//! iCalendar property value forms (RFC 5545 §3.3).

use koyomi_core::{CalDateTime, Date, Duration};

use super::rrule::RRule;

/// A period of time (RFC 5545 §3.3.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Start and explicit end.
    Explicit { start: CalDateTime, end: CalDateTime },
    /// Start and positive duration.
    Start { start: CalDateTime, duration: Duration },
}

impl Period {
    /// Returns the period's start instant.
    #[must_use]
    pub const fn start(self) -> CalDateTime {
        match self {
            Self::Explicit { start, .. } | Self::Start { start, .. } => start,
        }
    }

    /// Returns the period's end instant.
    ///
    /// The duration form resolves by adding the duration to the start;
    /// `None` only when that addition overflows the representable range.
    #[must_use]
    pub fn end(self) -> Option<CalDateTime> {
        match self {
            Self::Explicit { end, .. } => Some(end),
            Self::Start { start, duration } => start.checked_add(duration.to_time_delta()),
        }
    }
}

/// One entry of an RDATE or EXDATE value list (RFC 5545 §3.8.5.1, §3.8.5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceDate {
    Date(Date),
    DateTime(CalDateTime),
    Period(Period),
}

impl RecurrenceDate {
    /// Returns the start instant this entry contributes to enumeration.
    ///
    /// DATE entries normalize to midnight at the start of the day.
    #[must_use]
    pub fn start(self) -> CalDateTime {
        match self {
            Self::Date(date) => date.midnight(),
            Self::DateTime(dt) => dt,
            Self::Period(period) => period.start(),
        }
    }

    /// Returns the explicit end instant, present only for period entries.
    #[must_use]
    pub fn end(self) -> Option<CalDateTime> {
        match self {
            Self::Date(_) | Self::DateTime(_) => None,
            Self::Period(period) => period.end(),
        }
    }
}

impl From<Date> for RecurrenceDate {
    fn from(date: Date) -> Self {
        Self::Date(date)
    }
}

impl From<CalDateTime> for RecurrenceDate {
    fn from(dt: CalDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Period> for RecurrenceDate {
    fn from(period: Period) -> Self {
        Self::Period(period)
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i32),
    Date(Date),
    DateTime(CalDateTime),
    Duration(Duration),
    Period(Period),
    Recur(RRule),
    RecurrenceDates(Vec<RecurrenceDate>),
}

impl Value {
    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an integer if it is an integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a date if it is a date value.
    #[must_use]
    pub const fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the value as a date-time if it is a date-time value.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<CalDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns the value as a duration if it is a duration value.
    #[must_use]
    pub const fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the value as a period if it is a period value.
    #[must_use]
    pub const fn as_period(&self) -> Option<Period> {
        match self {
            Self::Period(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the value as a recurrence rule if it is a RECUR value.
    #[must_use]
    pub const fn as_recur(&self) -> Option<&RRule> {
        match self {
            Self::Recur(rule) => Some(rule),
            _ => None,
        }
    }

    /// Returns the recurrence date entries if this is an RDATE/EXDATE list.
    #[must_use]
    pub fn as_recurrence_dates(&self) -> Option<&[RecurrenceDate]> {
        match self {
            Self::RecurrenceDates(entries) => Some(entries),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(day: u32, hour: u32) -> CalDateTime {
        CalDateTime::new(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn period_end_resolution() {
        let explicit = Period::Explicit {
            start: dt(1, 9),
            end: dt(1, 17),
        };
        assert_eq!(explicit.end(), Some(dt(1, 17)));

        let by_duration = Period::Start {
            start: dt(1, 9),
            duration: Duration::hours(8),
        };
        assert_eq!(by_duration.end(), Some(dt(1, 17)));
    }

    #[test]
    fn recurrence_date_normalizes_date_to_midnight() {
        let entry = RecurrenceDate::from(Date::new(2024, 1, 5).unwrap());
        assert_eq!(entry.start().to_string(), "20240105T000000");
        assert_eq!(entry.end(), None);
    }

    #[test]
    fn recurrence_date_period_carries_end() {
        let entry = RecurrenceDate::from(Period::Explicit {
            start: dt(2, 9),
            end: dt(2, 12),
        });
        assert_eq!(entry.start(), dt(2, 9));
        assert_eq!(entry.end(), Some(dt(2, 12)));
    }
}
