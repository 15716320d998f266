//! Recurrence rule model (RFC 5545 §3.3.10, §3.8.5.3).
//!
//! The model covers FREQ, INTERVAL, COUNT, UNTIL, WKST, BYMONTH, BYMONTHDAY,
//! and BYDAY. Parts are stored as given; the expand module decides how each
//! part applies at each frequency. Parts that do not apply to a rule's
//! frequency are ignored during expansion, not rejected here.

use chrono::Weekday;
use koyomi_core::{CalDateTime, Date};
use std::fmt;

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the RFC 5545 name for this frequency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weekday with an optional ordinal (`BYDAY=2MO`, `BYDAY=-1FR`, `BYDAY=TU`).
///
/// The ordinal selects the nth matching weekday within the rule's frequency
/// period (negative counts from the end) and is meaningful only for MONTHLY
/// and YEARLY rules; elsewhere the weekday alone is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Every occurrence of the weekday within the period.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// The nth occurrence of the weekday within the period.
    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }
}

/// Returns the two-letter RFC 5545 code for a weekday.
#[must_use]
pub(crate) const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        f.write_str(weekday_code(self.weekday))
    }
}

/// UNTIL bound of a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Until {
    Date(Date),
    DateTime(CalDateTime),
}

impl Until {
    /// Returns the inclusive upper bound as an instant.
    ///
    /// A DATE bound covers the whole final day, so it resolves to the last
    /// second of that day.
    #[must_use]
    pub fn limit(self) -> CalDateTime {
        match self {
            Self::Date(date) => date
                .midnight()
                .checked_add(chrono::TimeDelta::seconds(86_399))
                .unwrap_or_else(|| date.midnight()),
            Self::DateTime(dt) => dt,
        }
    }
}

impl fmt::Display for Until {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => date.fmt(f),
            Self::DateTime(dt) => dt.fmt(f),
        }
    }
}

/// A recurrence rule (RFC 5545 §3.8.5.3).
///
/// Built with [`RRule::new`] plus the `with_*` setters; fields are public for
/// direct inspection. A rule is bounded when it carries COUNT or UNTIL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRule {
    pub freq: Frequency,
    /// Interval between periods; defaults to 1.
    pub interval: u32,
    pub count: Option<u32>,
    pub until: Option<Until>,
    /// Week start day; defaults to Monday per RFC 5545.
    pub wkst: Weekday,
    pub by_month: Vec<u8>,
    pub by_month_day: Vec<i8>,
    pub by_day: Vec<WeekdayNum>,
}

impl RRule {
    /// Creates a rule with the given frequency and default parts.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            count: None,
            until: None,
            wkst: Weekday::Mon,
            by_month: Vec::new(),
            by_month_day: Vec::new(),
            by_day: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub const fn with_until(mut self, until: Until) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub const fn with_wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = wkst;
        self
    }

    #[must_use]
    pub fn with_by_month(mut self, months: impl Into<Vec<u8>>) -> Self {
        self.by_month = months.into();
        self
    }

    #[must_use]
    pub fn with_by_month_day(mut self, days: impl Into<Vec<i8>>) -> Self {
        self.by_month_day = days.into();
        self
    }

    #[must_use]
    pub fn with_by_day(mut self, days: impl Into<Vec<WeekdayNum>>) -> Self {
        self.by_day = days.into();
        self
    }

    /// Returns whether this rule is known to terminate.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.count.is_some() || self.until.is_some()
    }
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.freq)?;
        if self.interval != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }
        if let Some(until) = self.until {
            write!(f, ";UNTIL={until}")?;
        }
        if self.wkst != Weekday::Mon {
            write!(f, ";WKST={}", weekday_code(self.wkst))?;
        }
        write_part(f, "BYMONTH", &self.by_month)?;
        write_part(f, "BYMONTHDAY", &self.by_month_day)?;
        write_part(f, "BYDAY", &self.by_day)?;
        Ok(())
    }
}

fn write_part<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    values: &[T],
) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }
    write!(f, ";{name}=")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rrule_defaults() {
        let rule = RRule::new(Frequency::Daily);
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.wkst, Weekday::Mon);
        assert!(!rule.is_bounded());
    }

    #[test]
    fn rrule_bounded_by_count_or_until() {
        assert!(RRule::new(Frequency::Daily).with_count(3).is_bounded());
        let until = Until::Date(Date::new(2024, 6, 1).unwrap());
        assert!(RRule::new(Frequency::Daily).with_until(until).is_bounded());
    }

    #[test]
    fn until_date_covers_final_day() {
        let until = Until::Date(Date::new(2024, 6, 1).unwrap());
        assert_eq!(until.limit().to_string(), "20240601T235959");
    }

    #[test]
    fn rrule_display() {
        let rule = RRule::new(Frequency::Monthly)
            .with_interval(2)
            .with_count(10)
            .with_by_day(vec![WeekdayNum::nth(-1, Weekday::Fri)]);
        assert_eq!(rule.to_string(), "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=-1FR");

        let weekly = RRule::new(Frequency::Weekly)
            .with_wkst(Weekday::Sun)
            .with_by_day(vec![
                WeekdayNum::every(Weekday::Tue),
                WeekdayNum::every(Weekday::Thu),
            ]);
        assert_eq!(weekly.to_string(), "FREQ=WEEKLY;WKST=SU;BYDAY=TU,TH");
    }
}
