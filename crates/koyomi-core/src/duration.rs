//! Duration values (RFC 5545 §3.3.6).

use chrono::TimeDelta;
use std::fmt;

/// A duration of time in the iCalendar component form.
///
/// RFC 5545 expresses a duration as either a number of weeks or a combination
/// of days and time parts; this struct stores all parts and callers stick to
/// one shape. `Display` renders the week form only when no other part is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    /// Whether the duration is negative (leading `-`).
    pub negative: bool,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    /// Returns a zero-length duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn weeks(weeks: u32) -> Self {
        Self { weeks, ..Self::zero() }
    }

    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self { days, ..Self::zero() }
    }

    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self { hours, ..Self::zero() }
    }

    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self { minutes, ..Self::zero() }
    }

    #[must_use]
    pub const fn seconds(seconds: u32) -> Self {
        Self { seconds, ..Self::zero() }
    }

    /// Returns this duration with the sign flipped.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            negative: !self.negative,
            ..self
        }
    }

    /// Returns whether every part of this duration is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.weeks == 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Converts to a signed `chrono` delta for date arithmetic.
    #[must_use]
    pub fn to_time_delta(self) -> TimeDelta {
        let seconds = i64::from(self.weeks) * 7 * 86_400
            + i64::from(self.days) * 86_400
            + i64::from(self.hours) * 3_600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);
        if self.negative {
            TimeDelta::seconds(-seconds)
        } else {
            TimeDelta::seconds(seconds)
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.is_zero() {
            return write!(f, "T0S");
        }

        if self.weeks > 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0 {
            return write!(f, "{}W", self.weeks);
        }

        // Non-week parts; weeks fold into days for mixed values.
        let days = self.days + self.weeks * 7;
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Duration::zero().to_string(), "PT0S");
        assert_eq!(Duration::weeks(2).to_string(), "P2W");
        assert_eq!(Duration::hours(1).to_string(), "PT1H");
        assert_eq!(
            Duration {
                negative: false,
                weeks: 0,
                days: 1,
                hours: 2,
                minutes: 0,
                seconds: 30,
            }
            .to_string(),
            "P1DT2H30S"
        );
        assert_eq!(Duration::days(3).negated().to_string(), "-P3D");
    }

    #[test]
    fn to_time_delta() {
        assert_eq!(Duration::hours(1).to_time_delta(), TimeDelta::hours(1));
        assert_eq!(Duration::weeks(1).to_time_delta(), TimeDelta::days(7));
        assert_eq!(
            Duration::minutes(90).negated().to_time_delta(),
            TimeDelta::minutes(-90)
        );
    }
}
