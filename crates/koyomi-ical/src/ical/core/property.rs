//! iCalendar property types (RFC 5545 §3.1, §3.8).

use koyomi_core::{CalDateTime, Date, Duration};

use super::{Parameter, Period, RRule, RecurrenceDate, Value};

/// A typed iCalendar property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Typed value.
    pub value: Value,
}

impl Property {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Text(value.into()),
        }
    }

    /// Creates a property with an integer value.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Integer(value),
        }
    }

    /// Creates a property with a datetime value.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: CalDateTime) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::DateTime(dt),
        }
    }

    /// Creates a property with a date value.
    ///
    /// Date-valued properties carry a `VALUE=DATE` parameter since DATE-TIME
    /// is the default value type for the date properties.
    #[must_use]
    pub fn date(name: impl Into<String>, d: Date) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: vec![Parameter::value_type("DATE")],
            value: Value::Date(d),
        }
    }

    /// Creates a property with a duration value.
    #[must_use]
    pub fn duration(name: impl Into<String>, d: Duration) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Duration(d),
        }
    }

    /// Creates a property with a recurrence rule value.
    #[must_use]
    pub fn rrule(name: impl Into<String>, rule: RRule) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Recur(rule),
        }
    }

    /// Creates an RDATE/EXDATE style property from a list of entries.
    ///
    /// A uniform DATE or PERIOD list gets the matching `VALUE` parameter.
    #[must_use]
    pub fn recurrence_dates(
        name: impl Into<String>,
        entries: impl Into<Vec<RecurrenceDate>>,
    ) -> Self {
        let entries = entries.into();
        let params = if entries.iter().all(|e| matches!(e, RecurrenceDate::Date(_)))
            && !entries.is_empty()
        {
            vec![Parameter::value_type("DATE")]
        } else if entries.iter().all(|e| matches!(e, RecurrenceDate::Period(_)))
            && !entries.is_empty()
        {
            vec![Parameter::value_type("PERIOD")]
        } else {
            Vec::new()
        };
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            value: Value::RecurrenceDates(entries),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        let p = self.get_param(name)?;
        p.value()
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param_value("TZID")
    }

    /// Adds a parameter to this property.
    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    /// Sets a parameter, replacing any existing parameter with the same name.
    pub fn set_param(&mut self, param: Parameter) {
        self.params.retain(|p| p.name != param.name);
        self.params.push(param);
    }

    /// Returns this property with a parameter added.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.add_param(param);
        self
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the value as an integer if it is an integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        self.value.as_integer()
    }

    /// Returns the value as a datetime if it is a datetime value.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<CalDateTime> {
        self.value.as_datetime()
    }

    /// Returns the value as a date if it is a date value.
    #[must_use]
    pub const fn as_date(&self) -> Option<Date> {
        self.value.as_date()
    }

    /// Returns the value as a duration if it is a duration value.
    #[must_use]
    pub const fn as_duration(&self) -> Option<Duration> {
        self.value.as_duration()
    }

    /// Returns the value as a period if it is a period value.
    #[must_use]
    pub const fn as_period(&self) -> Option<Period> {
        self.value.as_period()
    }

    /// Returns the value as a recurrence rule if it is a RECUR value.
    #[must_use]
    pub const fn as_recur(&self) -> Option<&RRule> {
        self.value.as_recur()
    }

    /// Returns the recurrence date entries if this is an RDATE/EXDATE list.
    #[must_use]
    pub fn as_recurrence_dates(&self) -> Option<&[RecurrenceDate]> {
        self.value.as_recurrence_dates()
    }

    /// Returns the start instant this property names, if any.
    ///
    /// DATE values normalize to midnight, matching enumeration semantics.
    #[must_use]
    pub fn as_instant(&self) -> Option<CalDateTime> {
        match &self.value {
            Value::DateTime(dt) => Some(*dt),
            Value::Date(d) => Some(d.midnight()),
            _ => None,
        }
    }
}

/// Common property names as constants.
pub mod names {
    // Calendar properties
    pub const CALSCALE: &str = "CALSCALE";
    pub const METHOD: &str = "METHOD";
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";

    // Descriptive properties
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const CLASS: &str = "CLASS";
    pub const COMMENT: &str = "COMMENT";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const LOCATION: &str = "LOCATION";
    pub const PRIORITY: &str = "PRIORITY";
    pub const STATUS: &str = "STATUS";
    pub const SUMMARY: &str = "SUMMARY";

    // Date and time properties
    pub const COMPLETED: &str = "COMPLETED";
    pub const DTEND: &str = "DTEND";
    pub const DUE: &str = "DUE";
    pub const DTSTART: &str = "DTSTART";
    pub const DURATION: &str = "DURATION";
    pub const TRANSP: &str = "TRANSP";

    // Timezone properties
    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";

    // Relationship properties
    pub const ATTENDEE: &str = "ATTENDEE";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const RECURRENCE_ID: &str = "RECURRENCE-ID";
    pub const RELATED_TO: &str = "RELATED-TO";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";

    // Recurrence properties
    pub const EXDATE: &str = "EXDATE";
    /// Removed in RFC 5545 but still emitted by RFC 2445 era producers.
    pub const EXRULE: &str = "EXRULE";
    pub const RDATE: &str = "RDATE";
    pub const RRULE: &str = "RRULE";

    // Change management properties
    pub const CREATED: &str = "CREATED";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";
    pub const SEQUENCE: &str = "SEQUENCE";
}
