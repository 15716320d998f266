//! iCalendar property parameters (RFC 5545 §3.2).

/// A property parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter value, if any.
    pub value: Option<String>,
}

impl Parameter {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            value: Some(value.into()),
        }
    }

    /// Creates a TZID parameter (RFC 5545 §3.2.19).
    ///
    /// The identifier is carried opaquely; no offset resolution happens in
    /// this crate.
    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new("TZID", tzid)
    }

    /// Creates a VALUE type parameter (RFC 5545 §3.2.20).
    #[must_use]
    pub fn value_type(value_type: impl Into<String>) -> Self {
        Self::new("VALUE", value_type)
    }

    /// Returns the parameter value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
