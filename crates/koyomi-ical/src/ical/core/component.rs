//! iCalendar component types (RFC 5545 §3.4-3.6).

use koyomi_core::CalDateTime;

use super::{Property, RRule, RecurrenceDate, Value, names};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Extension/X-component.
    Other,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Other => "X-OTHER",
        }
    }

    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Other,
        }
    }

    /// Returns whether this component kind can carry recurrence properties.
    ///
    /// Schedulable components recur directly; STANDARD and DAYLIGHT recur to
    /// describe timezone transition sets.
    #[must_use]
    pub const fn supports_recurrence(self) -> bool {
        matches!(
            self,
            Self::Event | Self::Todo | Self::Journal | Self::Standard | Self::Daylight
        )
    }

    /// Returns the name of the property that ends this component's span.
    ///
    /// VTODO ends at DUE; everything else that has a span uses DTEND.
    #[must_use]
    pub const fn end_property_name(self) -> &'static str {
        match self {
            Self::Todo => names::DUE,
            _ => names::DTEND,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An iCalendar component.
///
/// Components can contain properties and nested sub-components.
/// For example, a VCALENDAR contains VEVENTs, which may contain VALARMs.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Component type.
    pub kind: ComponentKind,
    /// Original component name (preserved for X-components).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a new component with the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            name: kind.as_str().to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a new component with a custom name (for X-components).
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = ComponentKind::parse(&name);
        Self {
            kind,
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a VCALENDAR component.
    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    /// Creates a VEVENT component.
    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    /// Creates a VTODO component.
    #[must_use]
    pub fn todo() -> Self {
        Self::new(ComponentKind::Todo)
    }

    /// Creates a VJOURNAL component.
    #[must_use]
    pub fn journal() -> Self {
        Self::new(ComponentKind::Journal)
    }

    /// Creates a VFREEBUSY component.
    #[must_use]
    pub fn freebusy() -> Self {
        Self::new(ComponentKind::FreeBusy)
    }

    /// Creates a VTIMEZONE component.
    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    /// Creates a STANDARD timezone sub-component.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ComponentKind::Standard)
    }

    /// Creates a DAYLIGHT timezone sub-component.
    #[must_use]
    pub fn daylight() -> Self {
        Self::new(ComponentKind::Daylight)
    }

    /// Creates a VALARM component.
    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Returns this component with a property added.
    #[must_use]
    pub fn with_property(mut self, prop: Property) -> Self {
        self.add_property(prop);
        self
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .collect()
    }

    /// Sets a property, replacing any existing properties with the same name.
    pub fn set_property(&mut self, prop: Property) {
        self.properties.retain(|p| p.name != prop.name);
        self.properties.push(prop);
    }

    /// Removes all properties with the given name.
    pub fn remove_properties(&mut self, name: &str) {
        let name_upper = name.to_ascii_uppercase();
        self.properties.retain(|p| p.name != name_upper);
    }

    /// Returns the UID property value if present.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property(names::UID)?.as_text()
    }

    /// Returns the SUMMARY property value if present.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get_property(names::SUMMARY)?.as_text()
    }

    /// Returns children of a specific kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Returns all VEVENT children.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Event)
    }

    /// Returns all VTODO children.
    #[must_use]
    pub fn todos(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Todo)
    }

    /// Returns all VTIMEZONE children.
    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Timezone)
    }

    /// Returns the DTSTART property if present.
    #[must_use]
    pub fn dtstart(&self) -> Option<&Property> {
        self.get_property(names::DTSTART)
    }

    /// Returns the start instant of this component.
    ///
    /// DATE-valued starts normalize to midnight so date and datetime
    /// components enumerate on the same axis.
    #[must_use]
    pub fn start_value(&self) -> Option<CalDateTime> {
        self.dtstart()?.as_instant()
    }

    /// Returns the end property for this component's kind (DTEND, or DUE
    /// for VTODO).
    #[must_use]
    pub fn end_property(&self) -> Option<&Property> {
        self.get_property(self.kind.end_property_name())
    }

    /// Returns the end instant of this component.
    #[must_use]
    pub fn end_value(&self) -> Option<CalDateTime> {
        self.end_property()?.as_instant()
    }

    /// Returns all RRULE recurrence rules on this component.
    #[must_use]
    pub fn rrules(&self) -> Vec<&RRule> {
        self.get_properties(names::RRULE)
            .into_iter()
            .filter_map(Property::as_recur)
            .collect()
    }

    /// Returns all EXRULE exclusion rules on this component.
    #[must_use]
    pub fn exrules(&self) -> Vec<&RRule> {
        self.get_properties(names::EXRULE)
            .into_iter()
            .filter_map(Property::as_recur)
            .collect()
    }

    /// Returns all RDATE entries, flattened across properties.
    #[must_use]
    pub fn rdate_entries(&self) -> Vec<RecurrenceDate> {
        self.date_entries(names::RDATE)
    }

    /// Returns all EXDATE entries, flattened across properties.
    #[must_use]
    pub fn exdate_entries(&self) -> Vec<RecurrenceDate> {
        self.date_entries(names::EXDATE)
    }

    fn date_entries(&self, name: &str) -> Vec<RecurrenceDate> {
        let mut entries = Vec::new();
        for prop in self.get_properties(name) {
            match &prop.value {
                Value::RecurrenceDates(list) => entries.extend(list.iter().copied()),
                Value::Date(d) => entries.push(RecurrenceDate::from(*d)),
                Value::DateTime(dt) => entries.push(RecurrenceDate::from(*dt)),
                Value::Period(p) => entries.push(RecurrenceDate::from(*p)),
                _ => {}
            }
        }
        entries
    }

    /// Returns the RECURRENCE-ID property if present.
    #[must_use]
    pub fn recurrence_id(&self) -> Option<&Property> {
        self.get_property(names::RECURRENCE_ID)
    }
}
