//! The component tree built by the parser: VCALENDAR and its children.

use super::Property;
use super::property::names;

/// Component names the resolver tells apart; anything else (VTODO, VALARM,
/// X- components) is `Unknown` and keeps its written name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Calendar,
    /// The only kind schedules are read from.
    Event,
    Timezone,
    Unknown,
}

impl ComponentKind {
    /// The name used in BEGIN/END lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Timezone => "VTIMEZONE",
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Maps a BEGIN/END name to its kind, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTIMEZONE" => Self::Timezone,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A BEGIN/END block with its properties and nested blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Component {
    pub kind: Option<ComponentKind>,
    /// Name as written, so unknown components keep theirs.
    pub name: String,
    /// Source order; EXDATE and RDATE may repeat.
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

impl Component {
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind: Some(kind),
            name: kind.as_str().to_string(),
            ..Self::default()
        }
    }

    /// A component for a BEGIN line's name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: Some(ComponentKind::parse(&name)),
            name,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    #[must_use]
    pub fn is(&self, kind: ComponentKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// First property called `name` (any case).
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.get_properties(name).next()
    }

    /// Every property called `name` (any case), in source order.
    pub fn get_properties<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Property> {
        let wanted = name.to_ascii_uppercase();
        self.properties.iter().filter(move |p| p.name == wanted)
    }

    /// UID text, used to label log spans.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property(names::UID)?.as_text()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get_property(names::SUMMARY)?.as_text()
    }

    pub fn children_of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.children.iter().filter(move |c| c.kind == Some(kind))
    }
}

/// A parsed document; `root` is always a VCALENDAR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICalendar {
    pub root: Component,
}

impl ICalendar {
    /// An empty calendar carrying VERSION 2.0 and `prodid`.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text("VERSION", "2.0"));
        root.add_property(Property::text("PRODID", prodid));
        Self { root }
    }

    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.get_property("PRODID")?.as_text()
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.get_property("VERSION")?.as_text()
    }

    pub fn add_event(&mut self, event: Component) {
        self.root.add_child(event);
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.children_of_kind(ComponentKind::Event).collect()
    }

    /// The VEVENT a schedule is read from; later ones are ignored.
    #[must_use]
    pub fn first_event(&self) -> Option<&Component> {
        self.root.children_of_kind(ComponentKind::Event).next()
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self::new("-//nexttime//nexttime schedule//EN")
    }
}
