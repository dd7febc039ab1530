//! Calendar events

use crate::ical::Property;

/// A `VEVENT`, as a list of properties in their original order
///
/// Properties of nested components (e.g. `VALARM`) are not part of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Event {
    properties: Vec<Property>,
}

impl Event {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The origin-assigned `UID` of this event, if any
    pub fn uid(&self) -> Option<&str> {
        self.properties.iter()
            .find(|prop| prop.is("UID"))
            .map(|prop| prop.value())
    }
}
