//! The parsed form of a calendar file

use crate::ical::Property;
use crate::Event;

/// A `VCALENDAR` as read from an origin.
///
/// `properties` are the top-level content lines, in order. Components other than events (e.g. `VTIMEZONE`) stay
/// there as their flattened `BEGIN`...`END` lines, so that they can be copied back verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Calendar {
    properties: Vec<Property>,
    events: Vec<Event>,
}

impl Calendar {
    pub fn new(properties: Vec<Property>, events: Vec<Event>) -> Self {
        Self { properties, events }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
