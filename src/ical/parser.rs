//! A module to parse iCal files

use ::ical::property::Property as IcalProperty;
use ::ical::PropertyParser;

use crate::error::Error;
use crate::ical::Property;
use crate::traits::CalendarParser;
use crate::{Calendar, Event};

/// A [`CalendarParser`] based on the content-line parser of the `ical` crate
///
/// The `ical` crate also provides a full calendar parser, but it splits time zones out of the top-level properties. Here,
/// components are rebuilt from the content lines instead, so that anything that is not an event stays in the
/// top-level property list, in its original order.
#[derive(Clone, Copy, Debug, Default)]
pub struct IcalParser;

impl CalendarParser for IcalParser {
    fn parse(&self, text: &str) -> Result<Calendar, Error> {
        // Some servers start their feeds with a byte order mark
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let reader = PropertyParser::from_reader(text.as_bytes());

        let mut lines = Vec::new();
        for prop in reader {
            match prop {
                Err(err) => return Err(Error::Parse(format!("invalid content line: {}", err))),
                Ok(prop) => lines.push(convert(prop)),
            }
        }

        assemble(lines)
    }
}

fn convert(prop: IcalProperty) -> Property {
    let mut converted = Property::new(prop.name, prop.value.unwrap_or_default());
    for (name, values) in prop.params.unwrap_or_default() {
        converted = converted.with_param(name, values);
    }
    converted
}

/// Rebuild the component tree of a `VCALENDAR` from its flat list of content lines
fn assemble(lines: Vec<Property>) -> Result<Calendar, Error> {
    let mut lines = lines.into_iter();
    match lines.next() {
        None => return Err(Error::Parse("empty calendar".into())),
        Some(first) if first.is_begin_of("VCALENDAR") => (),
        Some(first) => return Err(Error::Parse(format!("expected BEGIN:VCALENDAR, found {}", first))),
    }

    // Components that are currently open, outermost first
    let mut open_components = vec![String::from("VCALENDAR")];
    let mut properties = Vec::new();
    let mut events = Vec::new();
    let mut current_event: Option<Vec<Property>> = None;

    for prop in lines {
        if open_components.is_empty() {
            return Err(Error::Parse(format!("unexpected content after END:VCALENDAR: {}", prop)));
        }

        // How deep the component this line belongs to is (1 for the VCALENDAR itself)
        let depth = if prop.is("BEGIN") {
            open_components.push(prop.value().to_ascii_uppercase());
            open_components.len()
        } else if prop.is("END") {
            let depth = open_components.len();
            match open_components.pop() {
                Some(open) if open.eq_ignore_ascii_case(prop.value()) => (),
                Some(open) => return Err(Error::Parse(format!("END:{} does not match BEGIN:{}", prop.value(), open))),
                None => return Err(Error::Parse(format!("unexpected END:{}", prop.value()))),
            }
            depth
        } else {
            open_components.len()
        };

        if depth == 1 {
            if prop.is("END") == false {
                properties.push(prop);
            }
            continue;
        }

        if depth == 2 && prop.is_begin_of("VEVENT") {
            current_event = Some(Vec::new());
            continue;
        }
        if depth == 2 && prop.is_end_of("VEVENT") {
            events.push(Event::new(current_event.take().unwrap_or_default()));
            continue;
        }

        match current_event.as_mut() {
            // Nested components of an event (e.g. alarms) are deeper, and are not kept
            Some(event_properties) => {
                if depth == 2 {
                    event_properties.push(prop);
                }
            },
            None => properties.push(prop),
        }
    }

    if let Some(unclosed) = open_components.last() {
        return Err(Error::Parse(format!("missing END:{}", unclosed)));
    }

    Ok(Calendar::new(properties, events))
}
