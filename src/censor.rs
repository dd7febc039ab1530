//! Turns a calendar into its free/busy counterpart
//!
//! The free/busy calendar only tells *when* something happens. It contains:
//! * the time zone definitions of the origin, copied verbatim,
//! * for every event, a placeholder title, its scheduling properties, and a rewritten `UID`.
//!
//! Any other property (title, description, location, attendees...) and any nested component (alarms...) is dropped.

use crate::error::Error;
use crate::ical::{build_from, Property};
use crate::traits::CalendarParser;
use crate::{Calendar, Event};

/// Prefix of the rewritten event UIDs
pub const UID_PREFIX: &str = "calproxy";

/// The only event properties that make it to the free/busy calendar (besides the title and the UID)
pub const SCHEDULING_PROPERTIES: [&str; 4] = ["DTSTART", "DTEND", "DURATION", "RRULE"];

const TIMEZONE_COMPONENT: &str = "VTIMEZONE";

/// Parse `raw` and produce its censored version
pub fn transform<P>(parser: &P, raw: &str, origin_id: &str, free_busy_title: &str) -> Result<String, Error>
where
    P: CalendarParser + ?Sized,
{
    let calendar = parser.parse(raw)?;
    Ok(censor(&calendar, origin_id, free_busy_title))
}

/// Produce the censored version of an already parsed calendar
pub fn censor(calendar: &Calendar, origin_id: &str, free_busy_title: &str) -> String {
    let mut lines = Vec::new();
    lines.push(Property::new("BEGIN", "VCALENDAR").to_string());
    lines.extend(timezone_blocks(calendar.properties()).map(|prop| prop.to_string()));
    for event in calendar.events() {
        lines.extend(censored_event(event, origin_id, free_busy_title));
    }
    lines.push(Property::new("END", "VCALENDAR").to_string());

    build_from(lines)
}

/// The `UID` an event gets in the free/busy calendar.
///
/// It includes the origin identifier, so that events coming from different origins never share a UID once aggregated.
pub fn rewritten_uid(uid: &str, origin_id: &str) -> String {
    format!("{}-{}-{}", UID_PREFIX, uid, origin_id)
}

/// Top-level properties that belong to a `VTIMEZONE` block, delimiters included
fn timezone_blocks(properties: &[Property]) -> impl Iterator<Item = &Property> {
    let mut inside = false;
    properties.iter().filter(move |prop| {
        if prop.is_begin_of(TIMEZONE_COMPONENT) {
            inside = true;
        }
        let keep = inside;
        if prop.is_end_of(TIMEZONE_COMPONENT) {
            inside = false;
        }
        keep
    })
}

fn is_scheduling_property(prop: &Property) -> bool {
    SCHEDULING_PROPERTIES.iter().any(|name| prop.is(name))
}

fn censored_event(event: &Event, origin_id: &str, free_busy_title: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(Property::new("BEGIN", "VEVENT").to_string());
    lines.push(Property::new("SUMMARY", free_busy_title).to_string());

    lines.extend(event.properties().iter()
        .filter(|prop| is_scheduling_property(prop))
        .map(|prop| prop.to_string()));

    for uid in event.properties().iter().filter(|prop| prop.is("UID")) {
        let value = rewritten_uid(uid.value(), origin_id);
        let mut rewritten = uid.clone();
        rewritten.set_value(value);
        lines.push(rewritten.to_string());
    }

    lines.push(Property::new("END", "VEVENT").to_string());
    lines
}


#[cfg(test)]
mod test {
    use super::*;

    const ORIGIN_ID: &str = "0123abcd";

    /// A parser that always returns the same calendar, whatever the text
    struct StubParser(Calendar);

    impl CalendarParser for StubParser {
        fn parse(&self, _text: &str) -> Result<Calendar, Error> {
            Ok(self.0.clone())
        }
    }

    /// A parser that rejects everything
    struct FailingParser;

    impl CalendarParser for FailingParser {
        fn parse(&self, _text: &str) -> Result<Calendar, Error> {
            Err(Error::Parse("this is not a calendar".into()))
        }
    }

    fn tz_param() -> Vec<String> {
        vec![String::from("Europe/Paris")]
    }

    fn example_event() -> Event {
        Event::new(vec![
            Property::new("DTSTAMP", "20210320T090000Z"),
            Property::new("SUMMARY", "Board Meeting"),
            Property::new("DTSTART", "20210321T100000").with_param("TZID", tz_param()),
            Property::new("LOCATION", "Room 42"),
            Property::new("UID", "1"),
            Property::new("RRULE", "FREQ=WEEKLY;COUNT=4"),
            Property::new("DESCRIPTION", "Quarterly numbers"),
            Property::new("ATTENDEE", "mailto:john@example.com").with_param("CN", vec![String::from("John")]),
            Property::new("DTEND", "20210321T110000").with_param("TZID", tz_param()),
        ])
    }

    fn timezone_block() -> Vec<Property> {
        vec![
            Property::new("BEGIN", "VTIMEZONE"),
            Property::new("TZID", "Europe/Paris"),
            Property::new("BEGIN", "STANDARD"),
            Property::new("DTSTART", "19701025T030000"),
            Property::new("TZOFFSETFROM", "+0200"),
            Property::new("TZOFFSETTO", "+0100"),
            Property::new("END", "STANDARD"),
            Property::new("END", "VTIMEZONE"),
        ]
    }

    #[test]
    fn test_censored_event() {
        let calendar = Calendar::new(Vec::new(), vec![example_event()]);
        let censored = censor(&calendar, ORIGIN_ID, "Busy");

        let expected = "BEGIN:VCALENDAR\r\n\
            BEGIN:VEVENT\r\n\
            SUMMARY:Busy\r\n\
            DTSTART;TZID=\"Europe/Paris\":20210321T100000\r\n\
            RRULE:FREQ=WEEKLY;COUNT=4\r\n\
            DTEND;TZID=\"Europe/Paris\":20210321T110000\r\n\
            UID:calproxy-1-0123abcd\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        assert_eq!(censored, expected);
    }

    #[test]
    fn test_only_allowed_properties_remain() {
        let calendar = Calendar::new(Vec::new(), vec![example_event(), example_event()]);
        let censored = censor(&calendar, ORIGIN_ID, "Busy");

        for line in censored.lines() {
            let name = line.split(|c: char| c == ':' || c == ';').next().unwrap();
            assert!(
                ["BEGIN", "END", "SUMMARY", "DTSTART", "DTEND", "DURATION", "RRULE", "UID"].contains(&name),
                "unexpected line {:?}", line
            );
        }
        assert!(censored.contains("Board Meeting") == false);
        assert!(censored.contains("Room 42") == false);
        assert!(censored.contains("Quarterly") == false);
        assert!(censored.contains("john@example.com") == false);
        assert!(censored.contains("DTSTAMP") == false);
    }

    #[test]
    fn test_timezones_pass_through() {
        let mut properties = vec![
            Property::new("VERSION", "2.0"),
            Property::new("PRODID", "-//Example Corp//Calendar//EN"),
        ];
        properties.extend(timezone_block());
        properties.push(Property::new("X-WR-CALNAME", "Secret project"));

        let calendar = Calendar::new(properties, Vec::new());
        let censored = censor(&calendar, ORIGIN_ID, "Busy");

        let mut expected = vec![String::from("BEGIN:VCALENDAR")];
        expected.extend(timezone_block().iter().map(|p| p.to_string()));
        expected.push(String::from("END:VCALENDAR"));
        assert_eq!(censored, build_from(expected));
    }

    #[test]
    fn test_no_timezone() {
        let calendar = Calendar::new(vec![Property::new("VERSION", "2.0")], Vec::new());
        let censored = censor(&calendar, ORIGIN_ID, "Busy");
        assert_eq!(censored, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
    }

    #[test]
    fn test_several_timezones() {
        let mut properties = timezone_block();
        properties.push(Property::new("CALSCALE", "GREGORIAN"));
        properties.extend(timezone_block());

        let calendar = Calendar::new(properties, Vec::new());
        let censored = censor(&calendar, ORIGIN_ID, "Busy");
        assert_eq!(censored.matches("BEGIN:VTIMEZONE").count(), 2);
        assert!(censored.contains("CALSCALE") == false);
    }

    #[test]
    fn test_missing_properties_are_omitted() {
        let event = Event::new(vec![
            Property::new("SUMMARY", "Lunch"),
            Property::new("DTSTART", "20210321T120000Z"),
        ]);
        let calendar = Calendar::new(Vec::new(), vec![event]);
        let censored = censor(&calendar, ORIGIN_ID, "Busy");
        assert_eq!(censored, "BEGIN:VCALENDAR\r\n\
            BEGIN:VEVENT\r\n\
            SUMMARY:Busy\r\n\
            DTSTART:20210321T120000Z\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n");
    }

    #[test]
    fn test_rewritten_uid() {
        assert_eq!(rewritten_uid("1", "abc"), "calproxy-1-abc");
        assert_ne!(rewritten_uid("1", "abc"), rewritten_uid("1", "def"));
    }

    #[test]
    fn test_transform_with_stub_parser() {
        let parser = StubParser(Calendar::new(timezone_block(), vec![example_event()]));
        let censored = transform(&parser, "ignored", ORIGIN_ID, "Occupied").unwrap();
        assert!(censored.contains("SUMMARY:Occupied\r\n"));
        assert!(censored.contains("TZOFFSETTO:+0100\r\n"));
        assert!(censored.contains("UID:calproxy-1-0123abcd\r\n"));
    }

    #[test]
    fn test_transform_parse_error() {
        let result = transform(&FailingParser, "garbage", ORIGIN_ID, "Busy");
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
