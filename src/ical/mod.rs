//! This module handles conversion between iCal text and internal representations
//!
//! Parsing is delegated to the `ical` crate, which does not provide any way to write calendars back. Writing back is
//! done here, see [`Property`]'s `Display` implementation.

mod parser;
pub use parser::IcalParser;
mod property;
pub use property::{escape_param_value, Property};

/// Line terminator of the calendars this crate generates
pub const LINE_ENDING: &str = "\r\n";

/// Join content lines into a calendar text, each line (including the last one) being terminated by [`LINE_ENDING`]
pub fn build_from<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push_str(LINE_ENDING);
    }
    text
}
