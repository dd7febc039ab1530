//! iCal content lines, and how to write them back

use std::fmt::{Display, Formatter};

/// A single content line of an iCal file, e.g. `DTSTART;TZID=Europe/Paris:20210321T100000`
///
/// Parameters keep the order they had in the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    name: String,
    params: Vec<(String, Vec<String>)>,
    value: String,
}

impl Property {
    /// Create a property that has no parameter
    pub fn new<N: ToString, V: ToString>(name: N, value: V) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            value: value.to_string(),
        }
    }

    /// Append a parameter (e.g. `TZID`, or `MEMBER` with several values)
    pub fn with_param<N: ToString>(mut self, name: N, values: Vec<String>) -> Self {
        self.params.push((name.to_string(), values));
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn params(&self) -> &[(String, Vec<String>)] { &self.params }
    pub fn value(&self) -> &str { &self.value }

    pub fn set_value<V: ToString>(&mut self, value: V) {
        self.value = value.to_string();
    }

    /// Property names are case-insensitive
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether this is a `BEGIN:<component>` line
    pub fn is_begin_of(&self, component: &str) -> bool {
        self.is("BEGIN") && self.value.eq_ignore_ascii_case(component)
    }

    /// Whether this is a `END:<component>` line
    pub fn is_end_of(&self, component: &str) -> bool {
        self.is("END") && self.value.eq_ignore_ascii_case(component)
    }
}

/// Quote a parameter value.
///
/// Parameter values may not contain double quotes at all, so they are stripped before the value gets wrapped.
pub fn escape_param_value(value: &str) -> String {
    format!("\"{}\"", value.replace('"', ""))
}

impl Display for Property {
    /// Writes `NAME[;PARAM=VALUE[,VALUE...]...]:VALUE`, without line terminator
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for (param_name, values) in &self.params {
            let escaped: Vec<String> = values.iter()
                .map(|v| escape_param_value(v))
                .collect();
            write!(f, ";{}={}", param_name, escaped.join(","))?;
        }
        write!(f, ":{}", self.value)
    }
}
